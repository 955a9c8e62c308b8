use axum::{
    extract::Request,
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorBody;

/// Stamps the request path onto error bodies produced by [`ApiError`](crate::error::ApiError).
pub async fn attach_error_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorBody>() {
        Some(body) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(CONTENT_LENGTH);
            let body = ErrorBody {
                path: Some(path),
                ..body
            };
            (parts, Json(body)).into_response()
        }
        None => response,
    }
}
