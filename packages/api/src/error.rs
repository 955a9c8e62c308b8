use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_core::services::errors::blog_service_errors::BlogServiceError;
use blog_core::services::errors::guard_errors::GuardError;
use blog_core::services::errors::token_errors::TokenError;
use blog_core::services::errors::user_service_errors::UserServiceError;
use lambda_http::tracing::error;
use serde::Serialize;

const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug)]
pub enum ApiError {
    UserService(UserServiceError),
    BlogService(BlogServiceError),
    Guard(GuardError),
    BadRequest(String),
    InvalidApiKey,
    Internal,
}

/// Error envelope. `path` is filled in by
/// [`attach_error_path`](crate::middleware::error_path::attach_error_path).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        ApiError::UserService(error)
    }
}

impl From<BlogServiceError> for ApiError {
    fn from(error: BlogServiceError) -> Self {
        ApiError::BlogService(error)
    }
}

impl From<GuardError> for ApiError {
    fn from(error: GuardError) -> Self {
        ApiError::Guard(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Guard(e @ GuardError::Unauthorized(_)) => {
                (StatusCode::UNAUTHORIZED, e.to_string())
            }
            ApiError::Guard(e @ GuardError::Forbidden) => (StatusCode::FORBIDDEN, e.to_string()),
            ApiError::InvalidApiKey => {
                (StatusCode::UNAUTHORIZED, "Error, Unauthorized!".to_string())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),

            ApiError::UserService(e @ UserServiceError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::UserService(e @ UserServiceError::UserAlreadyExists) => {
                (StatusCode::CONFLICT, e.to_string())
            }
            ApiError::UserService(e @ UserServiceError::UserNotFound) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            ApiError::UserService(e @ UserServiceError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, e.to_string())
            }
            ApiError::UserService(UserServiceError::Token(TokenError::InvalidToken)) => {
                (StatusCode::UNAUTHORIZED, "invalid token".to_string())
            }
            ApiError::UserService(UserServiceError::Token(TokenError::ExpiredToken)) => {
                (StatusCode::UNAUTHORIZED, "token expired".to_string())
            }
            ApiError::UserService(
                UserServiceError::Token(
                    TokenError::Configuration(_) | TokenError::Encoding(_) | TokenError::Decoding(_),
                )
                | UserServiceError::Password(_)
                | UserServiceError::Repository(_),
            ) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_SERVER_ERROR.to_string(),
            ),

            ApiError::BlogService(e @ BlogServiceError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::BlogService(
                e @ (BlogServiceError::BlogNotFound | BlogServiceError::AuthorNotFound),
            ) => (StatusCode::NOT_FOUND, e.to_string()),
            ApiError::BlogService(
                BlogServiceError::Repository(_) | BlogServiceError::UserRepository(_),
            )
            | ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_SERVER_ERROR.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Request failed: {:?}", self);
        }

        let body = ErrorBody {
            code: status.as_u16(),
            message,
            path: None,
        };
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Panic handler for `CatchPanicLayer`. Answers with the generic 500 body.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    };
    error!("Handler panicked: {}", detail);

    ApiError::Internal.into_response()
}
