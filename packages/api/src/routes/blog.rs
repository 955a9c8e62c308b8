use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use blog_core::models::blog::{BlogResponse, CreateBlogRequest};
use blog_core::models::pagination::PaginationRequest;
use lambda_http::tracing::{debug, error};

use crate::{
    error::ApiError,
    middleware::auth::{authenticate, AuthenticatedUser},
    response::{success, success_paginated, Envelope},
    state::AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let blog = Router::new()
        .route(
            "/",
            post(create_blog).route_layer(middleware::from_fn_with_state(state, authenticate)),
        )
        .route("/paginate", get(find_all_paginated))
        .route("/{id}", get(find_by_id));

    Router::new().nest("/blog", blog)
}

async fn create_blog(
    State(state): State<AppState>,
    AuthenticatedUser(claim): AuthenticatedUser,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<Envelope<BlogResponse>, ApiError> {
    let Json(payload) = payload?;
    let blog = state
        .blog_service
        .create(payload, &claim)
        .await
        .map_err(|e| {
            error!("User {} failed to create blog: {}", claim.subject_id, e);
            ApiError::from(e)
        })?;
    debug!("Blog created successfully: {}", blog.id);
    Ok(success(StatusCode::CREATED, "Success Create Blog", blog))
}

async fn find_all_paginated(
    State(state): State<AppState>,
    params: Result<Query<PaginationRequest>, QueryRejection>,
) -> Result<Envelope<Vec<BlogResponse>>, ApiError> {
    let Query(params) = params?;
    let (meta, blogs) = state
        .blog_service
        .find_all_paginated(&params)
        .await
        .map_err(|e| {
            error!("Failed to paginate blogs: {}", e);
            ApiError::from(e)
        })?;
    Ok(success_paginated(
        StatusCode::OK,
        "Success Find All Blogs Paginate",
        blogs,
        meta,
    ))
}

async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<BlogResponse>, ApiError> {
    let blog = state.blog_service.find_by_id(&id).await?;
    let message = format!("Success Get blog {}", blog.title);
    Ok(success(StatusCode::OK, &message, blog))
}
