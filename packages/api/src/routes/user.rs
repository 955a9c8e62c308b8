use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use blog_core::models::auth::requests::{
    LoginRequest, RefreshTokenRequest, RegisterRequest, UserUpdateRequest,
};
use blog_core::models::auth::responses::{RefreshTokenResponse, TokenPair};
use blog_core::models::pagination::PaginationRequest;
use blog_core::models::user::UserResponse;
use lambda_http::tracing::{debug, error};

use crate::{
    error::ApiError,
    middleware::{
        auth::{authenticate, AuthenticatedUser},
        role::{require_roles, ADMIN_ONLY, MEMBERS},
    },
    response::{empty, success, success_paginated, Envelope},
    state::AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", put(refresh_token));

    let protected = Router::new()
        .route(
            "/",
            get(find_all).route_layer(middleware::from_fn_with_state(MEMBERS, require_roles)),
        )
        .route(
            "/paginate",
            get(find_all_paginated)
                .route_layer(middleware::from_fn_with_state(MEMBERS, require_roles)),
        )
        .route(
            "/{id}",
            get(find_by_id).put(update_by_id).merge(
                delete(delete_by_id)
                    .route_layer(middleware::from_fn_with_state(ADMIN_ONLY, require_roles)),
            ),
        )
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new().nest("/user", public.merge(protected))
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Envelope<UserResponse>, ApiError> {
    let Json(payload) = payload?;
    let email = payload.email.clone();
    let user = state.user_service.register(payload).await.map_err(|e| {
        error!("Failed to register user {}: {}", email, e);
        ApiError::from(e)
    })?;
    debug!("User registered successfully: {}", user.id);
    Ok(success(StatusCode::CREATED, "Success Register User", user))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Envelope<TokenPair>, ApiError> {
    let Json(payload) = payload?;
    let email = payload.email.clone();
    let tokens = state.user_service.login(payload).await.map_err(|e| {
        error!("Failed to authenticate user {}: {}", email, e);
        ApiError::from(e)
    })?;
    Ok(success(StatusCode::OK, "Success Login User", tokens))
}

async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<Envelope<RefreshTokenResponse>, ApiError> {
    let Json(payload) = payload?;
    let response = state.user_service.refresh(&payload).map_err(|e| {
        error!("Failed to refresh token: {}", e);
        ApiError::from(e)
    })?;
    Ok(success(StatusCode::OK, "Success Refresh Token", response))
}

async fn find_all(State(state): State<AppState>) -> Result<Envelope<Vec<UserResponse>>, ApiError> {
    let users = state.user_service.find_all().await.map_err(|e| {
        error!("Failed to list users: {}", e);
        ApiError::from(e)
    })?;
    Ok(success(StatusCode::OK, "Success Find All Users", users))
}

async fn find_all_paginated(
    State(state): State<AppState>,
    params: Result<Query<PaginationRequest>, QueryRejection>,
) -> Result<Envelope<Vec<UserResponse>>, ApiError> {
    let Query(params) = params?;
    let (meta, users) = state
        .user_service
        .find_all_paginated(&params)
        .await
        .map_err(|e| {
            error!("Failed to paginate users: {}", e);
            ApiError::from(e)
        })?;
    Ok(success_paginated(
        StatusCode::OK,
        "Success Find All User Paginate",
        users,
        meta,
    ))
}

async fn find_by_id(
    State(state): State<AppState>,
    AuthenticatedUser(claim): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Envelope<UserResponse>, ApiError> {
    debug!("User {} looking up {}", claim.subject_id, id);
    let user = state.user_service.find_by_id(&id).await?;
    Ok(success(StatusCode::OK, "Success Find User By Id", user))
}

async fn update_by_id(
    State(state): State<AppState>,
    AuthenticatedUser(claim): AuthenticatedUser,
    Path(id): Path<String>,
    payload: Result<Json<UserUpdateRequest>, JsonRejection>,
) -> Result<Envelope<UserResponse>, ApiError> {
    let Json(payload) = payload?;
    let user = state
        .user_service
        .update_by_id(&id, payload)
        .await
        .map_err(|e| {
            error!("User {} failed to update {}: {}", claim.subject_id, id, e);
            ApiError::from(e)
        })?;
    Ok(success(StatusCode::OK, "Success Update User By Id", user))
}

async fn delete_by_id(
    State(state): State<AppState>,
    AuthenticatedUser(claim): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Envelope<()>, ApiError> {
    state.user_service.delete_by_id(&id).await.map_err(|e| {
        error!("Admin {} failed to delete {}: {}", claim.subject_id, id, e);
        ApiError::from(e)
    })?;
    debug!("User deleted successfully: {}", id);
    Ok(empty(StatusCode::OK, "Success Delete User By Id"))
}
