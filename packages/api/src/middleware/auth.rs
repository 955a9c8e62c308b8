use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use blog_core::models::auth::IdentityClaim;
use blog_core::services::errors::guard_errors::{GuardError, INVALID_TOKEN, NO_TOKEN_PROVIDED};

use crate::{error::ApiError, state::AppState};

/// Authentication stage. Verifies the bearer token and stores the claim in
/// the request extensions for the role guard and handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| GuardError::Unauthorized(INVALID_TOKEN))?,
        ),
        None => None,
    };

    let claim = state.access_guard.authenticate(header)?;
    request.extensions_mut().insert(claim);

    Ok(next.run(request).await)
}

/// Claim attached by [`authenticate`]. Only usable on routes behind it.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub IdentityClaim);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityClaim>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(ApiError::Guard(GuardError::Unauthorized(NO_TOKEN_PROVIDED)))
    }
}
