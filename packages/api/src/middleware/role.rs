use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use blog_core::models::auth::{IdentityClaim, Role};
use blog_core::services::access_guard::AccessGuard;
use blog_core::services::errors::guard_errors::{GuardError, NO_TOKEN_PROVIDED};

use crate::error::ApiError;

/// Roles a route admits. Used as middleware state.
#[derive(Debug, Clone, Copy)]
pub struct AllowedRoles(pub &'static [Role]);

pub const ADMIN_ONLY: AllowedRoles = AllowedRoles(&[Role::Admin]);
pub const MEMBERS: AllowedRoles = AllowedRoles(&[Role::User, Role::Admin]);

/// Authorization stage. Must sit inside the authentication layer.
pub async fn require_roles(
    State(AllowedRoles(allowed)): State<AllowedRoles>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claim = request
        .extensions()
        .get::<IdentityClaim>()
        .ok_or(GuardError::Unauthorized(NO_TOKEN_PROVIDED))?;
    AccessGuard::authorize(claim, allowed)?;

    Ok(next.run(request).await)
}
