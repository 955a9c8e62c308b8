//! Request-boundary gate.
//!
//! A request starts with no identity, becomes authenticated once its bearer
//! token verifies, and is admitted once its role passes the route's
//! allow-list. Nothing is remembered between requests.

use std::sync::Arc;

use tracing::debug;

use crate::models::auth::{IdentityClaim, Role};
use crate::services::errors::guard_errors::{
    GuardError, INVALID_TOKEN, NO_TOKEN_PROVIDED, TOKEN_EXPIRED,
};
use crate::services::errors::token_errors::TokenError;
use crate::services::token_verifier::TokenVerifier;

const BEARER_PREFIX: &str = "Bearer ";

pub struct AccessGuard {
    verifier: Arc<TokenVerifier>,
}

impl AccessGuard {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        AccessGuard { verifier }
    }

    /// Authentication stage, fed the raw `Authorization` header value.
    pub fn authenticate(&self, header: Option<&str>) -> Result<IdentityClaim, GuardError> {
        let header = match header.map(str::trim) {
            None | Some("") => return Err(GuardError::Unauthorized(NO_TOKEN_PROVIDED)),
            Some(value) => value,
        };

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(GuardError::Unauthorized(INVALID_TOKEN))?;

        self.verifier.verify_access(token).map_err(|e| match e {
            TokenError::ExpiredToken => GuardError::Unauthorized(TOKEN_EXPIRED),
            _ => GuardError::Unauthorized(INVALID_TOKEN),
        })
    }

    /// Authorization stage. An empty allow-list admits any authenticated claim.
    pub fn authorize(claim: &IdentityClaim, allowed: &[Role]) -> Result<(), GuardError> {
        if allowed.is_empty() || allowed.contains(&claim.role) {
            Ok(())
        } else {
            debug!(
                "Role {} of {} not in {:?}",
                claim.role, claim.subject_id, allowed
            );
            Err(GuardError::Forbidden)
        }
    }

    pub fn admit(
        &self,
        header: Option<&str>,
        allowed: &[Role],
    ) -> Result<IdentityClaim, GuardError> {
        let claim = self.authenticate(header)?;
        AccessGuard::authorize(&claim, allowed)?;
        Ok(claim)
    }
}
