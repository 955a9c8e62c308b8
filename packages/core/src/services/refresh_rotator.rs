use std::sync::Arc;

use tracing::debug;

use crate::services::errors::token_errors::TokenError;
use crate::services::token_issuer::TokenIssuer;
use crate::services::token_verifier::TokenVerifier;

/// Trades a refresh token for a new access token.
///
/// The refresh token itself is not replaced and stays usable until its own
/// expiry; there is no store to revoke it from.
pub struct RefreshRotator {
    verifier: Arc<TokenVerifier>,
    issuer: Arc<TokenIssuer>,
}

impl RefreshRotator {
    pub fn new(verifier: Arc<TokenVerifier>, issuer: Arc<TokenIssuer>) -> Self {
        RefreshRotator { verifier, issuer }
    }

    pub fn rotate(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claim = self.verifier.verify_refresh(refresh_token)?;
        debug!("Rotating access token for {}", claim.subject_id);
        self.issuer.issue_access(&claim)
    }
}
