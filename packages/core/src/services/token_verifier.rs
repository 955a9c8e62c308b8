use std::sync::Arc;

use tracing::debug;

use crate::config::AuthConfig;
use crate::models::auth::IdentityClaim;
use crate::services::clock::Clock;
use crate::services::errors::token_errors::TokenError;
use crate::services::token_codec::decode_token;

/// Validates presented tokens against one of the two secrets.
///
/// Structure, algorithm, signature and claim shape failures all come back
/// as [`TokenError::InvalidToken`]. Only a correctly signed token past its
/// `exp` yields [`TokenError::ExpiredToken`].
pub struct TokenVerifier {
    config: AuthConfig,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    pub fn new(config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        TokenVerifier { config, clock }
    }

    pub fn verify(&self, token: &str, secret: &str) -> Result<IdentityClaim, TokenError> {
        let claims = decode_token(token, secret).map_err(|e| {
            debug!("Rejected token: {}", e);
            TokenError::InvalidToken
        })?;

        if claims.exp <= self.clock.now().timestamp() {
            debug!("Rejected expired token for {}", claims.id);
            return Err(TokenError::ExpiredToken);
        }

        Ok(claims.identity())
    }

    pub fn verify_access(&self, token: &str) -> Result<IdentityClaim, TokenError> {
        self.verify(token, &self.config.access_secret)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<IdentityClaim, TokenError> {
        self.verify(token, &self.config.refresh_secret)
    }
}
