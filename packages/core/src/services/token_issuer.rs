use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use crate::config::AuthConfig;
use crate::models::auth::responses::TokenPair;
use crate::models::auth::IdentityClaim;
use crate::services::clock::Clock;
use crate::services::errors::token_errors::TokenError;
use crate::services::token_codec::encode_token;

pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

pub fn access_token_ttl() -> Duration {
    Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)
}

pub fn refresh_token_ttl() -> Duration {
    Duration::days(REFRESH_TOKEN_TTL_DAYS)
}

/// Mints access and refresh tokens, each under its own secret.
pub struct TokenIssuer {
    config: AuthConfig,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        TokenIssuer { config, clock }
    }

    pub fn issue_access(&self, claim: &IdentityClaim) -> Result<String, TokenError> {
        if self.config.access_secret.is_empty() {
            return Err(TokenError::Configuration("access"));
        }
        let token = encode_token(
            claim,
            &self.config.access_secret,
            access_token_ttl(),
            self.clock.now(),
        )?;
        debug!("Issued access token for {}", claim.subject_id);
        Ok(token)
    }

    pub fn issue_refresh(&self, claim: &IdentityClaim) -> Result<String, TokenError> {
        if self.config.refresh_secret.is_empty() {
            return Err(TokenError::Configuration("refresh"));
        }
        let token = encode_token(
            claim,
            &self.config.refresh_secret,
            refresh_token_ttl(),
            self.clock.now(),
        )?;
        debug!("Issued refresh token for {}", claim.subject_id);
        Ok(token)
    }

    pub fn issue_pair(&self, claim: &IdentityClaim) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(claim)?,
            refresh_token: self.issue_refresh(claim)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;
    use crate::services::clock::FixedClock;
    use crate::services::token_codec::decode_token;
    use chrono::DateTime;

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ))
    }

    fn issuer(access: &str, refresh: &str) -> TokenIssuer {
        TokenIssuer::new(
            AuthConfig {
                access_secret: access.to_string(),
                refresh_secret: refresh.to_string(),
            },
            fixed_clock(),
        )
    }

    #[test]
    fn test_access_token_expires_in_fifteen_minutes() {
        let claim = IdentityClaim::new("user-1", Role::User);
        let token = issuer("access", "refresh").issue_access(&claim).unwrap();

        let claims = decode_token(&token, "access").unwrap();
        assert_eq!(claims.identity(), claim);
        assert_eq!(claims.exp, 1_700_000_000 + 15 * 60);
    }

    #[test]
    fn test_refresh_token_expires_in_seven_days() {
        let claim = IdentityClaim::new("user-1", Role::Admin);
        let token = issuer("access", "refresh").issue_refresh(&claim).unwrap();

        let claims = decode_token(&token, "refresh").unwrap();
        assert_eq!(claims.identity(), claim);
        assert_eq!(claims.exp, 1_700_000_000 + 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_pair_is_signed_with_distinct_secrets() {
        let claim = IdentityClaim::new("user-1", Role::User);
        let pair = issuer("access", "refresh").issue_pair(&claim).unwrap();

        assert!(decode_token(&pair.access_token, "access").is_ok());
        assert!(decode_token(&pair.access_token, "refresh").is_err());
        assert!(decode_token(&pair.refresh_token, "refresh").is_ok());
        assert!(decode_token(&pair.refresh_token, "access").is_err());
    }

    #[test]
    fn test_missing_secret_is_a_configuration_error() {
        let claim = IdentityClaim::new("user-1", Role::User);

        assert_eq!(
            issuer("", "refresh").issue_access(&claim),
            Err(TokenError::Configuration("access"))
        );
        assert_eq!(
            issuer("access", "").issue_refresh(&claim),
            Err(TokenError::Configuration("refresh"))
        );
        assert!(issuer("access", "").issue_pair(&claim).is_err());
    }
}
