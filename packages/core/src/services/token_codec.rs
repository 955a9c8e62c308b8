//! Compact JWS encoding of [`TokenClaims`].
//!
//! Tokens are signed with HS256. Decoding accepts the HMAC family only and
//! leaves the expiry check to the verifier so it can run against any clock.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::models::auth::{IdentityClaim, TokenClaims};
use crate::services::errors::token_errors::TokenError;

pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

pub fn encode_token(
    claim: &IdentityClaim,
    secret: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Encoding("signing secret is empty".to_string()));
    }

    let claims = TokenClaims {
        id: claim.subject_id.clone(),
        role: claim.role,
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(SIGNING_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Checks structure, algorithm and signature, then parses the payload.
/// Does not look at `exp`.
pub fn decode_token(token: &str, secret: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(SIGNING_ALGORITHM);
    validation.algorithms = HMAC_FAMILY.to_vec();
    validation.validate_exp = false;
    validation.leeway = 0;

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| TokenError::Decoding(describe(e.kind()).to_string()))
}

fn describe(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidSignature => "signature mismatch",
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            "unexpected signing algorithm"
        }
        ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
            "claims do not match the expected shape"
        }
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Utf8(_) => "malformed token",
        _ => "undecodable token",
    }
}
