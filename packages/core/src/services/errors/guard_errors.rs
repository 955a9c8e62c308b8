use thiserror::Error;

pub const NO_TOKEN_PROVIDED: &str = "no token provided";
pub const INVALID_TOKEN: &str = "invalid token";
pub const TOKEN_EXPIRED: &str = "token expired";

/// Rejections raised at the request boundary. Reasons are fixed strings so
/// nothing from the underlying parse error reaches the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("Unauthorized, {0}")]
    Unauthorized(&'static str),
    #[error("Forbidden Access, you don't have permission")]
    Forbidden,
}
