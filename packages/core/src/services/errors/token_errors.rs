use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("signing secret for {0} tokens is not configured")]
    Configuration(&'static str),
    #[error("failed to encode token: {0}")]
    Encoding(String),
    #[error("failed to decode token: {0}")]
    Decoding(String),
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    ExpiredToken,
}
