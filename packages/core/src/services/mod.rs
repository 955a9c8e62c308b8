pub mod access_guard;
pub mod blog_service;
pub mod clock;
pub mod errors;
pub mod password;
pub mod refresh_rotator;
pub mod token_codec;
pub mod token_issuer;
pub mod token_verifier;
pub mod user_service;
