pub mod api_key;
pub mod auth;
pub mod error_path;
pub mod role;
