use axum::http::StatusCode;

use crate::response::{empty, Envelope};

/// Health check endpoint to verify API status
pub async fn health_check() -> (StatusCode, String) {
    (StatusCode::OK, "Healthy!".to_string())
}

pub async fn root() -> Envelope<()> {
    empty(StatusCode::OK, "Hello from the blog API")
}
