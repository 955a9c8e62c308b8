use axum::{http::StatusCode, Json};
use blog_core::models::pagination::MetaPagination;
use serde::{Deserialize, Serialize};

/// Envelope every response body is wrapped in.
#[derive(Debug, Deserialize, Serialize)]
pub struct ResponseEntity<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaPagination>,
}

pub type Envelope<T> = (StatusCode, Json<ResponseEntity<T>>);

pub fn success<T>(status: StatusCode, message: &str, data: T) -> Envelope<T> {
    envelope(status, message, Some(data), None)
}

pub fn success_paginated<T>(
    status: StatusCode,
    message: &str,
    data: T,
    meta: MetaPagination,
) -> Envelope<T> {
    envelope(status, message, Some(data), Some(meta))
}

pub fn empty(status: StatusCode, message: &str) -> Envelope<()> {
    envelope(status, message, None, None)
}

fn envelope<T>(
    status: StatusCode,
    message: &str,
    data: Option<T>,
    meta: Option<MetaPagination>,
) -> Envelope<T> {
    (
        status,
        Json(ResponseEntity {
            code: status.as_u16(),
            message: message.to_string(),
            data,
            meta,
        }),
    )
}
