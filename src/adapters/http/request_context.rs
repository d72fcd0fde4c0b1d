//! Builds `CommandMetadata` from an incoming request.
//!
//! The correlation id is the `x-request-id` set by the request-id layer.

use axum::http::HeaderMap;

use crate::domain::foundation::{AuthenticatedUser, CommandMetadata};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn user_metadata(user: &AuthenticatedUser, headers: &HeaderMap) -> CommandMetadata {
    let metadata = CommandMetadata::new(user.id).with_source("api");
    match request_id(headers) {
        Some(id) => metadata.with_correlation_id(id),
        None => metadata,
    }
}

pub fn service_metadata(headers: &HeaderMap) -> CommandMetadata {
    let metadata = CommandMetadata::service();
    match request_id(headers) {
        Some(id) => metadata.with_correlation_id(id),
        None => metadata,
    }
}
