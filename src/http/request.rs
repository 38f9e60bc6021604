//! Read-only request view handed to handlers.
//!
//! # Responsibilities
//! - Carry method, path and headers of an inbound request
//! - Extract the request ID assigned by the middleware stack
//!
//! # Design Decisions
//! - Fields are private; handlers can read but never mutate the request
//! - The path excludes the query string, matching what routing sees
//! - Bodies are not exposed; no handler in this server consumes one

use axum::http::{request::Parts, HeaderMap, Method};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Immutable description of an inbound request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    headers: HeaderMap,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            path: path.into(),
            headers,
        }
    }

    /// A header-less GET request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, HeaderMap::new())
    }

    /// Build a descriptor from decoded HTTP request parts.
    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(
            parts.method.clone(),
            parts.uri.path(),
            parts.headers.clone(),
        )
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request ID, or `"unknown"` when none was assigned.
    pub fn request_id(&self) -> &str {
        self.headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}
