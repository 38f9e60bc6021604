//! Response sink written by handlers.
//!
//! # Responsibilities
//! - Define the write-only channel handlers produce output through
//! - Buffer status and body until the transport flushes them
//! - Convert the buffered result into an axum response
//!
//! # Design Decisions
//! - Status is written at most once; later writes are ignored
//! - Writing body bytes without a status commits `200 OK`
//! - Body writes append in call order

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Write-only, append-only output channel for a handler.
pub trait ResponseSink {
    /// Set the response status. Only the first call has any effect.
    fn write_status(&mut self, status: StatusCode);

    /// Append bytes to the response body.
    fn write_body(&mut self, bytes: &[u8]);
}

/// In-memory [`ResponseSink`] flushed to the client after the handler returns.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective status: the committed one, or `200 OK`.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Lossy UTF-8 view of the body, for logging and tests.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl ResponseSink for BufferedResponse {
    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            None => self.status = Some(status),
            Some(committed) => {
                tracing::debug!(
                    committed = %committed,
                    ignored = %status,
                    "Superfluous status write ignored"
                );
            }
        }
    }

    fn write_body(&mut self, bytes: &[u8]) {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(bytes);
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}
