//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, panic isolation)
//!     → request.rs (RequestDescriptor: method, path, headers)
//!     → handler.rs (root Handler, normally a routing::Dispatcher)
//!     → response.rs (BufferedResponse: status once, body appended)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{Handler, HandlerFn};
pub use request::{RequestDescriptor, X_REQUEST_ID};
pub use response::{BufferedResponse, ResponseSink};
pub use server::{serve_request, HttpServer};
