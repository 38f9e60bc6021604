//! Path-based HTTP request dispatcher with an in-memory price store.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::ServerConfig;
pub use http::{Handler, HandlerFn, HttpServer, RequestDescriptor, ResponseSink};
pub use lifecycle::Shutdown;
pub use routing::{Dispatcher, RegistrationError};
pub use store::{Price, PriceStore};
