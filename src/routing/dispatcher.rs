//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Own the handler registry and expose registration
//! - Look up the binding for a request path
//! - Delegate to the matched handler, or answer 404 naming the path
//!
//! # Design Decisions
//! - The dispatcher is itself a `Handler`, so dispatchers nest
//! - Nested dispatchers see the full, unstripped path
//! - Explicit not-found response rather than a silent drop

use std::sync::Arc;

use axum::http::StatusCode;

use crate::http::handler::{Handler, HandlerFn};
use crate::http::request::RequestDescriptor;
use crate::http::response::ResponseSink;
use crate::routing::registry::{Binding, HandlerRegistry, RegistrationError};

/// A handler that routes each request to one registered handler.
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: HandlerRegistry,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register any [`Handler`] under `pattern`.
    pub fn register<H>(&mut self, pattern: &str, handler: H) -> Result<(), RegistrationError>
    where
        H: Handler + 'static,
    {
        self.register_shared(pattern, Arc::new(handler))
    }

    /// Register an already shared handler under `pattern`.
    pub fn register_shared(
        &mut self,
        pattern: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<(), RegistrationError> {
        self.registry.register(pattern, handler)?;
        tracing::debug!(pattern = %pattern, "Handler registered");
        Ok(())
    }

    /// Register a plain function or closure under `pattern`.
    pub fn register_fn<F>(&mut self, pattern: &str, f: F) -> Result<(), RegistrationError>
    where
        F: Fn(&RequestDescriptor, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.register(pattern, HandlerFn::new(f))
    }

    /// Find the binding serving `path`; `None` means not found.
    pub fn route(&self, path: &str) -> Option<&Binding> {
        self.registry.route(path)
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }
}

impl Handler for Dispatcher {
    fn handle(&self, request: &RequestDescriptor, response: &mut dyn ResponseSink) {
        let path = request.path();

        match self.route(path) {
            Some(binding) => {
                tracing::debug!(
                    request_id = %request.request_id(),
                    path = %path,
                    pattern = %binding.pattern(),
                    "Dispatching request"
                );
                binding.handler().handle(request, response);
            }
            None => {
                tracing::warn!(
                    request_id = %request.request_id(),
                    path = %path,
                    "No handler matched"
                );
                response.write_status(StatusCode::NOT_FOUND);
                response.write_body(format!("no handler registered for: {}\n", path).as_bytes());
            }
        }
    }
}
