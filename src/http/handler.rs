//! The handler capability.
//!
//! # Responsibilities
//! - Define the single operation every routable value provides
//! - Adapt plain functions and closures into handlers (`HandlerFn`)
//! - Let shared and boxed handlers be registered without wrapper types
//!
//! # Design Decisions
//! - One trait, one method: no naming convention is imposed on handler types
//! - Handlers are synchronous; the transport owns blocking I/O and concurrency
//! - `Send + Sync` so a frozen registry can be shared across request tasks

use std::fmt;
use std::sync::Arc;

use crate::http::request::RequestDescriptor;
use crate::http::response::ResponseSink;

/// Produces a response for a request.
///
/// Any type can be a handler: a struct, a store, a nested dispatcher, or a
/// closure wrapped in [`HandlerFn`].
pub trait Handler: Send + Sync {
    /// Write the response for `request` into `response`.
    fn handle(&self, request: &RequestDescriptor, response: &mut dyn ResponseSink);
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn handle(&self, request: &RequestDescriptor, response: &mut dyn ResponseSink) {
        (**self).handle(request, response)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&self, request: &RequestDescriptor, response: &mut dyn ResponseSink) {
        (**self).handle(request, response)
    }
}

/// Adapter that turns an ordinary function or closure into a [`Handler`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F>
where
    F: Fn(&RequestDescriptor, &mut dyn ResponseSink) + Send + Sync,
{
    /// Wrap `f` so it can be registered as a handler.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&RequestDescriptor, &mut dyn ResponseSink) + Send + Sync,
{
    fn handle(&self, request: &RequestDescriptor, response: &mut dyn ResponseSink) {
        (self.f)(request, response)
    }
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::BufferedResponse;
    use axum::http::StatusCode;

    struct Greeting(&'static str);

    impl Handler for Greeting {
        fn handle(&self, _request: &RequestDescriptor, response: &mut dyn ResponseSink) {
            response.write_body(self.0.as_bytes());
        }
    }

    #[test]
    fn closure_is_a_handler() {
        let handler = HandlerFn::new(|req: &RequestDescriptor, res: &mut dyn ResponseSink| {
            res.write_status(StatusCode::ACCEPTED);
            res.write_body(req.path().as_bytes());
        });

        let mut res = BufferedResponse::new();
        handler.handle(&RequestDescriptor::get("/echo"), &mut res);

        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(res.body(), b"/echo");
    }

    #[test]
    fn shared_and_boxed_handlers_delegate() {
        let shared: Arc<dyn Handler> = Arc::new(Greeting("shared"));
        let boxed: Box<dyn Handler> = Box::new(Greeting("boxed"));

        let mut res = BufferedResponse::new();
        shared.handle(&RequestDescriptor::get("/"), &mut res);
        boxed.handle(&RequestDescriptor::get("/"), &mut res);

        assert_eq!(res.body(), b"sharedboxed");
    }
}
