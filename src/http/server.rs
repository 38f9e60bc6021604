//! HTTP server setup and the transport adapter.
//!
//! # Responsibilities
//! - Create the Axum router that feeds every request to one handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Reduce each request to a `RequestDescriptor` and buffer the response
//! - Recover handler panics per request and answer 500
//! - Serve until the shutdown signal, then drain

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handler::Handler;
use crate::http::request::RequestDescriptor;
use crate::http::response::{BufferedResponse, ResponseSink};
use crate::lifecycle::shutdown;
use crate::observability::metrics;

/// Body sent when a handler panics.
pub const INTERNAL_ERROR_BODY: &str = "internal server error\n";

/// Application state injected into the fallback service.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<dyn Handler>,
}

/// HTTP server driving a single root handler, normally a `Dispatcher`.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving every request through `handler`.
    pub fn new<H>(config: ServerConfig, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        let state = AppState {
            handler: Arc::new(handler),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Fallback service: every request, whatever its path, lands here.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (parts, _body) = request.into_parts();
    let descriptor = RequestDescriptor::from_parts(&parts);

    let response = serve_request(state.handler.as_ref(), &descriptor);

    metrics::record_request(
        descriptor.method().as_str(),
        response.status().as_u16(),
        start,
    );
    response.into_response()
}

/// Run `handler` for one request, isolating it from panics.
///
/// A panicking handler's partial output is discarded and replaced with a
/// `500 Internal Server Error`.
pub fn serve_request(handler: &dyn Handler, request: &RequestDescriptor) -> BufferedResponse {
    let mut sink = BufferedResponse::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(request, &mut sink)));

    match outcome {
        Ok(()) => sink,
        Err(payload) => {
            tracing::error!(
                request_id = %request.request_id(),
                path = %request.path(),
                panic = %panic_message(&*payload),
                "Handler panicked"
            );
            metrics::record_handler_panic();

            let mut failed = BufferedResponse::new();
            failed.write_status(StatusCode::INTERNAL_SERVER_ERROR);
            failed.write_body(INTERNAL_ERROR_BODY.as_bytes());
            failed
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
