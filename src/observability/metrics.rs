//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mux_requests_total` (counter): requests by method, status
//! - `mux_request_duration_seconds` (histogram): time spent in handlers
//! - `mux_handler_panics_total` (counter): handler faults recovered
//!
//! # Design Decisions
//! - Recording is always on; without an installed recorder it is a no-op
//! - The Prometheus exporter runs only when enabled in configuration

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "mux_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("mux_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a handler panic recovered by the transport.
pub fn record_handler_panic() {
    ::metrics::counter!("mux_handler_panics_total").increment(1);
}
