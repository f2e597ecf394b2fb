//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_relay_requests_total` (counter): relayed requests by method, status
//! - `gateway_relay_duration_seconds` (histogram): relay latency
//! - `gateway_relay_failures_total` (counter): relay failures by kind
//! - `gateway_notifications_total` (counter): push deliveries by kind (displayed, malformed, failed)
//! - `gateway_clicks_total` (counter): click events by outcome
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_relay(method: &str, status: u16, start_time: Instant) {
    counter!(
        "gateway_relay_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_relay_duration_seconds").record(start_time.elapsed().as_secs_f64());
}

pub fn record_relay_failure(kind: &'static str) {
    counter!("gateway_relay_failures_total", "kind" => kind).increment(1);
}

pub fn record_notification(kind: &'static str) {
    counter!("gateway_notifications_total", "kind" => kind).increment(1);
}

pub fn record_click(outcome: &'static str) {
    counter!("gateway_clicks_total", "outcome" => outcome).increment(1);
}
