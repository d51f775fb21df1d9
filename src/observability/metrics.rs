//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vanity_requests_total` (counter): requests by status code
//! - `vanity_request_duration_seconds` (histogram): handler latency
//! - `vanity_reloads_total` (counter): reloads by trigger and outcome
//! - `vanity_config_entries` (gauge): entries in the current mapping

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with an HTTP scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(status: u16, start_time: Instant) {
    counter!("vanity_requests_total", "status" => status.to_string()).increment(1);
    histogram!("vanity_request_duration_seconds").record(start_time.elapsed().as_secs_f64());
}

pub fn record_reload(trigger: &'static str, outcome: &'static str) {
    counter!("vanity_reloads_total", "trigger" => trigger, "outcome" => outcome).increment(1);
}

pub fn record_config_entries(entries: usize) {
    gauge!("vanity_config_entries").set(entries as f64);
}
