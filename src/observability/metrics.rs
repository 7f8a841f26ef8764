//! Metrics collection and exposition.
//!
//! # Metrics
//! - `replies_encoded_total` (counter): replies written, by payload kind
//! - `reply_dispatch_failures_total` (counter): aborted replies, by reason

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint and install it as the global recorder.
pub fn init_exporter(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_reply(kind: &'static str) {
    metrics::counter!("replies_encoded_total", "kind" => kind).increment(1);
}

pub fn record_failure(reason: &'static str) {
    metrics::counter!("reply_dispatch_failures_total", "reason" => reason).increment(1);
}
