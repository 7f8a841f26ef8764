//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! reply layer, server, config loading
//!     → logging.rs (structured tracing events, subscriber setup)
//!     → metrics.rs (reply counters, optional Prometheus exporter)
//! ```
//!
//! # Design Decisions
//! - Library code only emits; binaries install subscribers and recorders
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
