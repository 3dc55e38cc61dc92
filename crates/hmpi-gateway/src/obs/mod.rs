//! Lightweight in-process metrics.
//!
//! Metrics are stored as atomics and rendered in Prometheus text format by
//! the `/metrics` handler.

pub mod metrics;

pub use metrics::ServiceMetrics;
