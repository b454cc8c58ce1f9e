//! Prometheus metrics for the exercise catalog service.
//!
//! - [`MetricsConfig`] / [`init_metrics`]: install the Prometheus recorder
//! - [`metrics_handler`]: render the exposition text for `GET /metrics`
//! - business helpers recording what the catalog endpoints serve and reject
//!
//! Recording before [`init_metrics`] is a no-op, so the helpers are safe to
//! call from tests.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED`: anything but "false" enables metrics (default: true).
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Self { enabled }
    }
}

/// Install the Prometheus metrics recorder. Call once at startup.
///
/// # Errors
///
/// Fails if metrics are disabled, already initialized, or the recorder
/// cannot be installed.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Axum handler for `GET /metrics`.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Count exercises returned by a catalog endpoint.
///
/// Increments `exercise_api_exercises_served_total{endpoint}` by `count`.
pub fn record_exercises_served(endpoint: &'static str, count: usize) {
    metrics::counter!(
        "exercise_api_exercises_served_total",
        "endpoint" => endpoint
    )
    .increment(count as u64);
}

/// Record how many criteria a `/filter` request supplied.
pub fn record_filter_criteria(count: usize) {
    metrics::histogram!("exercise_api_filter_criteria").record(count as f64);
}

/// Count a request stopped by middleware (`unauthorized`, `invalid_pagination`).
pub fn record_request_rejected(reason: &'static str) {
    metrics::counter!(
        "exercise_api_requests_rejected_total",
        "reason" => reason
    )
    .increment(1);
}

/// Count an id lookup that found nothing.
pub fn record_lookup_miss() {
    metrics::counter!("exercise_api_lookup_misses_total").increment(1);
}
