//! Shared infrastructure for the exercise catalog HTTP service.
//!
//! - [`AppState`]: the pre-loaded catalog plus service settings
//! - [`ServiceConfig`]: environment configuration
//! - [`auth`]: shared-secret authorization middleware
//! - [`pagination`]: `limit`/`offset` middleware building [`RequestContext`]
//! - [`ApiError`]: error responses with fixed JSON bodies
//! - [`health`]: `/ping` and orchestrator probes
//! - [`logging`], [`metrics`], [`middleware`]: observability
//!
//! # Architecture
//!
//! Handlers stay thin; catalog semantics live in `exercise-catalog-lib`:
//!
//! ```text
//! request ─▶ MetricsLayer ─▶ require_proxy_secret ─▶ attach_request_context ─▶ handler
//!                                  │ 401                    │ 400
//! ```
//!
//! # Testing Support
//!
//! Enable the `test-utils` feature to use [`test_utils`] from dependent crates.

#![deny(warnings)]

pub mod auth;
pub mod config;
mod error;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod pagination;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use auth::{require_proxy_secret, ProxySecret, PROXY_SECRET_HEADER};
pub use config::ServiceConfig;
pub use error::{ApiError, ErrorBody, MessageBody};
pub use health::{health_live, health_ready, ping, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_exercises_served, record_filter_criteria,
    record_lookup_miss, record_request_rejected, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use pagination::{attach_request_context, RequestContext};
pub use request::{FilterQuery, PageQuery, QueryPairs, Validate};
pub use state::{AppState, AppStateError, DEFAULT_SERVICE_NAME};
