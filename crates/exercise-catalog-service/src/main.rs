//! Exercise catalog HTTP microservice.
//!
//! Serves a read-only catalog of exercises loaded once at startup from a JSON
//! file. Every catalog endpoint requires the `X-RapidAPI-Proxy-Secret` header.
//!
//! # Endpoints
//!
//! - `GET /` - Paginated catalog
//! - `GET /exercise/{id}` - Single exercise by id
//! - `GET /filter` - Paginated attribute filter
//! - `GET /body_parts`, `/exercise_types`, `/muscle_groups` - Distinct facet values
//! - `GET /exercises_by_body_parts` - Catalog grouped by body part
//! - `GET /images/{name}` - Exercise image `<name>.png`
//! - `GET /ping` - Authenticated liveness check
//! - `GET /metrics`, `/health/live`, `/health/ready` - Unauthenticated ops endpoints
//!
//! # Configuration
//!
//! - `EXERCISES_PATH` - Catalog file (default: exercises.json)
//! - `PORT` - HTTP port (default: 8080)
//! - `X_RAPIDAPI_PROXY_SECRET` - Shared secret; when unset every catalog request is rejected
//! - `ASSETS_DIR` - Image directory (default: assets)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Install the Prometheus recorder (default: true)

use std::net::SocketAddr;

use tracing::{error, info, warn};

use exercise_catalog_service::build_router;
use exercise_catalog_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, MetricsError,
    ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service(env!("CARGO_PKG_NAME"));
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    match init_metrics(&metrics_config) {
        Ok(()) => {}
        Err(MetricsError::Disabled) => info!("metrics disabled by METRICS_ENABLED"),
        Err(e) => warn!(error = %e, "failed to initialize metrics, continuing without metrics"),
    }

    let config = ServiceConfig::from_env();
    info!(
        catalog_path = %config.catalog_path.display(),
        assets_dir = %config.assets_dir.display(),
        port = config.port,
        "starting exercise catalog service"
    );

    if !config.proxy_secret.is_configured() {
        warn!("X_RAPIDAPI_PROXY_SECRET is not set; all catalog requests will be rejected");
    }

    let state = AppState::from_config(&config).map_err(|e| {
        error!(error = %e, path = %config.catalog_path.display(), "failed to load exercise catalog");
        e
    })?;

    info!(
        exercises = state.catalog().len(),
        loaded_at = %state.loaded_at(),
        "exercise catalog loaded"
    );

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
