//! Exercise catalog HTTP service.
//!
//! [`build_router`] assembles the full application: the catalog endpoints
//! behind shared-secret authorization and pagination, plus unauthenticated
//! probes and the Prometheus scrape endpoint.

#![deny(warnings)]

pub mod handlers;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use exercise_catalog_service_shared::{
    attach_request_context, health_live, health_ready, metrics_handler, ping,
    require_proxy_secret, AppState, MetricsLayer,
};

/// Build the application router over a loaded catalog.
///
/// Catalog routes run the authorization check first, so an unauthorized
/// request is rejected with 401 before its pagination parameters are looked
/// at. `/health/*` and `/metrics` bypass both.
pub fn build_router(state: AppState) -> Router {
    let state = state.with_service(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let catalog_routes = Router::new()
        .route("/images/{name}", get(handlers::image))
        .route("/ping", get(ping))
        .route("/", get(handlers::list_exercises))
        .route("/exercise/{id}", get(handlers::exercise_by_id))
        .route("/filter", get(handlers::filtered_exercises))
        .route("/body_parts", get(handlers::body_parts))
        .route("/exercise_types", get(handlers::exercise_types))
        .route("/muscle_groups", get(handlers::muscle_groups))
        .route(
            "/exercises_by_body_parts",
            get(handlers::exercises_by_body_parts),
        )
        // The secret check wraps pagination, so it runs first.
        .route_layer(from_fn_with_state(state.clone(), attach_request_context))
        .route_layer(from_fn_with_state(
            state.proxy_secret().clone(),
            require_proxy_secret,
        ));

    let ops_routes = Router::new()
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .route("/metrics", get(metrics_handler));

    catalog_routes
        .merge(ops_routes)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}
