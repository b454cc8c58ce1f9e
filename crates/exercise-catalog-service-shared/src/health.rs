//! Liveness and readiness handlers.
//!
//! `GET /ping` is the catalog API's own liveness check and sits behind the
//! authorization middleware like every other catalog route. `/health/live`
//! and `/health/ready` are unauthenticated probes for orchestrators.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Fixed payload returned by `GET /ping`.
pub const PING_PAYLOAD: &str = "success";

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of exercises in the catalog (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises_loaded: Option<usize>,

    /// When the catalog was loaded (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            exercises_loaded: None,
            loaded_at: None,
        }
    }

    /// Create a ready status with catalog information.
    pub fn ready(service: &str, version: &str, exercises: usize, loaded_at: DateTime<Utc>) -> Self {
        Self {
            exercises_loaded: Some(exercises),
            loaded_at: Some(loaded_at),
            ..Self::alive(service, version)
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// `GET /ping`: always `200 "success"`.
pub async fn ping() -> Json<&'static str> {
    Json(PING_PAYLOAD)
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"exercise-catalog-service","version":"0.1.0"}
/// ```
pub async fn health_live(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::alive(state.service_name(), state.service_version());
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler. Reports `503` while the catalog is empty.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = state.service_name();
    let version = state.service_version();

    let exercises = state.catalog().len();
    if exercises == 0 {
        let status = HealthStatus::not_ready(service, version, "no exercises loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, exercises, state.loaded_at());
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use exercise_catalog_lib::Catalog;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert!(status.exercises_loaded.is_none());
        assert!(status.loaded_at.is_none());
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("test-service", "1.0.0", "no data");
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("no data"));
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("exercises", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("exercises_loaded"));
    }

    #[tokio::test]
    async fn test_ready_reports_exercise_count() {
        let catalog = Catalog::from_reader(r#"[{"id":"a","name":"A"}]"#.as_bytes()).unwrap();
        let response = health_ready(State(AppState::from_catalog(catalog))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let status: HealthStatus = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(status.exercises_loaded, Some(1));
        assert!(status.loaded_at.is_some());
    }

    #[tokio::test]
    async fn test_live_reports_configured_service() {
        let state =
            AppState::from_catalog(Catalog::default()).with_service("catalog-api", "2.0.0");
        let response = health_live(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let status: HealthStatus = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(status.service, "catalog-api");
        assert_eq!(status.version, "2.0.0");
    }

    #[tokio::test]
    async fn test_ready_unavailable_when_empty() {
        let response = health_ready(State(AppState::from_catalog(Catalog::default()))).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_ping_payload() {
        let Json(payload) = ping().await;
        assert_eq!(payload, "success");
    }
}
