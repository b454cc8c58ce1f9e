//! Error responses for the exercise catalog HTTP API.
//!
//! Each variant maps to a fixed status code and a small JSON body:
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | [`ApiError::Validation`] | 400 | `{"error": "<message>"}` |
//! | [`ApiError::Unauthorized`] | 401 | `{"error": "unauthorized"}` |
//! | [`ApiError::ExerciseNotFound`] | 404 | `{"message": "exercise not found"}` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body for validation and authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body for lookup misses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Request-scoped failure. Never affects other requests or the catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed query parameters.
    #[error("{0}")]
    Validation(String),

    /// Missing or mismatched proxy secret.
    #[error("unauthorized")]
    Unauthorized,

    /// No exercise with the requested id.
    #[error("exercise not found")]
    ExerciseNotFound { id: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::ExerciseNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::ExerciseNotFound { .. } => (
                status,
                Json(MessageBody {
                    message: self.to_string(),
                }),
            )
                .into_response(),
            _ => (
                status,
                Json(ErrorBody {
                    error: self.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_body() {
        let (status, body) = body_json(ApiError::validation("invalid limit")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "invalid limit"}));
    }

    #[tokio::test]
    async fn unauthorized_body() {
        let (status, body) = body_json(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"error": "unauthorized"}));
    }

    #[tokio::test]
    async fn not_found_body() {
        let (status, body) = body_json(ApiError::ExerciseNotFound {
            id: "xyz".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"message": "exercise not found"}));
    }

    #[test]
    fn display_matches_body_text() {
        assert_eq!(ApiError::Unauthorized.to_string(), "unauthorized");
        assert_eq!(ApiError::validation("bad").to_string(), "bad");
    }
}
