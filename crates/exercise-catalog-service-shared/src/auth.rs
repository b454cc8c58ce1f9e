//! Shared-secret authorization.
//!
//! Every catalog request must carry the `X-RapidAPI-Proxy-Secret` header with
//! the value configured at startup. The check fails closed: when no secret
//! is configured, every request is rejected.

use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::metrics::record_request_rejected;
use crate::ApiError;

/// Header carrying the shared secret.
pub const PROXY_SECRET_HEADER: &str = "x-rapidapi-proxy-secret";

/// Environment variable holding the configured secret.
pub const PROXY_SECRET_ENV: &str = "X_RAPIDAPI_PROXY_SECRET";

/// Configured shared secret. Cheap to clone.
#[derive(Clone, Default)]
pub struct ProxySecret(Option<Arc<str>>);

impl ProxySecret {
    /// Wrap a configured value. Empty values count as unset.
    pub fn new(secret: impl AsRef<str>) -> Self {
        let secret = secret.as_ref();
        if secret.is_empty() {
            Self(None)
        } else {
            Self(Some(Arc::from(secret)))
        }
    }

    /// A secret that rejects every request.
    pub fn unset() -> Self {
        Self(None)
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Byte-for-byte comparison against a presented header value.
    pub fn accepts(&self, presented: Option<&[u8]>) -> bool {
        match (&self.0, presented) {
            (Some(expected), Some(presented)) => expected.as_bytes() == presented,
            _ => false,
        }
    }

    /// Check the proxy secret header in `headers`.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let presented = headers.get(PROXY_SECRET_HEADER).map(|v| v.as_bytes());
        if self.accepts(presented) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

impl fmt::Debug for ProxySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.is_configured() { "<redacted>" } else { "<unset>" };
        f.debug_tuple("ProxySecret").field(&shown).finish()
    }
}

/// Middleware rejecting requests without the configured proxy secret.
///
/// Use with [`axum::middleware::from_fn_with_state`].
pub async fn require_proxy_secret(
    State(secret): State<ProxySecret>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(err) = secret.authorize(request.headers()) {
        tracing::warn!(
            path = %request.uri().path(),
            header_present = request.headers().contains_key(PROXY_SECRET_HEADER),
            "rejecting request without valid proxy secret"
        );
        record_request_rejected("unauthorized");
        return err.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use axum::{body::Body, http, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn accepts_matching_secret() {
        let secret = ProxySecret::new("s3cret");
        assert!(secret.accepts(Some(b"s3cret".as_slice())));
        assert!(!secret.accepts(Some(b"S3CRET".as_slice())));
        assert!(!secret.accepts(Some(b"".as_slice())));
        assert!(!secret.accepts(None));
    }

    #[test]
    fn unset_secret_rejects_everything() {
        let secret = ProxySecret::unset();
        assert!(!secret.is_configured());
        assert!(!secret.accepts(None));
        assert!(!secret.accepts(Some(b"".as_slice())));
        assert!(!ProxySecret::new("").is_configured());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let debug = format!("{:?}", ProxySecret::new("hunter2"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn authorize_reads_header_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RapidAPI-Proxy-Secret", "abc".parse().unwrap());
        assert!(ProxySecret::new("abc").authorize(&headers).is_ok());
        assert_eq!(
            ProxySecret::new("abd").authorize(&headers),
            Err(ApiError::Unauthorized)
        );
    }

    static HANDLER_RAN: AtomicBool = AtomicBool::new(false);

    async fn guarded() -> &'static str {
        HANDLER_RAN.store(true, Ordering::SeqCst);
        "ok"
    }

    fn app(secret: ProxySecret) -> Router {
        Router::new()
            .route("/guarded", get(guarded))
            .layer(middleware::from_fn_with_state(secret, require_proxy_secret))
    }

    #[tokio::test]
    async fn rejected_requests_never_reach_the_handler() {
        HANDLER_RAN.store(false, Ordering::SeqCst);

        let response = app(ProxySecret::new("abc"))
            .oneshot(
                http::Request::builder()
                    .uri("/guarded")
                    .header(PROXY_SECRET_HEADER, "wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!HANDLER_RAN.load(Ordering::SeqCst));

        let response = app(ProxySecret::new("abc"))
            .oneshot(
                http::Request::builder()
                    .uri("/guarded")
                    .header(PROXY_SECRET_HEADER, "abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(HANDLER_RAN.load(Ordering::SeqCst));
    }
}
