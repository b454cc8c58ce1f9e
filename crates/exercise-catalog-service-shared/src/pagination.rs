//! Pagination-parameter middleware and the per-request context it builds.
//!
//! The middleware validates `limit`/`offset` before any handler runs and
//! attaches a [`RequestContext`] to the request. Handlers read it through
//! `Extension<RequestContext>`:
//!
//! ```ignore
//! async fn handler(Extension(ctx): Extension<RequestContext>) -> impl IntoResponse {
//!     Json(paginate(ctx.catalog.exercises(), ctx.page))
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use exercise_catalog_lib::{Catalog, Page};

use crate::metrics::record_request_rejected;
use crate::request::{PageQuery, QueryPairs, Validate};
use crate::AppState;

/// Validated paging parameters plus the catalog, for downstream handlers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub page: Page,
    pub catalog: Arc<Catalog>,
}

/// Middleware parsing `limit` and `offset` into a [`RequestContext`].
///
/// Invalid values short-circuit with `400 {"error": "invalid limit"}` (or
/// `offset`). Use with [`axum::middleware::from_fn_with_state`].
pub async fn attach_request_context(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let page = QueryPairs::from_uri(request.uri())
        .map(|pairs| PageQuery::from_pairs(&pairs))
        .and_then(PageQuery::validate);

    let page = match page {
        Ok(page) => page,
        Err(err) => {
            tracing::info!(
                query = request.uri().query().unwrap_or(""),
                error = %err,
                "rejecting request with invalid pagination parameters"
            );
            record_request_rejected("invalid_pagination");
            return err.into_response();
        }
    };

    request.extensions_mut().insert(RequestContext {
        page,
        catalog: state.catalog_arc(),
    });

    next.run(request).await
}
