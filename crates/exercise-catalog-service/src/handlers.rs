//! Catalog endpoint handlers.
//!
//! Every handler here runs behind the authorization and pagination
//! middleware and reads the catalog from the [`RequestContext`] that the
//! pagination middleware attached.

use axum::{
    extract::{Path, Request, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension, Json,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, info};

use exercise_catalog_lib::{
    distinct_values, filter_exercises, group_by_body_part, paginate, Facet,
};
use exercise_catalog_service_shared::{
    record_exercises_served, record_filter_criteria, record_lookup_miss, ApiError, AppState,
    FilterQuery, QueryPairs, RequestContext, Validate,
};

/// `GET /`: the catalog, windowed by `limit`/`offset`.
pub async fn list_exercises(Extension(ctx): Extension<RequestContext>) -> Response {
    let window = paginate(ctx.catalog.exercises(), ctx.page);
    record_exercises_served("list", window.len());
    Json(window).into_response()
}

/// `GET /exercise/{id}`.
pub async fn exercise_by_id(
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match ctx.catalog.get(&id) {
        Some(exercise) => {
            record_exercises_served("lookup", 1);
            Ok(Json(exercise).into_response())
        }
        None => {
            debug!(id = %id, "exercise lookup missed");
            record_lookup_miss();
            Err(ApiError::ExerciseNotFound { id })
        }
    }
}

/// `GET /filter`: apply the query's criteria, then window the matches.
pub async fn filtered_exercises(
    Extension(ctx): Extension<RequestContext>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let pairs = QueryPairs::from_uri(&uri)?;
    let criteria = FilterQuery::from_pairs(&pairs).validate()?;

    let matches = filter_exercises(ctx.catalog.iter(), &criteria);
    let window = paginate(&matches, ctx.page);

    info!(
        criteria = criteria.active_count(),
        matched = matches.len(),
        returned = window.len(),
        "filtered exercises"
    );
    record_filter_criteria(criteria.active_count());
    record_exercises_served("filter", window.len());

    Ok(Json(window).into_response())
}

/// `GET /body_parts`.
pub async fn body_parts(Extension(ctx): Extension<RequestContext>) -> Response {
    facet_values(&ctx, Facet::BodyPart)
}

/// `GET /exercise_types`.
pub async fn exercise_types(Extension(ctx): Extension<RequestContext>) -> Response {
    facet_values(&ctx, Facet::ExerciseType)
}

/// `GET /muscle_groups`: distinct primary muscle groups.
pub async fn muscle_groups(Extension(ctx): Extension<RequestContext>) -> Response {
    facet_values(&ctx, Facet::PrimaryMuscleGroup)
}

fn facet_values(ctx: &RequestContext, facet: Facet) -> Response {
    let values = distinct_values(ctx.catalog.iter(), facet);
    debug!(facet = %facet, count = values.len(), "enumerated facet");
    Json(values).into_response()
}

/// `GET /exercises_by_body_parts`.
pub async fn exercises_by_body_parts(Extension(ctx): Extension<RequestContext>) -> Response {
    let groups = group_by_body_part(ctx.catalog.iter());
    record_exercises_served("by_body_parts", ctx.catalog.len());
    Json(groups).into_response()
}

/// `GET /images/{name}`: `<assets_dir>/<name>.png`, or 404.
pub async fn image(
    State(state): State<AppState>,
    Path(name): Path<String>,
    request: Request,
) -> Response {
    if !is_plain_file_stem(&name) {
        debug!(name = %name, "rejecting image name");
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = state.assets_dir().join(format!("{}.png", name));
    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// A single path component that cannot escape the assets directory.
fn is_plain_file_stem(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}
