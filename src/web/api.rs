//! JSON API for the site settings singleton.

use crate::{
    core::settings::{get_site_settings, merge_site_settings},
    entities::site_settings,
    web::{error::ApiError, state::AppState},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Rejects non-admin callers with a JSON 401/403.
pub async fn require_admin_api(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match state.authorize(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(error) => ApiError(error).into_response(),
    }
}

/// `GET /api/admin/site-settings`
pub async fn get_settings(State(state): State<AppState>) -> Json<site_settings::Model> {
    Json(get_site_settings(&state.db, &state.fallback_settings).await)
}

/// `PUT /api/admin/site-settings` - merges a partial JSON object onto the stored row.
///
/// The body is parsed here rather than by the `Json` extractor so malformed input gets
/// the same `{"error"}` envelope as every other failure.
pub async fn put_settings(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<site_settings::Model>, ApiError> {
    let patch: Value = serde_json::from_slice(&body).map_err(crate::errors::Error::from)?;
    let settings = merge_site_settings(&state.db, &state.fallback_settings, patch).await?;
    Ok(Json(settings))
}
