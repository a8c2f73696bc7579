use axum::{extract::State, Json};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::shared::{AppState, ResultResponse};

/// HTTP handler reporting the configured application version
///
/// GET /app/version
#[instrument(name = "app_version", skip(state))]
pub async fn app_version(State(state): State<AppState>) -> Json<ResultResponse<Map<String, Value>>> {
    debug!(keys = state.app_version.len(), "Reporting app version");
    Json(ResultResponse::ok(state.app_version.as_ref().clone()))
}
