use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::types::{IssuedToken, TokenRequest};
use crate::shared::{ApiJson, AppError, AppState, ResultResponse};

/// HTTP handler for issuing an IM token to a user
///
/// POST /user/get_token
/// Returns the provider's credential under `result`
#[instrument(name = "get_token", skip(state))]
pub async fn get_token(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TokenRequest>,
) -> Result<Json<ResultResponse<IssuedToken>>, AppError> {
    let user_id = request.require_user_id()?;
    info!(user_id = %user_id, "Issuing IM token");

    let issued = state.token_issuer.issue_token(&user_id).await?;

    info!(user_id = %issued.user_id, "IM token issued");

    Ok(Json(ResultResponse::ok(issued)))
}
