use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::asset_controller::AssetController;
use crate::dto::envelope::ApiEnvelope;
use crate::middleware::auth::BearerToken;
use crate::services::management_stage::StagedAsset;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_asset_router() -> Router<AppState> {
    Router::new().route("/stages", get(list_staged_assets))
}

async fn list_staged_assets(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<ApiEnvelope<Vec<StagedAsset>>>, AppError> {
    let controller = AssetController::new(state.backend_for(token.into_inner()));
    let response = controller
        .staged()
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(response)))
}
