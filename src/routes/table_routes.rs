use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};

use crate::controllers::asset_controller::AssetController;
use crate::controllers::rental_controller::RentalController;
use crate::controllers::resolve_now;
use crate::dto::envelope::ApiEnvelope;
use crate::dto::query_dto::RentalListQuery;
use crate::middleware::auth::BearerToken;
use crate::services::table::{TablePage, TableQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_table_router() -> Router<AppState> {
    Router::new()
        .route("/rentals", post(query_rentals))
        .route("/assets", post(query_assets))
}

async fn query_rentals(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<RentalListQuery>,
    Json(query): Json<TableQuery>,
) -> Result<Json<ApiEnvelope<TablePage<serde_json::Value>>>, AppError> {
    let now = resolve_now(params.at.as_deref())?;
    let controller = RentalController::new(state.backend_for(token.into_inner()));
    let response = controller
        .table(&query, now)
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(response)))
}

async fn query_assets(
    State(state): State<AppState>,
    token: BearerToken,
    Json(query): Json<TableQuery>,
) -> Result<Json<ApiEnvelope<TablePage<serde_json::Value>>>, AppError> {
    let controller = AssetController::new(state.backend_for(token.into_inner()));
    let response = controller
        .table(&query)
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(response)))
}
