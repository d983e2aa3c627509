use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};

use crate::controllers::rental_controller::RentalController;
use crate::controllers::{resolve_category, resolve_now};
use crate::dto::envelope::ApiEnvelope;
use crate::dto::query_dto::{DeleteResponse, RentalListQuery};
use crate::middleware::auth::BearerToken;
use crate::services::rental_status::ClassifiedRental;
use crate::services::vin_aggregator::{AggregationReport, VinSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rentals))
        .route("/by-vin", get(rentals_by_vin))
        .route("/by-vin/:vin", get(vin_summary))
        .route("/:id", delete(delete_rental))
}

async fn list_rentals(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<RentalListQuery>,
) -> Result<Json<ApiEnvelope<Vec<ClassifiedRental>>>, AppError> {
    let now = resolve_now(query.at.as_deref())?;
    let category = resolve_category(query.category.as_deref())?;
    let controller = RentalController::new(state.backend_for(token.into_inner()));
    let response = controller
        .list(category, now)
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(response)))
}

async fn rentals_by_vin(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<RentalListQuery>,
) -> Result<Json<ApiEnvelope<AggregationReport>>, AppError> {
    let now = resolve_now(query.at.as_deref())?;
    let controller = RentalController::new(state.backend_for(token.into_inner()));
    let response = controller
        .by_vin(now)
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(response)))
}

async fn vin_summary(
    State(state): State<AppState>,
    token: BearerToken,
    Path(vin): Path<String>,
    Query(query): Query<RentalListQuery>,
) -> Result<Json<ApiEnvelope<VinSummary>>, AppError> {
    let now = resolve_now(query.at.as_deref())?;
    let controller = RentalController::new(state.backend_for(token.into_inner()));
    let response = controller
        .vin_summary(&vin, now)
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(response)))
}

async fn delete_rental(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<DeleteResponse>>, AppError> {
    let controller = RentalController::new(state.backend_for(token.into_inner()));
    let deleted = controller
        .delete(&id)
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(DeleteResponse { deleted })))
}
