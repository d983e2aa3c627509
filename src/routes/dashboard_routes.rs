use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::controllers::geofence_controller::GeofenceController;
use crate::controllers::issue_controller::IssueController;
use crate::controllers::resolve_now;
use crate::dto::envelope::ApiEnvelope;
use crate::dto::query_dto::{DashboardQuery, GeofenceCheckQuery, GeofenceCheckResponse};
use crate::middleware::auth::BearerToken;
use crate::models::geofence::LatLng;
use crate::services::dashboard::FleetDashboard;
use crate::services::issues::IssueSummary;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/geofences/check", get(check_geofences))
        .route("/issues/summary", get(issue_summary))
}

async fn get_dashboard(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiEnvelope<FleetDashboard>>, AppError> {
    let now = resolve_now(query.at.as_deref())?;
    let controller = DashboardController::new(state.backend_for(token.into_inner()));
    let response = controller
        .build(now)
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(response)))
}

async fn check_geofences(
    State(state): State<AppState>,
    token: BearerToken,
    Query(query): Query<GeofenceCheckQuery>,
) -> Result<Json<ApiEnvelope<GeofenceCheckResponse>>, AppError> {
    let controller = GeofenceController::new(state.backend_for(token.into_inner()));
    let response = controller
        .check(LatLng::new(query.lat, query.lng))
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(response)))
}

async fn issue_summary(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<ApiEnvelope<IssueSummary>>, AppError> {
    let controller = IssueController::new(state.backend_for(token.into_inner()));
    let response = controller
        .summary()
        .await
        .map_err(|e| e.localized(state.locale()))?;
    Ok(Json(ApiEnvelope::ok(response)))
}
