use std::sync::Arc;

use validator::ValidationErrors;

use crate::client::FleetBackend;
use crate::dto::query_dto::GeofenceCheckResponse;
use crate::models::geofence::LatLng;
use crate::services::geofence::geofences_containing;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_coordinates;

pub struct GeofenceController {
    backend: Arc<dyn FleetBackend>,
}

impl GeofenceController {
    pub fn new(backend: Arc<dyn FleetBackend>) -> Self {
        Self { backend }
    }

    pub async fn check(&self, point: LatLng) -> AppResult<GeofenceCheckResponse> {
        if let Err(error) = validate_coordinates(point.lat, point.lng) {
            let mut errors = ValidationErrors::new();
            errors.add("coordinates", error);
            return Err(AppError::Validation(errors));
        }

        let company = self.backend.get_company().await?;
        let geofences: Vec<String> = geofences_containing(&company.geofences, point)
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(GeofenceCheckResponse {
            inside: !geofences.is_empty(),
            geofences,
        })
    }
}
