//! Controllers del gateway
//!
//! Cada controller descarga las colecciones que necesita del backend y
//! aplica los servicios puros sobre ellas.

pub mod asset_controller;
pub mod dashboard_controller;
pub mod geofence_controller;
pub mod issue_controller;
pub mod rental_controller;

use chrono::{DateTime, Utc};

use crate::services::rental_status::RentalCategory;
use crate::utils::errors::{bad_request_error, AppResult};
use crate::utils::validation::validate_datetime;

/// Instante de referencia de `?at=`; ahora si no viene
pub fn resolve_now(at: Option<&str>) -> AppResult<DateTime<Utc>> {
    match at.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => validate_datetime(value)
            .map_err(|_| bad_request_error(&format!("Fecha inválida en 'at': {}", value))),
        None => Ok(Utc::now()),
    }
}

/// Categoría de `?category=`
pub fn resolve_category(category: Option<&str>) -> AppResult<Option<RentalCategory>> {
    match category.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => RentalCategory::from_str(value)
            .map(Some)
            .ok_or_else(|| bad_request_error(&format!("Categoría desconocida: {}", value))),
        None => Ok(None),
    }
}
