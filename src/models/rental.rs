//! Modelo de Rental
//!
//! Contrato de alquiler tal como llega de `/rentals`. El estado derivado
//! (activo, vencido, reservado...) no se guarda aquí: se calcula al leer
//! con `services::rental_status`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::dates;
use crate::models::geofence::LatLng;
use crate::utils::validation::{validate_phone_field, validate_vin_field};

/// Periodo del contrato
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentalPeriod {
    #[serde(default, deserialize_with = "dates::deserialize_start")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "dates::deserialize_end")]
    pub end: Option<DateTime<Utc>>,
}

impl RentalPeriod {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// `start <= at <= end`, ambos extremos presentes
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= at && at <= end,
            _ => false,
        }
    }
}

/// Posición reportada durante el alquiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalLocation {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, deserialize_with = "dates::deserialize_start")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl RentalLocation {
    pub fn point(&self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Rental principal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub rental_id: String,
    #[serde(default)]
    pub vin: String,
    #[serde(default)]
    pub renter_name: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub rental_period: RentalPeriod,
    #[serde(default)]
    pub contract_status: Option<String>,
    #[serde(default)]
    pub reported_stolen: bool,
    #[serde(default)]
    pub accident_reported: bool,
    #[serde(default, deserialize_with = "dates::deserialize_start")]
    pub returned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locations: Vec<RentalLocation>,
}

/// Request para crear o reemplazar un contrato
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rental_period", skip_on_field_errors = false))]
pub struct RentalRequest {
    #[validate(custom = "validate_vin_field")]
    pub vin: String,

    #[validate(length(min = 2, max = 120))]
    pub renter_name: String,

    #[validate(custom = "validate_phone_field")]
    pub contact_number: Option<String>,

    pub rental_period: RentalPeriod,

    pub contract_status: Option<String>,

    #[serde(default)]
    pub reported_stolen: bool,

    #[serde(default)]
    pub accident_reported: bool,
}

fn validate_rental_period(request: &RentalRequest) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (request.rental_period.start, request.rental_period.end) {
        if end < start {
            let mut error = ValidationError::new("rental_period");
            error.message = Some("end must not be before start".into());
            return Err(error);
        }
    }
    Ok(())
}
