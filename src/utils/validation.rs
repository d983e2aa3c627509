//! Utilidades de validación
//!
//! Funciones helper para validar VIN, teléfonos, coordenadas y fechas
//! antes de enviar datos al backend.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::models::dates::{parse_flexible, DayBound};

lazy_static! {
    // 17 caracteres, sin I, O ni Q
    static ref VIN_RE: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
}

/// Normalizar un VIN: sin espacios alrededor y en mayúsculas
pub fn normalize_vin(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}

/// Validar formato de VIN (ISO 3779)
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    let vin = normalize_vin(value);
    if !VIN_RE.is_match(&vin) {
        let mut error = ValidationError::new("vin");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"17 characters, no I/O/Q".to_string());
        return Err(error);
    }
    Ok(())
}

/// Adaptador para `#[validate(custom = ...)]`
pub fn validate_vin_field(value: &str) -> Result<(), ValidationError> {
    validate_vin(value)
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 7 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

pub fn validate_phone_field(value: &str) -> Result<(), ValidationError> {
    validate_phone(value)
}

/// Validar coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

/// Validar y convertir un string a fecha (acepta RFC 3339 o `YYYY-MM-DD`)
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_flexible(value, DayBound::Start).ok_or_else(|| {
        let mut error = ValidationError::new("datetime");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"RFC3339 or YYYY-MM-DD".to_string());
        error
    })
}

/// Validar formato de matrícula
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 2 || clean_plate.len() > 10 {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
