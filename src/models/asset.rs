//! Modelo de Asset
//!
//! Este módulo contiene el registro de vehículo (asset) tal como lo expone
//! el backend en `/assets`, y los requests de alta y edición.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::dates;
use crate::utils::validation::{validate_license_plate, validate_vin_field};

/// Datos del seguro del vehículo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceInfo {
    pub provider: Option<String>,
    pub policy_number: Option<String>,
    pub expires_on: Option<NaiveDate>,
}

impl InsuranceInfo {
    /// El seguro vence antes de `today` (sin fecha = no se sabe, no vencido)
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_on.map(|d| d < today).unwrap_or(false)
    }
}

/// Asset principal - registro de un vehículo de la flota
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub vin: String,
    #[serde(default)]
    pub plate: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub registration_status: Option<String>,
    #[serde(default)]
    pub vehicle_status: Option<String>,
    #[serde(default)]
    pub management_stage: Option<String>,
    #[serde(default)]
    pub device_serial: Option<String>,
    #[serde(default)]
    pub diagnostic_codes: Vec<String>,
    #[serde(default)]
    pub insurance: InsuranceInfo,
    #[serde(default, deserialize_with = "dates::deserialize_start")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "dates::deserialize_start")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Tiene un dispositivo telemático instalado
    pub fn has_device(&self) -> bool {
        self.device_serial
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }

    /// Tiene códigos de diagnóstico pendientes
    pub fn has_diagnostics(&self) -> bool {
        self.diagnostic_codes.iter().any(|c| !c.trim().is_empty())
    }

    /// Etiqueta corta para listados: "Toyota Corolla 2021"
    pub fn display_name(&self) -> String {
        let parts: Vec<String> = [
            self.make.clone(),
            self.model.clone(),
            self.year.map(|y| y.to_string()),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect();

        if parts.is_empty() {
            self.vin.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Request para registrar un nuevo asset
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    #[validate(custom = "validate_vin_field")]
    pub vin: String,

    #[validate(custom = "validate_license_plate")]
    pub plate: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    pub device_serial: Option<String>,

    #[serde(default)]
    pub insurance: InsuranceInfo,
}

/// Request para actualizar un asset existente
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetRequest {
    #[validate(custom = "validate_license_plate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_stage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_serial: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_codes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<InsuranceInfo>,
}
