//! Modelo de Company
//!
//! Configuración singleton de la empresa: datos legales, logo y geofences.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::geofence::Geofence;

/// Configuración de la empresa
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default)]
    pub registration_number: Option<String>,
    /// URL o data URL (`data:image/png;base64,...`)
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub geofences: Vec<Geofence>,
}

/// Request para actualizar la empresa
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 2, max = 255))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(length(min = 3, max = 50))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Logo decodificado desde una data URL
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyLogo {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CompanyLogo {
    /// Decodificar `data:<mime>;base64,<payload>`. Devuelve `None` si no es
    /// una data URL base64 de imagen.
    pub fn from_data_url(value: &str) -> Option<Self> {
        let rest = value.trim().strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let content_type = meta.strip_suffix(";base64")?;
        if !content_type.starts_with("image/") {
            return None;
        }
        let bytes = STANDARD.decode(payload.trim()).ok()?;
        Some(Self {
            content_type: content_type.to_string(),
            bytes,
        })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

impl CompanyInfo {
    /// Logo embebido, si el campo es una data URL
    pub fn embedded_logo(&self) -> Option<CompanyLogo> {
        self.logo.as_deref().and_then(CompanyLogo::from_data_url)
    }
}
