//! Modelo de Geofence
//!
//! Polígono con nombre que forma parte de la configuración de la empresa.

use serde::{Deserialize, Serialize};

/// Punto geográfico
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Geofence principal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub polygon: Vec<LatLng>,
}

/// Request para crear un geofence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeofenceRequest {
    pub name: String,
    pub polygon: Vec<LatLng>,
}

impl From<CreateGeofenceRequest> for Geofence {
    fn from(request: CreateGeofenceRequest) -> Self {
        Self {
            id: None,
            name: request.name,
            polygon: request.polygon,
        }
    }
}
