use serde::{Deserialize, Serialize};

// Query de GET /api/rentals y /api/rentals/by-vin
#[derive(Debug, Default, Deserialize)]
pub struct RentalListQuery {
    pub category: Option<String>,
    /// Instante de referencia (RFC 3339 o YYYY-MM-DD); por defecto ahora
    pub at: Option<String>,
}

// Query de GET /api/dashboard
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardQuery {
    pub at: Option<String>,
}

// Query de GET /api/geofences/check
#[derive(Debug, Deserialize)]
pub struct GeofenceCheckQuery {
    pub lat: f64,
    pub lng: f64,
}

// Response de GET /api/geofences/check
#[derive(Debug, Serialize)]
pub struct GeofenceCheckResponse {
    pub inside: bool,
    pub geofences: Vec<String>,
}

// Response de borrados
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
