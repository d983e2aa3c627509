//! Geometría de geofences
//!
//! Validación de polígonos y contención punto-en-polígono (ray casting,
//! regla par-impar). Las coordenadas se tratan como planas; para los
//! tamaños de un geofence urbano la distorsión es despreciable.

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::models::geofence::{Geofence, LatLng};
use crate::models::rental::{Rental, RentalLocation};
use crate::utils::validation::validate_coordinates;

impl Geofence {
    /// Nombre no vacío, al menos 3 vértices y coordenadas en rango
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", ValidationError::new("required"));
        }

        if self.vertices().len() < 3 {
            let mut error = ValidationError::new("polygon");
            error.add_param("min_vertices".into(), &3);
            error.add_param("actual".into(), &self.vertices().len());
            errors.add("polygon", error);
        }

        for point in &self.polygon {
            if let Err(error) = validate_coordinates(point.lat, point.lng) {
                errors.add("polygon", error);
                break;
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Vértices sin el de cierre (si el último repite el primero)
    pub fn vertices(&self) -> &[LatLng] {
        match (self.polygon.first(), self.polygon.last()) {
            (Some(first), Some(last)) if self.polygon.len() > 1 && first == last => {
                &self.polygon[..self.polygon.len() - 1]
            }
            _ => &self.polygon,
        }
    }

    pub fn contains(&self, point: LatLng) -> bool {
        let vertices = self.vertices();
        if vertices.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = vertices.len() - 1;
        for i in 0..vertices.len() {
            let (a, b) = (vertices[i], vertices[j]);
            if (a.lat > point.lat) != (b.lat > point.lat) {
                let crossing = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
                if point.lng < crossing {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Nombres de los geofences que contienen el punto
pub fn geofences_containing<'a>(fences: &'a [Geofence], point: LatLng) -> Vec<&'a str> {
    fences
        .iter()
        .filter(|f| f.contains(point))
        .map(|f| f.name.as_str())
        .collect()
}

/// Posición de un contrato fuera de todos los geofences
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceBreach {
    pub rental_id: String,
    pub vin: String,
    pub location: RentalLocation,
}

/// Posiciones de contratos fuera de cualquier geofence. Sin geofences
/// configurados no hay incumplimientos.
pub fn rental_breaches(rentals: &[Rental], fences: &[Geofence]) -> Vec<GeofenceBreach> {
    if fences.is_empty() {
        return Vec::new();
    }

    rentals
        .iter()
        .flat_map(|rental| {
            rental
                .locations
                .iter()
                .filter(|loc| !fences.iter().any(|f| f.contains(loc.point())))
                .map(move |loc| GeofenceBreach {
                    rental_id: rental.rental_id.clone(),
                    vin: rental.vin.clone(),
                    location: loc.clone(),
                })
        })
        .collect()
}
