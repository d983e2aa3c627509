//! Agregación de contratos por VIN
//!
//! Agrupa los contratos por vehículo, los reparte en robados / activos /
//! vencidos / reservados y elige un único contrato "actual" por vehículo.
//!
//! Prioridad del actual: robado > activo > vencido > reservado. Dentro de
//! la misma categoría gana la fecha relevante más reciente (inicio, o fin
//! para los vencidos); sin fecha pierde contra cualquier fecha y en empate
//! total gana el primero de la lista.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::models::rental::Rental;
use crate::services::rental_status::{classify_all, ClassifiedRental, RentalCategory};
use crate::utils::validation::normalize_vin;

/// Resumen de los contratos de un vehículo
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VinSummary {
    pub vin: String,
    pub current: Option<ClassifiedRental>,
    pub stolen: Vec<ClassifiedRental>,
    pub active: Vec<ClassifiedRental>,
    pub overdue: Vec<ClassifiedRental>,
    pub reserved: Vec<ClassifiedRental>,
    /// Completados y desconocidos
    pub history: Vec<ClassifiedRental>,
    /// Activos simultáneos descartados como actual
    pub conflicts: Vec<ClassifiedRental>,
}

impl VinSummary {
    fn new(vin: String) -> Self {
        Self {
            vin,
            ..Default::default()
        }
    }

    pub fn has_conflict(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.stolen.len() + self.active.len() + self.overdue.len() + self.reserved.len() + self.history.len()
    }

    /// Categoría del contrato actual (si hay)
    pub fn current_category(&self) -> Option<RentalCategory> {
        self.current.as_ref().map(|c| c.category)
    }

    fn push(&mut self, rental: ClassifiedRental) {
        match rental.category {
            RentalCategory::Stolen => self.stolen.push(rental),
            RentalCategory::Active => self.active.push(rental),
            RentalCategory::Overdue => self.overdue.push(rental),
            RentalCategory::Reserved => self.reserved.push(rental),
            RentalCategory::Completed | RentalCategory::Unknown => self.history.push(rental),
        }
    }

    fn resolve(&mut self) {
        self.current = [&self.stolen, &self.active, &self.overdue, &self.reserved]
            .into_iter()
            .find_map(|bucket| most_recent(bucket).map(|idx| bucket[idx].clone()));

        if self.active.len() > 1 {
            if let Some(keep) = most_recent(&self.active) {
                self.conflicts = self
                    .active
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != keep)
                    .map(|(_, rental)| rental.clone())
                    .collect();
            }
        }
    }
}

/// Índice del contrato con la fecha relevante más reciente
fn most_recent(bucket: &[ClassifiedRental]) -> Option<usize> {
    let mut best: Option<(usize, Option<DateTime<Utc>>)> = None;
    for (idx, rental) in bucket.iter().enumerate() {
        let date = rental.relevant_date();
        match best {
            Some((_, best_date)) if date <= best_date => {}
            _ => best = Some((idx, date)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Resultado de agregar toda la flota
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationReport {
    pub vehicles: BTreeMap<String, VinSummary>,
    /// Contratos sin VIN
    pub unassigned: usize,
    pub conflicting_vins: Vec<String>,
}

impl AggregationReport {
    pub fn get(&self, vin: &str) -> Option<&VinSummary> {
        self.vehicles.get(&normalize_vin(vin))
    }
}

/// Agrupar contratos ya clasificados
pub fn aggregate_classified(rentals: Vec<ClassifiedRental>) -> AggregationReport {
    let mut report = AggregationReport::default();

    for rental in rentals {
        let vin = normalize_vin(&rental.rental.vin);
        if vin.is_empty() {
            report.unassigned += 1;
            continue;
        }
        report
            .vehicles
            .entry(vin.clone())
            .or_insert_with(|| VinSummary::new(vin))
            .push(rental);
    }

    for summary in report.vehicles.values_mut() {
        summary.resolve();
        if summary.has_conflict() {
            debug!(
                "⚠️ VIN {} con {} contratos activos simultáneos",
                summary.vin,
                summary.active.len()
            );
            report.conflicting_vins.push(summary.vin.clone());
        }
    }

    report
}

/// Clasificar contra `now` y agrupar por VIN
pub fn aggregate_by_vin(rentals: &[Rental], now: DateTime<Utc>) -> AggregationReport {
    aggregate_classified(classify_all(rentals, now))
}
