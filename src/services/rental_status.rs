//! Clasificador de estado de contratos
//!
//! Convierte el estado crudo de un contrato (string del servidor, fechas,
//! flags) en un estado canónico y una categoría. Es una función pura de
//! `(contractStatus, rentalPeriod, reportedStolen, returnedAt, now)`: nunca
//! modifica el contrato.
//!
//! Orden de prioridad:
//! 1. `reportedStolen` → robado, sin mirar fechas ni estado
//! 2. estado explícito del servidor, si es reconocible
//! 3. `returnedAt` en el pasado → completado
//! 4. ventana de fechas contra `now`

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::rental::Rental;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[\s\-]+").unwrap();
}

/// Categoría gruesa de un contrato
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalCategory {
    Active,
    Overdue,
    Reserved,
    Stolen,
    Completed,
    Unknown,
}

impl RentalCategory {
    pub const ALL: [RentalCategory; 6] = [
        RentalCategory::Active,
        RentalCategory::Overdue,
        RentalCategory::Reserved,
        RentalCategory::Stolen,
        RentalCategory::Completed,
        RentalCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalCategory::Active => "ACTIVE",
            RentalCategory::Overdue => "OVERDUE",
            RentalCategory::Reserved => "RESERVED",
            RentalCategory::Stolen => "STOLEN",
            RentalCategory::Completed => "COMPLETED",
            RentalCategory::Unknown => "UNKNOWN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|c| c.as_str() == upper)
    }
}

/// Estado canónico de un contrato
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    Overdue,
    Reserved,
    Stolen,
    Completed,
    Cancelled,
    Unknown,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Active => "active",
            ContractStatus::Overdue => "overdue",
            ContractStatus::Reserved => "reserved",
            ContractStatus::Stolen => "stolen",
            ContractStatus::Completed => "completed",
            ContractStatus::Cancelled => "cancelled",
            ContractStatus::Unknown => "unknown",
        }
    }

    pub fn category(&self) -> RentalCategory {
        match self {
            ContractStatus::Active => RentalCategory::Active,
            ContractStatus::Overdue => RentalCategory::Overdue,
            ContractStatus::Reserved => RentalCategory::Reserved,
            ContractStatus::Stolen => RentalCategory::Stolen,
            ContractStatus::Completed | ContractStatus::Cancelled => RentalCategory::Completed,
            ContractStatus::Unknown => RentalCategory::Unknown,
        }
    }

    /// Normalizar un estado crudo del servidor. `None` si no se reconoce.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_status(raw);
        let status = match normalized.as_str() {
            "active" | "in_progress" | "ongoing" | "rented" | "in_use" | "on_rent" => ContractStatus::Active,
            "overdue" | "late" | "past_due" => ContractStatus::Overdue,
            "reserved" | "booked" | "pending" | "upcoming" | "scheduled" | "confirmed" => ContractStatus::Reserved,
            "stolen" | "reported_stolen" | "theft" => ContractStatus::Stolen,
            "completed" | "returned" | "closed" | "finished" | "done" => ContractStatus::Completed,
            "cancelled" | "canceled" | "void" => ContractStatus::Cancelled,
            _ => return None,
        };
        Some(status)
    }
}

/// Regla que decidió la clasificación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    StolenFlag,
    ServerStatus,
    ReturnedAt,
    DateWindow,
    Unresolved,
}

/// Resultado de clasificar un contrato
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub status: ContractStatus,
    pub category: RentalCategory,
    pub source: ClassificationSource,
}

impl Classification {
    fn new(status: ContractStatus, source: ClassificationSource) -> Self {
        Self {
            status,
            category: status.category(),
            source,
        }
    }
}

/// trim + minúsculas + espacios/guiones a `_`
pub fn normalize_status(raw: &str) -> String {
    SEPARATORS
        .replace_all(raw.trim(), "_")
        .to_lowercase()
}

/// Clasificar un contrato respecto a `now`
pub fn classify(rental: &Rental, now: DateTime<Utc>) -> Classification {
    if rental.reported_stolen {
        return Classification::new(ContractStatus::Stolen, ClassificationSource::StolenFlag);
    }

    if let Some(status) = rental.contract_status.as_deref().and_then(ContractStatus::parse) {
        return Classification::new(status, ClassificationSource::ServerStatus);
    }

    if let Some(returned_at) = rental.returned_at {
        if returned_at <= now {
            return Classification::new(ContractStatus::Completed, ClassificationSource::ReturnedAt);
        }
    }

    let period = &rental.rental_period;
    let by_dates = match (period.start, period.end) {
        (Some(start), Some(_)) if now < start => Some(ContractStatus::Reserved),
        (Some(_), Some(_)) if period.contains(now) => Some(ContractStatus::Active),
        (Some(_), Some(_)) => Some(ContractStatus::Overdue),
        (Some(start), None) if now >= start => Some(ContractStatus::Active),
        (Some(_), None) => Some(ContractStatus::Reserved),
        (None, Some(end)) if now > end => Some(ContractStatus::Overdue),
        _ => None,
    };

    match by_dates {
        Some(status) => Classification::new(status, ClassificationSource::DateWindow),
        None => Classification::new(ContractStatus::Unknown, ClassificationSource::Unresolved),
    }
}

/// Contrato junto con su clasificación
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRental {
    #[serde(flatten)]
    pub rental: Rental,
    pub status: ContractStatus,
    pub category: RentalCategory,
}

impl ClassifiedRental {
    pub fn new(rental: Rental, now: DateTime<Utc>) -> Self {
        let classification = classify(&rental, now);
        Self {
            rental,
            status: classification.status,
            category: classification.category,
        }
    }

    /// Fecha usada para desempatar: fin para vencidos, inicio para el resto
    pub fn relevant_date(&self) -> Option<DateTime<Utc>> {
        match self.category {
            RentalCategory::Overdue => self.rental.rental_period.end,
            _ => self.rental.rental_period.start,
        }
    }
}

/// Clasificar una lista completa contra el mismo `now`
pub fn classify_all(rentals: &[Rental], now: DateTime<Utc>) -> Vec<ClassifiedRental> {
    rentals
        .iter()
        .cloned()
        .map(|rental| ClassifiedRental::new(rental, now))
        .collect()
}
