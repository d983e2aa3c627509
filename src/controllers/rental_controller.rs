use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::client::FleetBackend;
use crate::services::rental_status::{classify_all, ClassifiedRental, RentalCategory};
use crate::services::table::{run_query, to_rows, TablePage, TableQuery};
use crate::services::vin_aggregator::{aggregate_classified, AggregationReport, VinSummary};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct RentalController {
    backend: Arc<dyn FleetBackend>,
}

impl RentalController {
    pub fn new(backend: Arc<dyn FleetBackend>) -> Self {
        Self { backend }
    }

    async fn classified(&self, now: DateTime<Utc>) -> AppResult<Vec<ClassifiedRental>> {
        let rentals = self.backend.list_rentals().await?;
        Ok(classify_all(&rentals, now))
    }

    pub async fn list(
        &self,
        category: Option<RentalCategory>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ClassifiedRental>> {
        let classified = self.classified(now).await?;
        Ok(match category {
            Some(category) => classified.into_iter().filter(|r| r.category == category).collect(),
            None => classified,
        })
    }

    pub async fn by_vin(&self, now: DateTime<Utc>) -> AppResult<AggregationReport> {
        let report = aggregate_classified(self.classified(now).await?);
        if !report.conflicting_vins.is_empty() {
            info!(
                "⚠️ {} vehículos con contratos activos en conflicto",
                report.conflicting_vins.len()
            );
        }
        Ok(report)
    }

    pub async fn vin_summary(&self, vin: &str, now: DateTime<Utc>) -> AppResult<VinSummary> {
        let report = self.by_vin(now).await?;
        report
            .get(vin)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", vin))
    }

    pub async fn delete(&self, rental_id: &str) -> AppResult<bool> {
        let deleted = self.backend.delete_rental(rental_id).await?;
        if deleted {
            info!("🗑️ Contrato {} eliminado", rental_id);
        }
        Ok(deleted)
    }

    pub async fn table(&self, query: &TableQuery, now: DateTime<Utc>) -> AppResult<TablePage<serde_json::Value>> {
        let rows = to_rows(&self.classified(now).await?).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(run_query(rows, query))
    }
}
