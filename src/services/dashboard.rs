//! Totales del panel principal
//!
//! Se calculan localmente a partir de assets y contratos, junto a las
//! estadísticas libres que devuelve `/dashboard`.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::asset::Asset;
use crate::models::rental::Rental;
use crate::models::DashboardStats;
use crate::services::management_stage::{derive_stage, ManagementStage};
use crate::services::rental_status::{classify_all, RentalCategory};
use crate::services::vin_aggregator::aggregate_classified;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetDashboard {
    pub generated_at: DateTime<Utc>,
    pub total_assets: usize,
    pub total_rentals: usize,
    pub rentals_by_category: BTreeMap<RentalCategory, usize>,
    pub assets_by_stage: BTreeMap<ManagementStage, usize>,
    pub conflicting_vins: Vec<String>,
    /// Contratos activos que terminan en las próximas 24 h
    pub ending_soon: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_stats: Option<DashboardStats>,
}

impl FleetDashboard {
    pub fn build(assets: &[Asset], rentals: &[Rental], now: DateTime<Utc>) -> Self {
        let classified = classify_all(rentals, now);

        let mut rentals_by_category: BTreeMap<RentalCategory, usize> =
            RentalCategory::ALL.into_iter().map(|c| (c, 0)).collect();
        for rental in &classified {
            *rentals_by_category.entry(rental.category).or_insert(0) += 1;
        }

        let mut assets_by_stage: BTreeMap<ManagementStage, usize> =
            ManagementStage::ALL.into_iter().map(|s| (s, 0)).collect();
        for asset in assets {
            *assets_by_stage.entry(derive_stage(asset)).or_insert(0) += 1;
        }

        let horizon = now + Duration::hours(24);
        let ending_soon = classified
            .iter()
            .filter(|r| r.category == RentalCategory::Active)
            .filter_map(|r| r.rental.rental_period.end)
            .filter(|end| *end >= now && *end <= horizon)
            .count();

        let total_rentals = classified.len();
        let report = aggregate_classified(classified);

        Self {
            generated_at: now,
            total_assets: assets.len(),
            total_rentals,
            rentals_by_category,
            assets_by_stage,
            conflicting_vins: report.conflicting_vins,
            ending_soon,
            backend_stats: None,
        }
    }

    pub fn with_backend_stats(mut self, stats: DashboardStats) -> Self {
        self.backend_stats = Some(stats);
        self
    }
}
