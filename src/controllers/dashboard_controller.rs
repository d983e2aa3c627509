use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::client::FleetBackend;
use crate::services::dashboard::FleetDashboard;
use crate::utils::errors::AppResult;

pub struct DashboardController {
    backend: Arc<dyn FleetBackend>,
}

impl DashboardController {
    pub fn new(backend: Arc<dyn FleetBackend>) -> Self {
        Self { backend }
    }

    /// Assets y contratos son obligatorios; las estadísticas del backend no
    pub async fn build(&self, now: DateTime<Utc>) -> AppResult<FleetDashboard> {
        let (assets, rentals, stats) = futures::join!(
            self.backend.list_assets(),
            self.backend.list_rentals(),
            self.backend.dashboard_stats(),
        );

        let dashboard = FleetDashboard::build(&assets?, &rentals?, now);
        Ok(match stats {
            Ok(stats) => dashboard.with_backend_stats(stats),
            Err(e) => {
                warn!("⚠️ Estadísticas del backend no disponibles: {}", e);
                dashboard
            }
        })
    }
}
