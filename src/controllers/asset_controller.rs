use std::sync::Arc;

use crate::client::FleetBackend;
use crate::services::management_stage::StagedAsset;
use crate::services::table::{run_query, to_rows, TablePage, TableQuery};
use crate::utils::errors::{AppError, AppResult};

pub struct AssetController {
    backend: Arc<dyn FleetBackend>,
}

impl AssetController {
    pub fn new(backend: Arc<dyn FleetBackend>) -> Self {
        Self { backend }
    }

    pub async fn staged(&self) -> AppResult<Vec<StagedAsset>> {
        let assets = self.backend.list_assets().await?;
        Ok(assets.into_iter().map(StagedAsset::from).collect())
    }

    pub async fn table(&self, query: &TableQuery) -> AppResult<TablePage<serde_json::Value>> {
        let rows = to_rows(&self.staged().await?).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(run_query(rows, query))
    }
}
