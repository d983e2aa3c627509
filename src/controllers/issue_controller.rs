use std::sync::Arc;

use crate::client::FleetBackend;
use crate::services::issues::IssueSummary;
use crate::utils::errors::AppResult;

pub struct IssueController {
    backend: Arc<dyn FleetBackend>,
}

impl IssueController {
    pub fn new(backend: Arc<dyn FleetBackend>) -> Self {
        Self { backend }
    }

    pub async fn summary(&self) -> AppResult<IssueSummary> {
        let vehicles = self.backend.list_problem_vehicles().await?;
        Ok(IssueSummary::from_vehicles(&vehicles))
    }
}
