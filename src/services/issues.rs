//! Resumen de incidencias de la flota

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::issue::{Issue, IssueSeverity, IssueStatus, ProblemVehicle};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    /// Incidencias no resueltas por gravedad
    pub open_by_severity: BTreeMap<IssueSeverity, usize>,
    /// Gravedad máxima no resuelta por VIN
    pub most_severe_open: BTreeMap<String, IssueSeverity>,
}

impl IssueSummary {
    pub fn from_vehicles(vehicles: &[ProblemVehicle]) -> Self {
        let mut summary = Self::default();
        for vehicle in vehicles {
            for issue in &vehicle.issues {
                summary.record(&vehicle.vin, issue);
            }
        }
        summary
    }

    /// Resumen sobre una lista plana (`/issues`)
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            summary.record(&issue.vin, issue);
        }
        summary
    }

    fn record(&mut self, vin: &str, issue: &Issue) {
        self.total += 1;
        match issue.status {
            IssueStatus::Open => self.open += 1,
            IssueStatus::InProgress => self.in_progress += 1,
            IssueStatus::Resolved => self.resolved += 1,
        }

        if issue.status.is_open() {
            *self.open_by_severity.entry(issue.severity).or_insert(0) += 1;
            let vin = vin.trim().to_ascii_uppercase();
            if !vin.is_empty() {
                let worst = self.most_severe_open.entry(vin).or_insert(issue.severity);
                if issue.severity > *worst {
                    *worst = issue.severity;
                }
            }
        }
    }

    pub fn unresolved(&self) -> usize {
        self.open + self.in_progress
    }
}
