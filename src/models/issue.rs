//! Modelos de incidencias
//!
//! Incidencias (`/issues`) y vehículos con problemas (`/problem-vehicles`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::dates;

/// Gravedad de una incidencia
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Low => "low",
            IssueSeverity::Medium => "medium",
            IssueSeverity::High => "high",
            IssueSeverity::Critical => "critical",
        }
    }
}

/// Estado de una incidencia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::InProgress => "in_progress",
            IssueStatus::Resolved => "resolved",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, IssueStatus::Resolved)
    }
}

/// Incidencia
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    #[serde(default)]
    pub vin: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub severity: IssueSeverity,
    pub status: IssueStatus,
    #[serde(default, deserialize_with = "dates::deserialize_start")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "dates::deserialize_start")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Vehículo con incidencias asociadas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemVehicle {
    pub vin: String,
    #[serde(default)]
    pub plate: Option<String>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// Request para abrir una incidencia
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    #[validate(length(min = 1))]
    pub vin: String,

    #[validate(length(min = 3, max = 200))]
    pub title: String,

    pub description: Option<String>,

    pub severity: IssueSeverity,
}

/// Request para cambiar el estado de una incidencia
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateIssueStatusRequest {
    pub status: IssueStatus,
}
