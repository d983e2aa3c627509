//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos tal como los expone el
//! backend REST (JSON en camelCase).

pub mod asset;
pub mod auth;
pub mod company;
pub mod dates;
pub mod geofence;
pub mod issue;
pub mod member;
pub mod rental;
pub mod upload;

pub use asset::*;
pub use company::*;
pub use geofence::*;
pub use issue::*;
pub use member::*;
pub use rental::*;

/// Estadísticas libres de `/dashboard`
pub type DashboardStats = serde_json::Map<String, serde_json::Value>;
