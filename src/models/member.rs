//! Modelo de miembros del equipo (`/members`)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Roles de un miembro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Manager,
    Viewer,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::Manager => "manager",
            MemberRole::Viewer => "viewer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(MemberRole::Admin),
            "manager" => Some(MemberRole::Manager),
            "viewer" => Some(MemberRole::Viewer),
            _ => None,
        }
    }

    /// Puede crear, editar y borrar registros
    pub fn can_edit(&self) -> bool {
        matches!(self, MemberRole::Admin | MemberRole::Manager)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
}

/// Request para invitar a un miembro
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteMemberRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    pub role: MemberRole,
}
