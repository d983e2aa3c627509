//! Etapa de gestión de un asset
//!
//! Si el asset trae una etapa explícita válida se usa (traduciendo los
//! nombres antiguos). Si no, se deriva con una cascada de reglas sobre
//! `vehicleStatus`, códigos de diagnóstico, dispositivo y registro.

use serde::{Deserialize, Serialize};

use crate::models::asset::Asset;
use crate::services::rental_status::normalize_status;

/// Etapa que se muestra en el panel de gestión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagementStage {
    Registration,
    DeviceInstall,
    Ready,
    Rented,
    Repair,
    Stolen,
    Disposed,
}

impl ManagementStage {
    pub const ALL: [ManagementStage; 7] = [
        ManagementStage::Registration,
        ManagementStage::DeviceInstall,
        ManagementStage::Ready,
        ManagementStage::Rented,
        ManagementStage::Repair,
        ManagementStage::Stolen,
        ManagementStage::Disposed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ManagementStage::Registration => "registration",
            ManagementStage::DeviceInstall => "device_install",
            ManagementStage::Ready => "ready",
            ManagementStage::Rented => "rented",
            ManagementStage::Repair => "repair",
            ManagementStage::Stolen => "stolen",
            ManagementStage::Disposed => "disposed",
        }
    }

    /// Etapa explícita, aceptando los nombres antiguos
    pub fn parse(raw: &str) -> Option<Self> {
        let stage = match normalize_status(raw).as_str() {
            "registration" | "pending_registration" | "unregistered" => ManagementStage::Registration,
            "device_install" | "device_pending" | "needs_device" | "install" => ManagementStage::DeviceInstall,
            "ready" | "available" | "idle" | "active" => ManagementStage::Ready,
            "rented" | "on_rent" | "in_rental" => ManagementStage::Rented,
            "repair" | "maintenance" | "in_repair" | "service" => ManagementStage::Repair,
            "stolen" | "theft" => ManagementStage::Stolen,
            "disposed" | "retired" | "sold" | "scrapped" => ManagementStage::Disposed,
            _ => return None,
        };
        Some(stage)
    }
}

const DISPOSED_STATUSES: &[&str] = &["retired", "sold", "disposed", "scrapped"];
const STOLEN_STATUSES: &[&str] = &["stolen", "theft"];
const REPAIR_STATUSES: &[&str] = &["maintenance", "repair", "in_repair", "service"];
const RENTED_STATUSES: &[&str] = &["rented", "in_use", "on_rent"];
const REGISTERED_STATUSES: &[&str] = &["registered", "complete", "completed", "active", "approved"];

/// Derivar la etapa de un asset
pub fn derive_stage(asset: &Asset) -> ManagementStage {
    if let Some(stage) = asset.management_stage.as_deref().and_then(ManagementStage::parse) {
        return stage;
    }

    let vehicle_status = asset
        .vehicle_status
        .as_deref()
        .map(normalize_status)
        .unwrap_or_default();
    let status_in = |set: &[&str]| set.contains(&vehicle_status.as_str());

    if status_in(DISPOSED_STATUSES) {
        return ManagementStage::Disposed;
    }
    if status_in(STOLEN_STATUSES) {
        return ManagementStage::Stolen;
    }
    if status_in(REPAIR_STATUSES) || asset.has_diagnostics() {
        return ManagementStage::Repair;
    }
    if status_in(RENTED_STATUSES) {
        return ManagementStage::Rented;
    }

    if let Some(registration) = asset.registration_status.as_deref() {
        let registration = normalize_status(registration);
        if !registration.is_empty() && !REGISTERED_STATUSES.contains(&registration.as_str()) {
            return ManagementStage::Registration;
        }
    }

    if !asset.has_device() {
        return ManagementStage::DeviceInstall;
    }

    ManagementStage::Ready
}

/// Asset con su etapa derivada
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedAsset {
    #[serde(flatten)]
    pub asset: Asset,
    pub derived_stage: ManagementStage,
}

impl From<Asset> for StagedAsset {
    fn from(asset: Asset) -> Self {
        let derived_stage = derive_stage(&asset);
        Self { asset, derived_stage }
    }
}
