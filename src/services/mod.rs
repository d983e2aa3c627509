//! Services module
//!
//! Lógica de negocio pura: clasificación de contratos, agregación por VIN,
//! etapas de gestión, tablas, geofences, incidencias y panel. Ningún
//! servicio hace I/O; trabajan sobre colecciones ya descargadas.

pub mod dashboard;
pub mod geofence;
pub mod issues;
pub mod management_stage;
pub mod rental_status;
pub mod table;
pub mod vin_aggregator;

pub use dashboard::FleetDashboard;
pub use management_stage::{derive_stage, ManagementStage, StagedAsset};
pub use rental_status::{classify, classify_all, ClassifiedRental, ContractStatus, RentalCategory};
pub use vin_aggregator::{aggregate_by_vin, AggregationReport, VinSummary};
