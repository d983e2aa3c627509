//! Consola de gestión de flota de alquiler
//!
//! Modelos del backend REST, cliente tipado, servicios puros de
//! clasificación/agregación y el gateway HTTP que sirve las vistas
//! derivadas a la UI.

pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use client::{FleetApiClient, FleetBackend};
pub use utils::api_error::{ApiError, ApiErrorKind, ApiResult, Locale};
