//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y la extracción del token
//! que se reenvía al backend.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
