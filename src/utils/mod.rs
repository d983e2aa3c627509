//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores (gateway y
//! cliente REST) y validación.

pub mod api_error;
pub mod errors;
pub mod validation;

pub use api_error::{ApiError, ApiErrorKind, ApiResult, Locale};
pub use errors::{AppError, AppResult};
