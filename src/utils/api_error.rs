//! Errores del cliente REST
//!
//! Clasifica las respuestas fallidas del backend en tipos estables
//! (`NOT_FOUND`, `UNAUTHORIZED`...) y ofrece mensajes localizados para la UI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Idioma de los mensajes para el usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "es-es" | "es_es" => Some(Locale::Es),
            "en" | "en-us" | "en_us" | "en-gb" => Some(Locale::En),
            _ => None,
        }
    }
}

/// Tipo de error de una llamada al backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    ValidationError,
    ServerError,
    NetworkError,
    Timeout,
    Unknown,
}

impl ApiErrorKind {
    /// Clasificar un status HTTP
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => ApiErrorKind::NotFound,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            409 => ApiErrorKind::Conflict,
            400..=499 => ApiErrorKind::ValidationError,
            500..=599 => ApiErrorKind::ServerError,
            _ => ApiErrorKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::NotFound => "NOT_FOUND",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Forbidden => "FORBIDDEN",
            ApiErrorKind::Conflict => "CONFLICT",
            ApiErrorKind::ValidationError => "VALIDATION_ERROR",
            ApiErrorKind::ServerError => "SERVER_ERROR",
            ApiErrorKind::NetworkError => "NETWORK_ERROR",
            ApiErrorKind::Timeout => "TIMEOUT",
            ApiErrorKind::Unknown => "UNKNOWN",
        }
    }

    /// Mensaje para mostrar al usuario
    pub fn localized(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ApiErrorKind::NotFound, Locale::Es) => "El recurso solicitado no existe.",
            (ApiErrorKind::NotFound, Locale::En) => "The requested resource was not found.",
            (ApiErrorKind::Unauthorized, Locale::Es) => "Tu sesión ha expirado. Inicia sesión de nuevo.",
            (ApiErrorKind::Unauthorized, Locale::En) => "Your session has expired. Please sign in again.",
            (ApiErrorKind::Forbidden, Locale::Es) => "No tienes permiso para realizar esta acción.",
            (ApiErrorKind::Forbidden, Locale::En) => "You do not have permission to perform this action.",
            (ApiErrorKind::Conflict, Locale::Es) => "El registro ya existe o fue modificado por otra persona.",
            (ApiErrorKind::Conflict, Locale::En) => "The record already exists or was changed by someone else.",
            (ApiErrorKind::ValidationError, Locale::Es) => "Los datos enviados no son válidos.",
            (ApiErrorKind::ValidationError, Locale::En) => "The submitted data is invalid.",
            (ApiErrorKind::ServerError, Locale::Es) => "Error del servidor. Inténtalo más tarde.",
            (ApiErrorKind::ServerError, Locale::En) => "Server error. Please try again later.",
            (ApiErrorKind::NetworkError, Locale::Es) => "Sin conexión con el servidor.",
            (ApiErrorKind::NetworkError, Locale::En) => "Unable to reach the server.",
            (ApiErrorKind::Timeout, Locale::Es) => "El servidor tardó demasiado en responder.",
            (ApiErrorKind::Timeout, Locale::En) => "The server took too long to respond.",
            (ApiErrorKind::Unknown, Locale::Es) => "Se produjo un error inesperado.",
            (ApiErrorKind::Unknown, Locale::En) => "An unexpected error occurred.",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error de una llamada al backend, serializado como `{type, message, status}`
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    /// Error a partir de un status HTTP y el mensaje del backend (si lo hay)
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let kind = ApiErrorKind::from_status(status);
        Self {
            kind,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status)),
            status: Some(status),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NetworkError, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }

    /// Mensaje localizado para la UI
    pub fn user_message(&self, locale: Locale) -> &'static str {
        self.kind.localized(locale)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return ApiError::timeout(error.to_string());
        }
        if error.is_connect() || error.is_request() {
            return ApiError::network(error.to_string());
        }
        if let Some(status) = error.status() {
            return ApiError::from_status(status.as_u16(), Some(error.to_string()));
        }
        if error.is_decode() {
            return ApiError::new(ApiErrorKind::Unknown, format!("invalid response body: {}", error));
        }
        ApiError::network(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::new(ApiErrorKind::Unknown, format!("invalid response body: {}", error))
    }
}

/// Resultado tipado para llamadas al backend
pub type ApiResult<T> = Result<T, ApiError>;
