//! Envelope estándar de respuesta
//!
//! `{data, status, error, timestamp}`: el backend lo usa en sus respuestas
//! y el gateway lo devuelve con el mismo formato.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::utils::api_error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    pub status: u16,
    #[serde(default)]
    pub error: Option<ApiError>,
    pub timestamp: String,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn with_status(status: StatusCode, data: T) -> Self {
        Self {
            data: Some(data),
            status: status.as_u16(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl ApiEnvelope<()> {
    pub fn error(error: ApiError) -> Self {
        Self {
            data: None,
            status: error.status.unwrap_or(500),
            error: Some(error),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Extraer el payload de una respuesta del backend.
///
/// Un objeto con clave `data` es un envelope y se devuelve su `data`; un
/// envelope con `error` no nulo es un error aunque el status sea 2xx.
/// Cualquier otro cuerpo se usa tal cual.
pub fn unwrap_payload(status: u16, body: serde_json::Value) -> Result<serde_json::Value, ApiError> {
    let is_success = (200..300).contains(&status);

    if !is_success {
        return Err(ApiError::from_status(status, error_message(&body)));
    }

    match body {
        serde_json::Value::Object(mut map) if map.contains_key("data") => {
            let has_error = map.get("error").map(|e| !e.is_null()).unwrap_or(false);
            if has_error {
                let envelope_status = map
                    .get("status")
                    .and_then(|s| s.as_u64())
                    .and_then(|s| u16::try_from(s).ok())
                    .filter(|s| *s >= 400)
                    .unwrap_or(500);
                let message = error_message(&serde_json::Value::Object(map.clone()));
                return Err(ApiError::from_status(envelope_status, message));
            }
            Ok(map.remove("data").unwrap_or(serde_json::Value::Null))
        }
        other => Ok(other),
    }
}

/// Mensaje de error del backend: `error` (string u objeto con `message`) o `message`
pub fn error_message(body: &serde_json::Value) -> Option<String> {
    let error = body.get("error");
    error
        .and_then(|e| e.as_str())
        .or_else(|| error.and_then(|e| e.get("message")).and_then(|m| m.as_str()))
        .or_else(|| body.get("message").and_then(|m| m.as_str()))
        .map(str::to_string)
}
