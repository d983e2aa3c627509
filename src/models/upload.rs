//! Modelos de documentos subidos, OCR y fax
//!
//! Las integraciones en sí son externas; aquí solo viajan los payloads.

use serde::{Deserialize, Serialize};

/// Documento subido a `/uploads`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub id: String,
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Resultado de `/ocr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResult {
    pub upload_id: String,
    #[serde(default)]
    pub text: String,
    /// Campos reconocidos (vin, plate, renterName...)
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Request para `/fax`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaxRequest {
    pub upload_id: String,
    pub fax_number: String,
}

/// Respuesta de `/fax`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaxReceipt {
    pub fax_id: String,
    #[serde(default)]
    pub status: String,
}
