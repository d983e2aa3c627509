//! Cliente HTTP para el backend de la flota
//!
//! `FleetApiClient` cubre todos los endpoints REST que consume la consola.
//! El gateway solo depende del trait `FleetBackend`, que expone el
//! subconjunto de lecturas que necesita y permite sustituir el backend en
//! tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::envelope::unwrap_payload;
use crate::models::auth::{AuthSession, LoginRequest, SessionUser};
use crate::models::upload::{FaxReceipt, FaxRequest, OcrResult, Upload};
use crate::models::{
    Asset, CompanyInfo, CreateAssetRequest, CreateGeofenceRequest, CreateIssueRequest, DashboardStats,
    Geofence, InviteMemberRequest, Issue, IssueStatus, Member, ProblemVehicle, Rental, RentalRequest,
    UpdateAssetRequest, UpdateCompanyRequest, UpdateIssueStatusRequest,
};
use crate::utils::api_error::{ApiError, ApiErrorKind, ApiResult};

/// Validar un request antes de enviarlo; el backend no llega a verlo si falla
fn validated<T: Validate>(request: &T) -> ApiResult<&T> {
    request.validate().map_err(|e| {
        warn!("⚠️ Request rechazado localmente: {}", e);
        ApiError::new(ApiErrorKind::ValidationError, e.to_string())
    })?;
    Ok(request)
}

/// Operaciones del backend que usa el gateway
#[async_trait]
pub trait FleetBackend: Send + Sync {
    /// Copia del backend que envía `token` como `Authorization: Bearer`
    fn with_token(&self, token: Option<String>) -> Arc<dyn FleetBackend>;

    async fn list_assets(&self) -> ApiResult<Vec<Asset>>;
    async fn list_rentals(&self) -> ApiResult<Vec<Rental>>;
    async fn delete_rental(&self, rental_id: &str) -> ApiResult<bool>;
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats>;
    async fn get_company(&self) -> ApiResult<CompanyInfo>;
    async fn list_problem_vehicles(&self) -> ApiResult<Vec<ProblemVehicle>>;
}

/// Cliente HTTP para la API REST de la flota
#[derive(Clone)]
pub struct FleetApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for FleetApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FleetApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl FleetApiClient {
    /// Crear nuevo cliente con URL base y timeout configurables
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::new(ApiErrorKind::Unknown, format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &EnvironmentConfig) -> ApiResult<Self> {
        Self::new(config.fleet_api_url.clone(), config.fleet_api_timeout)
    }

    /// Copia autenticada (el `reqwest::Client` se comparte)
    pub fn with_bearer(&self, token: Option<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("➡️ {} {}", method, url);
        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json")
            .header("X-Request-Id", Uuid::new_v4().to_string());
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                // Cuerpo no JSON: solo importa si es un error
                Err(_) => serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()),
            }
        };

        let payload = unwrap_payload(status, body).map_err(|e| {
            warn!("❌ Backend respondió {}: {}", status, e);
            e
        })?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    /// DELETE: `Ok(false)` si el recurso no existe
    async fn delete(&self, path: &str) -> ApiResult<bool> {
        match self.send::<serde_json::Value>(self.request(Method::DELETE, path)).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => {
                debug!("🔍 DELETE {}: no existe", path);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    // -----------------------------------------------------------------------
    // Assets y vehículos
    // -----------------------------------------------------------------------

    pub async fn list_assets(&self) -> ApiResult<Vec<Asset>> {
        self.get("/assets").await
    }

    pub async fn get_asset(&self, id: &str) -> ApiResult<Asset> {
        self.get(&format!("/assets/{}", id)).await
    }

    pub async fn create_asset(&self, request: &CreateAssetRequest) -> ApiResult<Asset> {
        self.post("/assets", validated(request)?).await
    }

    pub async fn update_asset(&self, id: &str, request: &UpdateAssetRequest) -> ApiResult<Asset> {
        self.put(&format!("/assets/{}", id), validated(request)?).await
    }

    pub async fn delete_asset(&self, id: &str) -> ApiResult<bool> {
        self.delete(&format!("/assets/{}", id)).await
    }

    pub async fn list_vehicles(&self) -> ApiResult<Vec<Asset>> {
        self.get("/vehicles").await
    }

    // -----------------------------------------------------------------------
    // Contratos
    // -----------------------------------------------------------------------

    pub async fn list_rentals(&self) -> ApiResult<Vec<Rental>> {
        self.get("/rentals").await
    }

    pub async fn get_rental(&self, rental_id: &str) -> ApiResult<Rental> {
        self.get(&format!("/rentals/{}", rental_id)).await
    }

    pub async fn create_rental(&self, request: &RentalRequest) -> ApiResult<Rental> {
        self.post("/rentals", validated(request)?).await
    }

    pub async fn update_rental(&self, rental_id: &str, request: &RentalRequest) -> ApiResult<Rental> {
        self.put(&format!("/rentals/{}", rental_id), validated(request)?).await
    }

    pub async fn delete_rental(&self, rental_id: &str) -> ApiResult<bool> {
        self.delete(&format!("/rentals/{}", rental_id)).await
    }

    // -----------------------------------------------------------------------
    // Panel, empresa y geofences
    // -----------------------------------------------------------------------

    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get("/dashboard").await
    }

    pub async fn get_company(&self) -> ApiResult<CompanyInfo> {
        self.get("/company").await
    }

    pub async fn update_company(&self, request: &UpdateCompanyRequest) -> ApiResult<CompanyInfo> {
        self.put("/company", validated(request)?).await
    }

    pub async fn list_geofences(&self) -> ApiResult<Vec<Geofence>> {
        self.get("/geofences").await
    }

    /// Valida el polígono antes de enviarlo
    pub async fn create_geofence(&self, request: &CreateGeofenceRequest) -> ApiResult<Geofence> {
        let geofence = Geofence::from(request.clone());
        geofence
            .validate()
            .map_err(|e| ApiError::new(ApiErrorKind::ValidationError, e.to_string()))?;
        self.post("/geofences", request).await
    }

    pub async fn delete_geofence(&self, id: &str) -> ApiResult<bool> {
        self.delete(&format!("/geofences/{}", id)).await
    }

    // -----------------------------------------------------------------------
    // Incidencias
    // -----------------------------------------------------------------------

    pub async fn list_problem_vehicles(&self) -> ApiResult<Vec<ProblemVehicle>> {
        self.get("/problem-vehicles").await
    }

    pub async fn list_issues(&self) -> ApiResult<Vec<Issue>> {
        self.get("/issues").await
    }

    pub async fn create_issue(&self, request: &CreateIssueRequest) -> ApiResult<Issue> {
        self.post("/issues", validated(request)?).await
    }

    pub async fn update_issue_status(&self, id: &str, status: IssueStatus) -> ApiResult<Issue> {
        self.patch(&format!("/issues/{}", id), &UpdateIssueStatusRequest { status })
            .await
    }

    // -----------------------------------------------------------------------
    // Miembros
    // -----------------------------------------------------------------------

    pub async fn list_members(&self) -> ApiResult<Vec<Member>> {
        self.get("/members").await
    }

    pub async fn invite_member(&self, request: &InviteMemberRequest) -> ApiResult<Member> {
        self.post("/members", validated(request)?).await
    }

    pub async fn remove_member(&self, id: &str) -> ApiResult<bool> {
        self.delete(&format!("/members/{}", id)).await
    }

    // -----------------------------------------------------------------------
    // Documentos, OCR y fax
    // -----------------------------------------------------------------------

    pub async fn upload_document(&self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> ApiResult<Upload> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ApiError::new(ApiErrorKind::ValidationError, format!("invalid content type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);
        self.send(self.request(Method::POST, "/uploads").multipart(form)).await
    }

    pub async fn request_ocr(&self, upload_id: &str) -> ApiResult<OcrResult> {
        self.post("/ocr", &serde_json::json!({ "uploadId": upload_id })).await
    }

    pub async fn send_fax(&self, request: &FaxRequest) -> ApiResult<FaxReceipt> {
        self.post("/fax", request).await
    }

    // -----------------------------------------------------------------------
    // Sesión
    // -----------------------------------------------------------------------

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthSession> {
        self.post("/auth/login", validated(request)?).await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.send::<serde_json::Value>(self.request(Method::POST, "/auth/logout"))
            .await
            .map(|_| ())
    }

    pub async fn current_user(&self) -> ApiResult<SessionUser> {
        self.get("/auth/me").await
    }
}

#[async_trait]
impl FleetBackend for FleetApiClient {
    fn with_token(&self, token: Option<String>) -> Arc<dyn FleetBackend> {
        Arc::new(self.with_bearer(token))
    }

    async fn list_assets(&self) -> ApiResult<Vec<Asset>> {
        FleetApiClient::list_assets(self).await
    }

    async fn list_rentals(&self) -> ApiResult<Vec<Rental>> {
        FleetApiClient::list_rentals(self).await
    }

    async fn delete_rental(&self, rental_id: &str) -> ApiResult<bool> {
        FleetApiClient::delete_rental(self, rental_id).await
    }

    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        FleetApiClient::dashboard_stats(self).await
    }

    async fn get_company(&self) -> ApiResult<CompanyInfo> {
        FleetApiClient::get_company(self).await
    }

    async fn list_problem_vehicles(&self) -> ApiResult<Vec<ProblemVehicle>> {
        FleetApiClient::list_problem_vehicles(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = FleetApiClient::new("http://localhost:8080/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.url("/rentals"), "http://localhost:8080/api/rentals");
    }

    #[test]
    fn blank_tokens_are_dropped() {
        let client = FleetApiClient::new("http://localhost", Duration::from_secs(5)).unwrap();
        assert!(client.with_bearer(Some("  ".to_string())).token.is_none());
        assert!(client.with_bearer(Some("abc".to_string())).token.is_some());
    }
}
