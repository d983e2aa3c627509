mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;
use fleet_console::client::FleetBackend;
use fleet_console::config::EnvironmentConfig;
use fleet_console::models::geofence::{Geofence, LatLng};
use fleet_console::models::issue::{Issue, IssueSeverity, IssueStatus, ProblemVehicle};
use fleet_console::models::{Asset, CompanyInfo, DashboardStats, Rental};
use fleet_console::routes::create_app;
use fleet_console::state::AppState;
use fleet_console::utils::api_error::{ApiError, ApiErrorKind, ApiResult, Locale};

/// Backend en memoria que registra los tokens recibidos
#[derive(Clone, Default)]
struct FakeBackend {
    assets: Vec<Asset>,
    rentals: Vec<Rental>,
    company: CompanyInfo,
    problem_vehicles: Vec<ProblemVehicle>,
    stats_error: Option<ApiError>,
    rentals_error: Option<ApiError>,
    token: Option<String>,
    seen_tokens: Arc<Mutex<Vec<Option<String>>>>,
}

impl FakeBackend {
    fn record(&self) {
        self.seen_tokens.lock().unwrap().push(self.token.clone());
    }
}

#[async_trait]
impl FleetBackend for FakeBackend {
    fn with_token(&self, token: Option<String>) -> Arc<dyn FleetBackend> {
        Arc::new(FakeBackend {
            token,
            ..self.clone()
        })
    }

    async fn list_assets(&self) -> ApiResult<Vec<Asset>> {
        self.record();
        Ok(self.assets.clone())
    }

    async fn list_rentals(&self) -> ApiResult<Vec<Rental>> {
        self.record();
        match &self.rentals_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.rentals.clone()),
        }
    }

    async fn delete_rental(&self, rental_id: &str) -> ApiResult<bool> {
        self.record();
        Ok(self.rentals.iter().any(|r| r.rental_id == rental_id))
    }

    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        match &self.stats_error {
            Some(e) => Err(e.clone()),
            None => {
                let mut stats = DashboardStats::new();
                stats.insert("revenue".to_string(), json!(980));
                Ok(stats)
            }
        }
    }

    async fn get_company(&self) -> ApiResult<CompanyInfo> {
        Ok(self.company.clone())
    }

    async fn list_problem_vehicles(&self) -> ApiResult<Vec<ProblemVehicle>> {
        Ok(self.problem_vehicles.clone())
    }
}

fn fleet_backend() -> FakeBackend {
    FakeBackend {
        assets: vec![
            asset("A1", VIN_A),
            Asset {
                vehicle_status: Some("maintenance".to_string()),
                ..asset("A2", VIN_B)
            },
        ],
        rentals: vec![
            active_rental("R1", VIN_A, 1),
            active_rental("R2", VIN_A, 4),
            rental_between("R3", VIN_B, now() - days(9), now() - days(2)),
            Rental {
                reported_stolen: true,
                ..rental("R4", VIN_B)
            },
        ],
        company: CompanyInfo {
            name: "Rent Co".to_string(),
            geofences: vec![Geofence {
                id: Some("g1".to_string()),
                name: "Centro".to_string(),
                polygon: vec![
                    LatLng::new(40.0, -4.0),
                    LatLng::new(40.0, -3.0),
                    LatLng::new(41.0, -3.0),
                    LatLng::new(41.0, -4.0),
                ],
            }],
            ..Default::default()
        },
        problem_vehicles: vec![ProblemVehicle {
            vin: VIN_B.to_string(),
            plate: None,
            issues: vec![Issue {
                id: "I1".to_string(),
                vin: VIN_B.to_string(),
                title: "Pinchazo".to_string(),
                description: None,
                severity: IssueSeverity::High,
                status: IssueStatus::Open,
                created_at: None,
                resolved_at: None,
            }],
        }],
        ..Default::default()
    }
}

fn create_test_app(backend: FakeBackend) -> axum::Router {
    create_app(AppState::new(EnvironmentConfig::default(), Arc::new(backend)))
}

const AT: &str = "2025-06-15T12:00:00Z";

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get(create_test_app(FakeBackend::default()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "fleet-console");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_rentals_are_classified() {
    let (status, body) = get(create_test_app(fleet_backend()), &format!("/api/rentals?at={}", AT)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert!(body["error"].is_null());

    let categories: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["ACTIVE", "ACTIVE", "OVERDUE", "STOLEN"]);
}

#[tokio::test]
async fn test_rentals_filtered_by_category() {
    let app = create_test_app(fleet_backend());
    let (status, body) = get(app, &format!("/api/rentals?category=overdue&at={}", AT)).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["rentalId"], "R3");
}

#[tokio::test]
async fn test_invalid_query_parameters() {
    let (status, body) = get(create_test_app(fleet_backend()), "/api/rentals?category=lost").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, _) = get(create_test_app(fleet_backend()), "/api/rentals?at=ayer").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rentals_by_vin() {
    let (status, body) = get(create_test_app(fleet_backend()), &format!("/api/rentals/by-vin?at={}", AT)).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["conflictingVins"], json!([VIN_A]));
    assert_eq!(data["vehicles"][VIN_A]["current"]["rentalId"], "R1");
    assert_eq!(data["vehicles"][VIN_A]["conflicts"][0]["rentalId"], "R2");
    assert_eq!(data["vehicles"][VIN_B]["current"]["rentalId"], "R4");
}

#[tokio::test]
async fn test_vin_summary_and_missing_vehicle() {
    let app = create_test_app(fleet_backend());
    let uri = format!("/api/rentals/by-vin/{}?at={}", VIN_B.to_lowercase(), AT);
    let (status, body) = get(app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["vin"], VIN_B);

    let (status, body) = get(create_test_app(fleet_backend()), "/api/rentals/by-vin/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_rental() {
    let app = create_test_app(fleet_backend());
    let request = Request::delete("/api/rentals/R1").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], true);

    let app = create_test_app(fleet_backend());
    let request = Request::delete("/api/rentals/R404").body(Body::empty()).unwrap();
    let (_, body) = send(app, request).await;
    assert_eq!(body["data"]["deleted"], false);
}

#[tokio::test]
async fn test_bearer_token_is_forwarded_to_backend() {
    let backend = fleet_backend();
    let seen = backend.seen_tokens.clone();
    let app = create_test_app(backend);

    let request = Request::get("/api/assets/stages")
        .header("Authorization", "Bearer abc123")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(app.clone(), "/api/assets/stages").await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::get("/api/assets/stages")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen, vec![Some("abc123".to_string()), None]);
}

#[tokio::test]
async fn test_staged_assets() {
    let (status, body) = get(create_test_app(fleet_backend()), "/api/assets/stages").await;
    assert_eq!(status, StatusCode::OK);
    let stages: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["derivedStage"].as_str().unwrap())
        .collect();
    assert_eq!(stages, vec!["ready", "repair"]);
}

#[tokio::test]
async fn test_rental_table_query() {
    let request = Request::post(format!("/api/tables/rentals?at={}", AT))
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({
                "filters": {"category": {"type": "multi_select", "values": ["ACTIVE", "OVERDUE"]}},
                "sort": [{"column": "rentalPeriod.start", "direction": "asc"}],
                "page": 1,
                "pageSize": 2
            })
            .to_string(),
        ))
        .unwrap();
    let (status, body) = send(create_test_app(fleet_backend()), request).await;
    assert_eq!(status, StatusCode::OK);

    let page = &body["data"];
    assert_eq!(page["total"], 3);
    assert_eq!(page["totalPages"], 2);
    let ids: Vec<&str> = page["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["rentalId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["R3", "R2"]);
}

#[tokio::test]
async fn test_asset_table_search() {
    let request = Request::post("/api/tables/assets")
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({"search": "a2", "searchColumns": ["id", "vin"]}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(create_test_app(fleet_backend()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["rows"][0]["id"], "A2");
}

#[tokio::test]
async fn test_dashboard() {
    let (status, body) = get(create_test_app(fleet_backend()), &format!("/api/dashboard?at={}", AT)).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["totalAssets"], 2);
    assert_eq!(data["totalRentals"], 4);
    assert_eq!(data["rentalsByCategory"]["ACTIVE"], 2);
    assert_eq!(data["rentalsByCategory"]["STOLEN"], 1);
    assert_eq!(data["assetsByStage"]["repair"], 1);
    assert_eq!(data["backendStats"]["revenue"], 980);
}

#[tokio::test]
async fn test_dashboard_survives_missing_backend_stats() {
    let backend = FakeBackend {
        stats_error: Some(ApiError::from_status(500, None)),
        ..fleet_backend()
    };
    let (status, body) = get(create_test_app(backend), "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("backendStats").is_none());
}

#[tokio::test]
async fn test_upstream_errors_are_mapped() {
    let cases = [
        (ApiError::from_status(401, None), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        (ApiError::from_status(500, None), StatusCode::BAD_GATEWAY, "SERVER_ERROR"),
        (ApiError::network("connection refused"), StatusCode::SERVICE_UNAVAILABLE, "NETWORK_ERROR"),
        (ApiError::timeout("deadline"), StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
        (ApiError::from_status(422, Some("vin".to_string())), StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
    ];

    for (error, expected_status, expected_code) in cases {
        let backend = FakeBackend {
            rentals_error: Some(error),
            ..fleet_backend()
        };
        let (status, body) = get(create_test_app(backend), "/api/rentals").await;
        assert_eq!(status, expected_status);
        assert_eq!(body["code"], expected_code);
        assert_eq!(body["details"]["type"], expected_code);
    }
}

#[tokio::test]
async fn test_upstream_message_is_localized() {
    let backend = FakeBackend {
        rentals_error: Some(ApiError::new(ApiErrorKind::NotFound, "no rentals table")),
        ..fleet_backend()
    };
    let (status, body) = get(create_test_app(backend), "/api/rentals").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "El recurso solicitado no existe.");
    assert_eq!(body["details"]["upstream_message"], "no rentals table");
}

#[tokio::test]
async fn test_geofence_check() {
    let (status, body) = get(create_test_app(fleet_backend()), "/api/geofences/check?lat=40.4&lng=-3.7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["inside"], true);
    assert_eq!(body["data"]["geofences"], json!(["Centro"]));

    let (_, body) = get(create_test_app(fleet_backend()), "/api/geofences/check?lat=10&lng=10").await;
    assert_eq!(body["data"]["inside"], false);

    let (status, body) = get(create_test_app(fleet_backend()), "/api/geofences/check?lat=95&lng=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_issue_summary() {
    let (status, body) = get(create_test_app(fleet_backend()), "/api/issues/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["open"], 1);
    assert_eq!(body["data"]["mostSevereOpen"][VIN_B], "high");
}

#[tokio::test]
async fn test_upstream_message_uses_configured_locale() {
    let backend = FakeBackend {
        rentals_error: Some(ApiError::new(ApiErrorKind::NotFound, "no rentals table")),
        ..fleet_backend()
    };
    let config = EnvironmentConfig {
        default_locale: Locale::En,
        ..EnvironmentConfig::default()
    };
    let app = create_app(AppState::new(config, Arc::new(backend)));

    let (status, body) = get(app, &format!("/api/rentals/by-vin?at={}", AT)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "The requested resource was not found.");
    assert_eq!(body["details"]["upstream_message"], "no rentals table");
}

#[tokio::test]
async fn test_dashboard_rejects_rental_filters() {
    let request = Request::get("/api/dashboard?category=ACTIVE").body(Body::empty()).unwrap();
    let response = create_test_app(fleet_backend()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
