mod common;

use serde_json::json;
use validator::Validate;

use common::*;
use fleet_console::models::auth::AuthSession;
use fleet_console::models::rental::{RentalPeriod, RentalRequest};
use fleet_console::models::{CompanyInfo, CreateAssetRequest, InsuranceInfo, MemberRole};

fn rental_request(period: RentalPeriod) -> RentalRequest {
    RentalRequest {
        vin: VIN_A.to_string(),
        renter_name: "Ana Pérez".to_string(),
        contact_number: Some("+34 600 123 456".to_string()),
        rental_period: period,
        contract_status: None,
        reported_stolen: false,
        accident_reported: false,
    }
}

#[test]
fn test_rental_request_validation() {
    let ok = rental_request(RentalPeriod::new(Some(now()), Some(now() + days(3))));
    assert!(ok.validate().is_ok());

    let reversed = rental_request(RentalPeriod::new(Some(now()), Some(now() - days(1))));
    assert!(reversed.validate().is_err());

    let bad_phone = RentalRequest {
        contact_number: Some("12".to_string()),
        ..rental_request(RentalPeriod::default())
    };
    let errors = bad_phone.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("contact_number"));
}

#[test]
fn test_asset_request_rejects_bad_vin() {
    let request = CreateAssetRequest {
        vin: "1HGCM82633A00435I".to_string(),
        plate: Some("ABC-123".to_string()),
        make: Some("Honda".to_string()),
        model: Some("Accord".to_string()),
        year: Some(2003),
        device_serial: None,
        insurance: InsuranceInfo::default(),
    };
    let errors = request.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("vin"));

    let valid = CreateAssetRequest {
        vin: VIN_A.to_lowercase(),
        ..request
    };
    assert!(valid.validate().is_ok());

    let short_plate = CreateAssetRequest {
        plate: Some("7".to_string()),
        ..valid
    };
    let errors = short_plate.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("plate"));
}

#[test]
fn test_asset_deserializes_backend_payload() {
    let asset: fleet_console::models::Asset = serde_json::from_value(json!({
        "id": "A9",
        "vin": VIN_B,
        "make": "Acura",
        "model": "Legend",
        "year": 1993,
        "diagnosticCodes": ["P0420"],
        "insurance": {"provider": "Mapfre", "expiresOn": "2025-01-31"},
        "createdAt": "2024-11-02 09:15:00"
    }))
    .unwrap();

    assert_eq!(asset.display_name(), "Acura Legend 1993");
    assert!(asset.has_diagnostics());
    assert!(!asset.has_device());
    assert!(asset.insurance.is_expired(now().date_naive()));
    assert!(asset.created_at.is_some());
}

#[test]
fn test_session_expiry() {
    let session: AuthSession = serde_json::from_value(json!({
        "token": "abc",
        "expiresAt": "2025-06-15T13:00:00Z",
        "user": {"id": "u1", "name": "Ana", "email": "ana@example.com", "role": "manager"}
    }))
    .unwrap();

    assert!(!session.is_expired_at(now()));
    assert!(session.is_expired_at(now() + days(1)));
    assert!(session.user.role.can_edit());
    assert!(!MemberRole::Viewer.can_edit());
}

#[test]
fn test_company_embedded_logo() {
    let company = CompanyInfo {
        name: "Rent Co".to_string(),
        logo: Some("data:image/svg+xml;base64,PHN2Zy8+".to_string()),
        ..Default::default()
    };
    let logo = company.embedded_logo().unwrap();
    assert_eq!(logo.content_type, "image/svg+xml");
    assert_eq!(logo.bytes, b"<svg/>");

    let remote = CompanyInfo {
        logo: Some("https://cdn.example.com/logo.png".to_string()),
        ..company
    };
    assert!(remote.embedded_logo().is_none());
}
