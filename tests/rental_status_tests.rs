mod common;

use chrono::{Duration, TimeZone, Utc};

use common::*;
use fleet_console::models::rental::{Rental, RentalPeriod};
use fleet_console::services::rental_status::{
    classify, classify_all, ClassificationSource, ClassifiedRental, ContractStatus, RentalCategory,
};

#[test]
fn test_reported_stolen_wins_regardless_of_dates() {
    let periods = [
        RentalPeriod::new(Some(now() - days(3)), Some(now() + days(3))),
        RentalPeriod::new(Some(now() + days(3)), Some(now() + days(6))),
        RentalPeriod::new(Some(now() - days(10)), Some(now() - days(5))),
        RentalPeriod::default(),
    ];

    for period in periods {
        let rental = Rental {
            reported_stolen: true,
            rental_period: period,
            ..rental("R1", VIN_A)
        };
        let result = classify(&rental, now());
        assert_eq!(result.category, RentalCategory::Stolen);
        assert_eq!(result.status, ContractStatus::Stolen);
        assert_eq!(result.source, ClassificationSource::StolenFlag);
    }
}

#[test]
fn test_stolen_flag_beats_explicit_status() {
    let rental = Rental {
        reported_stolen: true,
        contract_status: Some("active".to_string()),
        ..active_rental("R1", VIN_A, 1)
    };
    assert_eq!(classify(&rental, now()).category, RentalCategory::Stolen);
}

#[test]
fn test_returned_in_past_is_completed() {
    let rental = Rental {
        returned_at: Some(now() - days(1)),
        ..active_rental("R1", VIN_A, 3)
    };
    let result = classify(&rental, now());
    assert_eq!(result.category, RentalCategory::Completed);
    assert_eq!(result.source, ClassificationSource::ReturnedAt);
}

#[test]
fn test_future_return_is_ignored() {
    let rental = Rental {
        returned_at: Some(now() + days(1)),
        ..active_rental("R1", VIN_A, 3)
    };
    assert_eq!(classify(&rental, now()).category, RentalCategory::Active);
}

#[test]
fn test_date_window() {
    let active = active_rental("R1", VIN_A, 2);
    assert_eq!(classify(&active, now()).category, RentalCategory::Active);

    let overdue = rental_between("R2", VIN_A, now() - days(10), now() - days(1));
    assert_eq!(classify(&overdue, now()).category, RentalCategory::Overdue);

    let reserved = rental_between("R3", VIN_A, now() + days(1), now() + days(4));
    assert_eq!(classify(&reserved, now()).category, RentalCategory::Reserved);
}

#[test]
fn test_window_bounds_are_inclusive() {
    let starts_now = rental_between("R1", VIN_A, now(), now() + days(1));
    let ends_now = rental_between("R2", VIN_A, now() - days(1), now());
    assert_eq!(classify(&starts_now, now()).category, RentalCategory::Active);
    assert_eq!(classify(&ends_now, now()).category, RentalCategory::Active);
}

#[test]
fn test_partial_periods() {
    let open_ended = Rental {
        rental_period: RentalPeriod::new(Some(now() - days(1)), None),
        ..rental("R1", VIN_A)
    };
    assert_eq!(classify(&open_ended, now()).category, RentalCategory::Active);

    let not_started = Rental {
        rental_period: RentalPeriod::new(Some(now() + days(1)), None),
        ..rental("R2", VIN_A)
    };
    assert_eq!(classify(&not_started, now()).category, RentalCategory::Reserved);

    let only_past_end = Rental {
        rental_period: RentalPeriod::new(None, Some(now() - days(1))),
        ..rental("R3", VIN_A)
    };
    assert_eq!(classify(&only_past_end, now()).category, RentalCategory::Overdue);

    let only_future_end = Rental {
        rental_period: RentalPeriod::new(None, Some(now() + days(1))),
        ..rental("R4", VIN_A)
    };
    assert_eq!(classify(&only_future_end, now()).category, RentalCategory::Unknown);
}

#[test]
fn test_explicit_status_wins_over_dates() {
    let rental = Rental {
        contract_status: Some(" Past-Due ".to_string()),
        ..active_rental("R1", VIN_A, 1)
    };
    let result = classify(&rental, now());
    assert_eq!(result.status, ContractStatus::Overdue);
    assert_eq!(result.source, ClassificationSource::ServerStatus);
}

#[test]
fn test_unrecognized_status_falls_back_to_dates() {
    let rental = Rental {
        contract_status: Some("needs review".to_string()),
        ..active_rental("R1", VIN_A, 1)
    };
    let result = classify(&rental, now());
    assert_eq!(result.category, RentalCategory::Active);
    assert_eq!(result.source, ClassificationSource::DateWindow);
}

#[test]
fn test_no_information_is_unknown() {
    let result = classify(&rental("R1", VIN_A), now());
    assert_eq!(result.status, ContractStatus::Unknown);
    assert_eq!(result.source, ClassificationSource::Unresolved);
}

#[test]
fn test_classification_does_not_touch_the_rental() {
    let original = Rental {
        contract_status: Some("booked".to_string()),
        ..active_rental("R1", VIN_A, 1)
    };
    let classified = classify_all(std::slice::from_ref(&original), now());
    assert_eq!(classified[0].rental, original);
    assert_eq!(classified[0].status, ContractStatus::Reserved);
}

#[test]
fn test_serialized_shape() {
    let classified = ClassifiedRental::new(active_rental("R1", VIN_A, 1), now());
    let json = serde_json::to_value(&classified).unwrap();
    assert_eq!(json["rentalId"], "R1");
    assert_eq!(json["status"], "active");
    assert_eq!(json["category"], "ACTIVE");
    assert!(json["rentalPeriod"]["start"].is_string());
}

#[test]
fn test_bare_end_date_covers_the_whole_day() {
    let rental: Rental = serde_json::from_value(serde_json::json!({
        "rentalId": "R1",
        "vin": VIN_A,
        "rentalPeriod": { "start": "2025-06-10", "end": "2025-06-15" }
    }))
    .unwrap();
    // now() es 2025-06-15 12:00 UTC
    assert_eq!(classify(&rental, now()).category, RentalCategory::Active);
}

#[test]
fn test_bare_end_date_includes_last_second() {
    let rental: Rental = serde_json::from_value(serde_json::json!({
        "rentalId": "R1",
        "vin": VIN_A,
        "rentalPeriod": { "start": "2025-06-10", "end": "2025-06-20" }
    }))
    .unwrap();

    let last_half_second = Utc.with_ymd_and_hms(2025, 6, 20, 23, 59, 59).unwrap() + Duration::milliseconds(500);
    assert_eq!(classify(&rental, last_half_second).category, RentalCategory::Active);

    let next_day = Utc.with_ymd_and_hms(2025, 6, 21, 0, 0, 0).unwrap();
    assert_eq!(classify(&rental, next_day).category, RentalCategory::Overdue);
}

#[test]
fn test_bad_date_does_not_break_the_collection() {
    let rentals: Vec<Rental> = serde_json::from_value(serde_json::json!([
        { "rentalId": "R1", "vin": VIN_A, "rentalPeriod": { "start": "2025-06-10", "end": "2025-06-20" } },
        { "rentalId": "R2", "vin": VIN_B, "rentalPeriod": { "start": "15/06/2025", "end": "20/06/2025" } },
        { "rentalId": "R3", "vin": VIN_B, "rentalPeriod": { "start": 1749772800000i64, "end": 1750204800000i64 } }
    ]))
    .unwrap();

    let classified = classify_all(&rentals, now());
    assert_eq!(classified.len(), 3);
    assert_eq!(classified[0].category, RentalCategory::Active);
    assert_eq!(classified[1].category, RentalCategory::Unknown);
    assert!(rentals[1].rental_period.start.is_none());
    // 2025-06-13 00:00 .. 2025-06-18 00:00 UTC
    assert_eq!(classified[2].category, RentalCategory::Active);
}
