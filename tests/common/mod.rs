#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use fleet_console::models::asset::Asset;
use fleet_console::models::rental::{Rental, RentalPeriod};

pub const VIN_A: &str = "1HGCM82633A004352";
pub const VIN_B: &str = "JH4KA7561PC008269";

/// Instante fijo para todos los tests
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

pub fn rental(id: &str, vin: &str) -> Rental {
    Rental {
        rental_id: id.to_string(),
        vin: vin.to_string(),
        renter_name: Some(format!("Cliente {}", id)),
        ..Default::default()
    }
}

pub fn rental_between(id: &str, vin: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Rental {
    Rental {
        rental_period: RentalPeriod::new(Some(start), Some(end)),
        ..rental(id, vin)
    }
}

/// Contrato en curso: empezó hace `started_days_ago` días y termina en 5
pub fn active_rental(id: &str, vin: &str, started_days_ago: i64) -> Rental {
    rental_between(id, vin, now() - days(started_days_ago), now() + days(5))
}

pub fn asset(id: &str, vin: &str) -> Asset {
    Asset {
        id: id.to_string(),
        vin: vin.to_string(),
        device_serial: Some(format!("DEV-{}", id)),
        registration_status: Some("registered".to_string()),
        ..Default::default()
    }
}
