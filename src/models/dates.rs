//! Parsing flexible de fechas
//!
//! El backend mezcla timestamps RFC 3339, fechas naive sin zona y fechas
//! sueltas `YYYY-MM-DD`, y algunos endpoints devuelven epoch en milisegundos.
//! Todo se normaliza a `DateTime<Utc>`. Una fecha ilegible se descarta como
//! `None` en lugar de tumbar la colección entera.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Cómo interpretar una fecha sin hora
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBound {
    /// 00:00:00 del día
    Start,
    /// Último instante del día (23:59:59.999999999)
    End,
}

/// Parsear una fecha en cualquiera de los formatos aceptados
pub fn parse_flexible(value: &str, bound: DayBound) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let time = match bound {
        DayBound::Start => NaiveTime::MIN,
        DayBound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?,
    };
    Some(date.and_time(time).and_utc())
}

/// Valor crudo de una fecha tal como puede llegar en el JSON
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Millis(i64),
    Text(String),
    Other(IgnoredAny),
}

fn deserialize_with_bound<'de, D>(deserializer: D, bound: DayBound) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawDate> = Option::deserialize(deserializer)?;
    let parsed = match raw {
        None => None,
        Some(RawDate::Millis(ms)) => {
            let dt = DateTime::from_timestamp_millis(ms);
            if dt.is_none() {
                warn!("⚠️ Timestamp fuera de rango descartado: {}", ms);
            }
            dt
        }
        Some(RawDate::Text(s)) if s.trim().is_empty() => None,
        Some(RawDate::Text(s)) => {
            let dt = parse_flexible(&s, bound);
            if dt.is_none() {
                warn!("⚠️ Fecha ilegible descartada: '{}'", s);
            }
            dt
        }
        Some(RawDate::Other(_)) => {
            warn!("⚠️ Fecha con tipo inesperado descartada");
            None
        }
    };
    Ok(parsed)
}

/// Deserializador para fechas de inicio (fecha sola = inicio del día)
pub fn deserialize_start<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_with_bound(deserializer, DayBound::Start)
}

/// Deserializador para fechas de fin (fecha sola = fin del día)
pub fn deserialize_end<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_with_bound(deserializer, DayBound::End)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bare_dates_follow_their_bound() {
        let start = parse_flexible("2025-03-10", DayBound::Start).unwrap();
        let end = parse_flexible("2025-03-10", DayBound::End).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 59).unwrap() + chrono::Duration::nanoseconds(999_999_999)
        );
        assert!(end < Utc.with_ymd_and_hms(2025, 3, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn offsets_are_converted_to_utc() {
        let dt = parse_flexible("2025-03-10T10:00:00+02:00", DayBound::Start).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_flexible("mañana", DayBound::Start).is_none());
        assert!(parse_flexible("   ", DayBound::End).is_none());
    }

    #[derive(Deserialize)]
    struct Stamp {
        #[serde(default, deserialize_with = "deserialize_end")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn lenient_deserialization() {
        let millis: Stamp = serde_json::from_str(r#"{"at": 1749772800000}"#).unwrap();
        assert_eq!(millis.at, Some(Utc.with_ymd_and_hms(2025, 6, 13, 0, 0, 0).unwrap()));

        let garbage: Stamp = serde_json::from_str(r#"{"at": "15/06/2025"}"#).unwrap();
        assert!(garbage.at.is_none());

        let wrong_type: Stamp = serde_json::from_str(r#"{"at": true}"#).unwrap();
        assert!(wrong_type.at.is_none());

        let missing: Stamp = serde_json::from_str("{}").unwrap();
        assert!(missing.at.is_none());
    }
}
