use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single logical flight search, already validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub passenger_count: u8,
}

/// A flight price quote in the shape shared by every supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOffer {
    pub airline: String,
    pub supplier_name: String,
    pub fare: f64,
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub departure_date_time: DateTime<Utc>,
    pub arrival_date_time: DateTime<Utc>,
}

/// Reads an ISO-8601 date-time. Values without an offset are taken as UTC,
/// values with one are converted to UTC.
pub fn parse_utc_date_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

pub fn deserialize_utc_date_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc_date_time(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_naive_date_time_is_read_as_utc() {
        let parsed = parse_utc_date_time("2025-07-20T10:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 7, 20, 10, 0, 0).unwrap());

        let short = parse_utc_date_time("2025-07-20T10:00").unwrap();
        assert_eq!(short, parsed);
    }

    #[test]
    fn test_offset_date_time_is_converted_to_utc() {
        let parsed = parse_utc_date_time("2025-07-20T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 7, 20, 10, 0, 0).unwrap());

        let zulu = parse_utc_date_time("2025-07-20T10:00:00Z").unwrap();
        assert_eq!(zulu, parsed);
    }

    #[test]
    fn test_garbage_date_time_is_rejected() {
        assert!(parse_utc_date_time("20/07/2025 10:00").is_none());
        assert!(parse_utc_date_time("").is_none());
    }

    #[test]
    fn test_offer_serializes_with_camel_case_keys() {
        let offer = NormalizedOffer {
            airline: "CrazyAir".to_string(),
            supplier_name: "CrazyAir".to_string(),
            fare: 123.45,
            departure_airport_code: "LHR".to_string(),
            arrival_airport_code: "AMS".to_string(),
            departure_date_time: Utc.with_ymd_and_hms(2025, 7, 20, 10, 0, 0).unwrap(),
            arrival_date_time: Utc.with_ymd_and_hms(2025, 7, 20, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["supplierName"], "CrazyAir");
        assert_eq!(json["arrivalAirportCode"], "AMS");
        assert_eq!(json["fare"], 123.45);
        assert_eq!(json["departureDateTime"], "2025-07-20T10:00:00Z");
    }
}
