use crate::domain::model::SearchRequest;
use crate::utils::error::{FlightSearchError, Result};
use chrono::NaiveDate;
use url::Url;

pub const MIN_PASSENGERS: u8 = 1;
pub const MAX_PASSENGERS: u8 = 4;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FlightSearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FlightSearchError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FlightSearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FlightSearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FlightSearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// IATA-style code: non-blank and exactly three characters.
pub fn validate_airport_code(field_name: &str, code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(FlightSearchError::validation(field_name, code, "must not be blank"));
    }
    if code.chars().count() != 3 {
        return Err(FlightSearchError::validation(
            field_name,
            code,
            "must be exactly 3 characters",
        ));
    }
    Ok(())
}

pub fn validate_passenger_count(field_name: &str, count: u8) -> Result<()> {
    if !(MIN_PASSENGERS..=MAX_PASSENGERS).contains(&count) {
        return Err(FlightSearchError::validation(
            field_name,
            count,
            format!("must be between {} and {}", MIN_PASSENGERS, MAX_PASSENGERS),
        ));
    }
    Ok(())
}

impl SearchRequest {
    /// Validating constructor. Building the struct directly skips these checks.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        passenger_count: u8,
    ) -> Result<Self> {
        let request = Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date,
            return_date,
            passenger_count,
        };
        request.validate()?;
        Ok(request)
    }
}

impl Validate for SearchRequest {
    fn validate(&self) -> Result<()> {
        validate_airport_code("origin", &self.origin)?;
        validate_airport_code("destination", &self.destination)?;
        validate_passenger_count("passengerCount", self.passenger_count)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).unwrap()
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://example.com").is_ok());
        assert!(validate_url("base_url", "http://example.com/flights").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("http.timeout_seconds", 10u64, 1, 120).is_ok());
        assert!(validate_range("http.timeout_seconds", 0u64, 1, 120).is_err());
        assert!(validate_range("http.timeout_seconds", 121u64, 1, 120).is_err());
    }

    #[test]
    fn test_validate_airport_code() {
        assert!(validate_airport_code("origin", "LHR").is_ok());
        assert!(validate_airport_code("origin", "   ").is_err());
        assert!(validate_airport_code("origin", "").is_err());
        assert!(validate_airport_code("origin", "LH").is_err());
        assert!(validate_airport_code("origin", "LHRX").is_err());
    }

    #[test]
    fn test_validate_passenger_count() {
        assert!(validate_passenger_count("passengerCount", 1).is_ok());
        assert!(validate_passenger_count("passengerCount", 4).is_ok());
        assert!(validate_passenger_count("passengerCount", 0).is_err());
        assert!(validate_passenger_count("passengerCount", 5).is_err());
    }

    #[test]
    fn test_search_request_new_rejects_invalid_input() {
        assert!(SearchRequest::new("LHR", "AMS", date(20), date(25), 2).is_ok());

        let err = SearchRequest::new("LONDON", "AMS", date(20), date(25), 2).unwrap_err();
        assert_eq!(err.http_status(), 400);
        assert!(matches!(
            err,
            FlightSearchError::ValidationError { ref field, .. } if field == "origin"
        ));

        let err = SearchRequest::new("LHR", "AMS", date(20), date(25), 9).unwrap_err();
        assert!(matches!(
            err,
            FlightSearchError::ValidationError { ref field, .. } if field == "passengerCount"
        ));
    }
}
