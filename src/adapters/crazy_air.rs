use crate::adapters::http::SupplierEndpoint;
use crate::domain::model::{deserialize_utc_date_time, NormalizedOffer, SearchRequest};
use crate::domain::ports::FlightSupplier;
use crate::utils::error::SupplierError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_NAME: &str = "CrazyAir";

/// Record shape of the CrazyAir API. Prices are final, no arithmetic needed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrazyAirFlight {
    airline: String,
    price: f64,
    #[serde(default, alias = "cabinclass")]
    #[allow(dead_code)]
    cabin_class: Option<String>,
    departure_airport_code: String,
    destination_airport_code: String,
    #[serde(deserialize_with = "deserialize_utc_date_time")]
    departure_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_utc_date_time")]
    arrival_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CrazyAirSupplier {
    endpoint: SupplierEndpoint,
}

impl CrazyAirSupplier {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self::with_name(client, base_url, DEFAULT_NAME)
    }

    pub fn with_name(client: Client, base_url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            endpoint: SupplierEndpoint::new(client, base_url, name),
        }
    }

    fn query(request: &SearchRequest) -> Vec<(&'static str, String)> {
        vec![
            ("origin", request.origin.clone()),
            ("destination", request.destination.clone()),
            ("departureDate", request.departure_date.to_string()),
            ("returnDate", request.return_date.to_string()),
            ("passengerCount", request.passenger_count.to_string()),
        ]
    }

    fn normalize(&self, flight: CrazyAirFlight) -> NormalizedOffer {
        NormalizedOffer {
            airline: flight.airline,
            supplier_name: self.endpoint.supplier().to_string(),
            fare: flight.price,
            departure_airport_code: flight.departure_airport_code,
            arrival_airport_code: flight.destination_airport_code,
            departure_date_time: flight.departure_date,
            arrival_date_time: flight.arrival_date,
        }
    }
}

#[async_trait]
impl FlightSupplier for CrazyAirSupplier {
    fn name(&self) -> &str {
        self.endpoint.supplier()
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<NormalizedOffer>, SupplierError> {
        let flights: Vec<CrazyAirFlight> =
            self.endpoint.fetch_records(&Self::query(request)).await?;

        Ok(flights.into_iter().map(|f| self.normalize(f)).collect())
    }
}
