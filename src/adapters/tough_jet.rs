use crate::adapters::http::SupplierEndpoint;
use crate::domain::model::{deserialize_utc_date_time, NormalizedOffer, SearchRequest};
use crate::domain::ports::FlightSupplier;
use crate::utils::error::SupplierError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_NAME: &str = "ToughJet";

/// Record shape of the ToughJet API. The fare has to be assembled from its parts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToughJetFlight {
    carrier: String,
    base_price: f64,
    tax: f64,
    /// Percentage, e.g. `10.0` for ten percent off.
    discount: f64,
    departure_airport_name: String,
    arrival_airport_name: String,
    #[serde(deserialize_with = "deserialize_utc_date_time")]
    outbound_date_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_utc_date_time")]
    inbound_date_time: DateTime<Utc>,
}

/// `(base + tax) * (1 - discount%)`, rounded once to cents.
///
/// The discount applies to the taxed amount; rounding earlier changes the result.
pub fn compute_fare(base_price: f64, tax: f64, discount_percent: f64) -> f64 {
    round_to_cents((base_price + tax) * (1.0 - discount_percent / 100.0))
}

/// Half-up rounding on the cent boundary for non-negative amounts.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[derive(Debug, Clone)]
pub struct ToughJetSupplier {
    endpoint: SupplierEndpoint,
}

impl ToughJetSupplier {
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
            ("from", request.origin.clone()),
            ("to", request.destination.clone()),
            ("outboundDate", request.departure_date.to_string()),
            ("inboundDate", request.return_date.to_string()),
            ("numberOfAdults", request.passenger_count.to_string()),
        ]
    }

    fn normalize(&self, flight: ToughJetFlight) -> NormalizedOffer {
        NormalizedOffer {
            airline: flight.carrier,
            supplier_name: self.endpoint.supplier().to_string(),
            fare: compute_fare(flight.base_price, flight.tax, flight.discount),
            departure_airport_code: flight.departure_airport_name,
            arrival_airport_code: flight.arrival_airport_name,
            departure_date_time: flight.outbound_date_time,
            arrival_date_time: flight.inbound_date_time,
        }
    }
}

#[async_trait]
impl FlightSupplier for ToughJetSupplier {
    fn name(&self) -> &str {
        self.endpoint.supplier()
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<NormalizedOffer>, SupplierError> {
        let flights: Vec<ToughJetFlight> =
            self.endpoint.fetch_records(&Self::query(request)).await?;

        Ok(flights.into_iter().map(|f| self.normalize(f)).collect())
    }
}
