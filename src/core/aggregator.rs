use crate::adapters::build_suppliers;
use crate::config::toml_config::TomlConfig;
use crate::core::{FlightSupplier, NormalizedOffer, SearchRequest};
use crate::utils::error::{AggregateError, SupplierError};
use std::sync::Arc;
use std::time::Instant;

/// Fans a search out to every registered supplier and merges the answers, cheapest first.
///
/// Registration order is significant: it decides which supplier's failure is reported when
/// all of them fail, and the order of offers with equal fares.
#[derive(Clone, Default)]
pub struct FlightAggregator {
    suppliers: Vec<Arc<dyn FlightSupplier>>,
}

impl FlightAggregator {
    pub fn new(suppliers: Vec<Arc<dyn FlightSupplier>>) -> Self {
        Self { suppliers }
    }

    pub fn from_config(config: &TomlConfig) -> crate::utils::error::Result<Self> {
        Ok(Self::new(build_suppliers(config)?))
    }

    pub fn register(&mut self, supplier: Arc<dyn FlightSupplier>) {
        self.suppliers.push(supplier);
    }

    pub fn with_supplier(mut self, supplier: Arc<dyn FlightSupplier>) -> Self {
        self.register(supplier);
        self
    }

    pub fn supplier_names(&self) -> Vec<&str> {
        self.suppliers.iter().map(|s| s.name()).collect()
    }

    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<NormalizedOffer>, AggregateError> {
        if self.suppliers.is_empty() {
            return Err(AggregateError::NoSuppliers);
        }

        let started = Instant::now();
        tracing::info!(
            "Searching {} suppliers for {} -> {} ({} to {}, {} passengers)",
            self.suppliers.len(),
            request.origin,
            request.destination,
            request.departure_date,
            request.return_date,
            request.passenger_count
        );

        let request = Arc::new(request.clone());
        let handles: Vec<_> = self
            .suppliers
            .iter()
            .map(|supplier| {
                let supplier = Arc::clone(supplier);
                let request = Arc::clone(&request);
                tokio::spawn(async move { supplier.search(&request).await })
            })
            .collect();

        // Awaiting in registration order, every task is already running.
        let mut outcomes = Vec::with_capacity(handles.len());
        for (supplier, handle) in self.suppliers.iter().zip(handles) {
            let outcome = handle.await.unwrap_or_else(|e| {
                Err(SupplierError::Interrupted {
                    supplier: supplier.name().to_string(),
                    reason: e.to_string(),
                })
            });
            outcomes.push(outcome);
        }

        let result = merge_outcomes(outcomes);
        match &result {
            Ok(offers) => tracing::info!(
                "Search finished with {} offers in {:?}",
                offers.len(),
                started.elapsed()
            ),
            Err(e) => tracing::error!("Search failed after {:?}: {}", started.elapsed(), e),
        }
        result
    }
}

impl std::fmt::Debug for FlightAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightAggregator")
            .field("suppliers", &self.supplier_names())
            .finish()
    }
}

/// Combines per-supplier outcomes given in registration order.
///
/// Fails only when every outcome is a failure, reporting the first one. Otherwise failures
/// are dropped and the offers are concatenated, then stably sorted by fare.
pub fn merge_outcomes(
    outcomes: Vec<Result<Vec<NormalizedOffer>, SupplierError>>,
) -> Result<Vec<NormalizedOffer>, AggregateError> {
    let attempted = outcomes.len();
    let mut offers = Vec::new();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(supplier_offers) => {
                tracing::debug!("Supplier returned {} offers", supplier_offers.len());
                offers.extend(supplier_offers);
            }
            Err(e) => failures.push(e),
        }
    }

    if failures.len() == attempted {
        if let Some(first_cause) = failures.into_iter().next() {
            return Err(AggregateError::AllSuppliersFailed {
                attempted,
                first_cause,
            });
        }
        return Ok(offers);
    }

    for failure in &failures {
        tracing::warn!("Dropping results of failed supplier {}: {}", failure.supplier(), failure);
    }

    sort_by_fare(&mut offers);
    Ok(offers)
}

/// Ascending by fare. `sort_by` is stable, so equal fares keep their incoming order.
pub fn sort_by_fare(offers: &mut [NormalizedOffer]) {
    offers.sort_by(|a, b| a.fare.total_cmp(&b.fare));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{AggregateErrorKind, SupplierErrorKind};
    use chrono::{TimeZone, Utc};

    fn offer(supplier: &str, airline: &str, fare: f64) -> NormalizedOffer {
        NormalizedOffer {
            airline: airline.to_string(),
            supplier_name: supplier.to_string(),
            fare,
            departure_airport_code: "LHR".to_string(),
            arrival_airport_code: "AMS".to_string(),
            departure_date_time: Utc.with_ymd_and_hms(2025, 7, 20, 10, 0, 0).unwrap(),
            arrival_date_time: Utc.with_ymd_and_hms(2025, 7, 20, 12, 0, 0).unwrap(),
        }
    }

    fn fares(offers: &[NormalizedOffer]) -> Vec<f64> {
        offers.iter().map(|o| o.fare).collect()
    }

    #[test]
    fn test_merge_sorts_ascending_by_fare() {
        let merged = merge_outcomes(vec![
            Ok(vec![offer("A", "a1", 292.0), offer("A", "a2", 123.45)]),
            Ok(vec![offer("B", "b1", 99.0)]),
        ])
        .unwrap();

        assert_eq!(fares(&merged), vec![99.0, 123.45, 292.0]);
    }

    #[test]
    fn test_merge_keeps_registration_order_for_equal_fares() {
        let merged = merge_outcomes(vec![
            Ok(vec![offer("A", "a1", 150.0)]),
            Ok(vec![offer("B", "b1", 150.0), offer("B", "b2", 100.0)]),
        ])
        .unwrap();

        let airlines: Vec<&str> = merged.iter().map(|o| o.airline.as_str()).collect();
        assert_eq!(airlines, vec!["b2", "a1", "b1"]);
    }

    #[test]
    fn test_merge_drops_failures_when_any_supplier_succeeds() {
        let merged = merge_outcomes(vec![
            Err(SupplierError::bad_response("A", 500, "server error")),
            Ok(vec![offer("B", "b1", 10.0)]),
        ])
        .unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].supplier_name, "B");
    }

    #[test]
    fn test_merge_treats_empty_success_as_success() {
        let merged = merge_outcomes(vec![
            Ok(vec![]),
            Err(SupplierError::bad_response("B", 502, "bad gateway")),
        ])
        .unwrap();

        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_reports_first_failure_in_registration_order() {
        let err = merge_outcomes(vec![
            Err(SupplierError::bad_response("A", 500, "server error")),
            Err(SupplierError::Interrupted {
                supplier: "B".to_string(),
                reason: "panicked".to_string(),
            }),
        ])
        .unwrap_err();

        assert_eq!(err.kind(), AggregateErrorKind::AllSuppliersFailed);
        let first = err.first_cause().unwrap();
        assert_eq!(first.supplier(), "A");
        assert_eq!(first.kind(), SupplierErrorKind::BadResponse);
    }

    #[test]
    fn test_sort_by_fare_handles_identical_fares_stably() {
        let mut offers = vec![
            offer("A", "first", 50.0),
            offer("A", "second", 50.0),
            offer("A", "third", 50.0),
        ];
        sort_by_fare(&mut offers);
        let airlines: Vec<&str> = offers.iter().map(|o| o.airline.as_str()).collect();
        assert_eq!(airlines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_aggregator_refuses_to_search() {
        let aggregator = FlightAggregator::default();
        let request = SearchRequest {
            origin: "LHR".to_string(),
            destination: "AMS".to_string(),
            departure_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
            return_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 25).unwrap(),
            passenger_count: 1,
        };

        let err = tokio_test::block_on(aggregator.search(&request)).unwrap_err();
        assert_eq!(err.kind(), AggregateErrorKind::NoSuppliers);
    }
}
