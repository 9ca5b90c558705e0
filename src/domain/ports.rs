use crate::domain::model::{NormalizedOffer, SearchRequest};
use crate::utils::error::SupplierError;
use async_trait::async_trait;

/// One upstream flight supplier. New suppliers are added by implementing this
/// trait and registering an instance with the aggregator.
#[async_trait]
pub trait FlightSupplier: Send + Sync {
    /// Identifier stamped on every offer this supplier produces.
    fn name(&self) -> &str;

    /// Makes a single attempt against the supplier and normalizes what it returns.
    async fn search(&self, request: &SearchRequest)
        -> Result<Vec<NormalizedOffer>, SupplierError>;
}
