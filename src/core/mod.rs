pub mod aggregator;

pub use crate::domain::model::{NormalizedOffer, SearchRequest};
pub use crate::domain::ports::FlightSupplier;
pub use crate::utils::error::Result;
