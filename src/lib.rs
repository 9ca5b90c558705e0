pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LogFormat};

pub use adapters::{CrazyAirSupplier, ToughJetSupplier};
pub use config::toml_config::TomlConfig;
pub use core::aggregator::FlightAggregator;
pub use domain::model::{NormalizedOffer, SearchRequest};
pub use domain::ports::FlightSupplier;
pub use utils::error::{AggregateError, FlightSearchError, Result, SupplierError};
