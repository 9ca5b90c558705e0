// Adapters layer: one module per upstream supplier, plus the shared HTTP plumbing.

pub mod crazy_air;
pub mod http;
pub mod tough_jet;

use crate::config::toml_config::{SupplierKind, TomlConfig};
use crate::domain::ports::FlightSupplier;
use crate::utils::error::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub use crazy_air::CrazyAirSupplier;
pub use http::SupplierEndpoint;
pub use tough_jet::ToughJetSupplier;

/// Builds the transport shared by all suppliers. This is where the request timeout lives.
pub fn build_http_client(config: &TomlConfig) -> Result<Client> {
    let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_seconds()));
    if let Some(user_agent) = config.user_agent() {
        builder = builder.user_agent(user_agent.to_string());
    }
    Ok(builder.build()?)
}

/// Instantiates every enabled supplier, in the order they appear in the configuration.
pub fn build_suppliers(config: &TomlConfig) -> Result<Vec<Arc<dyn FlightSupplier>>> {
    let client = build_http_client(config)?;

    let suppliers = config
        .enabled_suppliers()
        .map(|supplier| -> Arc<dyn FlightSupplier> {
            tracing::debug!(
                "Registering supplier {} ({:?}) at {}",
                supplier.name(),
                supplier.kind,
                supplier.base_url
            );
            match supplier.kind {
                SupplierKind::CrazyAir => Arc::new(CrazyAirSupplier::with_name(
                    client.clone(),
                    supplier.base_url.clone(),
                    supplier.name(),
                )),
                SupplierKind::ToughJet => Arc::new(ToughJetSupplier::with_name(
                    client.clone(),
                    supplier.base_url.clone(),
                    supplier.name(),
                )),
            }
        })
        .collect();

    Ok(suppliers)
}
