pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::SearchRequest;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "flight-search")]
#[command(about = "Search flights across all configured suppliers, cheapest first")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "flight-search.toml")]
    pub config: String,

    /// 3-letter origin airport code
    #[arg(long)]
    pub origin: String,

    /// 3-letter destination airport code
    #[arg(long)]
    pub destination: String,

    /// Outbound date, YYYY-MM-DD
    #[arg(long)]
    pub departure_date: NaiveDate,

    /// Return date, YYYY-MM-DD
    #[arg(long)]
    pub return_date: NaiveDate,

    /// Number of passengers (1-4)
    #[arg(long, default_value = "1")]
    pub passengers: u8,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    /// Validate input and show the suppliers that would be called, without calling them
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn search_request(&self) -> Result<SearchRequest> {
        SearchRequest::new(
            self.origin.clone(),
            self.destination.clone(),
            self.departure_date,
            self.return_date,
            self.passengers,
        )
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("config", &self.config)?;
        self.search_request().map(|_| ())
    }
}
