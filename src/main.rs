use clap::Parser;
use flight_search::utils::error::{ErrorSeverity, FlightSearchError};
use flight_search::utils::{logger, validation::Validate};
use flight_search::{CliConfig, FlightAggregator, LogFormat, SearchRequest, TomlConfig};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("🚀 Starting flight-search");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Flight search failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: &CliConfig) -> Result<(), FlightSearchError> {
    config.validate()?;
    let request = config.search_request()?;

    tracing::info!("📁 Loading configuration from: {}", config.config);
    let toml_config = TomlConfig::from_file(&config.config)?;
    toml_config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no supplier will be called");
        return perform_dry_run(&toml_config, &request);
    }

    let aggregator = FlightAggregator::from_config(&toml_config)?;
    let offers = aggregator.search(&request).await?;

    tracing::info!("✅ Found {} offers", offers.len());
    println!("{}", serde_json::to_string_pretty(&offers)?);
    Ok(())
}

fn perform_dry_run(config: &TomlConfig, request: &SearchRequest) -> Result<(), FlightSearchError> {
    let suppliers: Vec<serde_json::Value> = config
        .enabled_suppliers()
        .map(|s| {
            serde_json::json!({
                "name": s.name(),
                "kind": s.kind,
                "baseUrl": s.base_url,
            })
        })
        .collect();

    let summary = serde_json::json!({
        "service": config.service.name,
        "timeoutSeconds": config.timeout_seconds(),
        "request": request,
        "suppliers": suppliers,
    });

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
