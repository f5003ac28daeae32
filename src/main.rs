use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use aqi_calculator::calculation::{PM10_BREAKPOINTS, PM25_BREAKPOINTS, validate_breakpoints};
use aqi_calculator::cli::Cli;
use aqi_calculator::config::ConfigLoader;
use aqi_calculator::error::EngineResult;
use aqi_calculator::models::Pollutant;
use aqi_calculator::service;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn start(cli: Cli) -> EngineResult<()> {
    validate_breakpoints(Pollutant::Pm25, &PM25_BREAKPOINTS)?;
    validate_breakpoints(Pollutant::Pm10, &PM10_BREAKPOINTS)?;

    let loader = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration file");
            ConfigLoader::load(path)?
        }
        None => ConfigLoader::defaults(),
    };
    let config = loader.resolve(cli.overrides())?;

    service::run(config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match start(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "aqi-calculator failed");
            ExitCode::FAILURE
        }
    }
}
