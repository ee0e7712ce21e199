//! Freelance Rate Engine HTTP server.
//!
//! Loads the reference data once, then serves the quote and lookup
//! endpoints until shut down.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use freelance_rate_engine::api::{AppState, create_router};
use freelance_rate_engine::config::ReferenceDataLoader;

#[derive(Debug, Clone, Parser)]
#[command(name = "rate-engine", about = "Hourly rate engine for freelancers")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "RATE_ENGINE_ADDR", default_value = "0.0.0.0:8787")]
    addr: SocketAddr,

    /// Directory holding calculator.yaml, professions.yaml, states.yaml and locations.yaml
    #[arg(long, env = "RATE_ENGINE_CONFIG_DIR", default_value = "./config/reference")]
    config_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let reference = ReferenceDataLoader::load(&cli.config_dir).with_context(|| {
        format!(
            "failed to load reference data from {}",
            cli.config_dir.display()
        )
    })?;
    let stats = reference.stats();
    info!(
        config_dir = %cli.config_dir.display(),
        professions = reference.data().professions().len(),
        states = reference.data().states().len(),
        cities = stats.total_cities,
        countries = stats.countries,
        "Reference data loaded"
    );

    let app = create_router(AppState::new(reference));

    let listener = tokio::net::TcpListener::bind(cli.addr)
        .await
        .with_context(|| format!("failed to bind {}", cli.addr))?;
    info!(addr = %cli.addr, "Rate engine listening");

    axum::serve(listener, app).await?;

    Ok(())
}
