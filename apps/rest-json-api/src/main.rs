use axum_helpers::server::{create_production_app, create_router, health_router};
use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[derive(Parser)]
#[command(name = "rest-json-api", version)]
#[command(about = "Generic REST resources over MongoDB collections")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "REST_JSON_CONFIG", default_value = "rest-json-mgo.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let cli = Cli::parse();

    // Load configuration; missing required keys abort startup
    let config = Config::load(&cli.config)?;

    // Initialize tracing
    init_tracing(&config.environment, config.verbose);
    for warning in &config.warnings {
        warn!("{}", warning);
    }
    info!(
        path = %cli.config.display(),
        domains = config.domains.len(),
        "Configuration loaded"
    );

    // One pooled client per database host
    let state = AppState::connect(config).await?;

    let api_routes = api::routes(&state).await?;
    let router = create_router(api_routes)?;

    // Merge health endpoints
    let app = router.merge(health_router(state.config.app));

    info!("Starting REST JSON API with production-ready shutdown (30s timeout)");

    let server = state.config.server.clone();
    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        for (host, client) in state.clients {
            client.shutdown().await;
            info!("MongoDB client for {} closed", host);
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("REST JSON API shutdown complete");
    Ok(())
}
