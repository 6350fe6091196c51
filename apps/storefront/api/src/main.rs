use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod seed;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let state = AppState::new(config);

    if state.config.seed_sample_data {
        seed::seed_sample_data(&state).await?;
    } else {
        info!("SEED_SAMPLE_DATA disabled, starting with empty stores");
    }

    // Docs, health endpoints and middleware around the domain routers
    let app = api::app(&state)?;

    info!(
        timeout = ?state.config.server.shutdown_timeout,
        "Starting storefront API with graceful shutdown"
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, async move {
        let (users, products) = tokio::join!(state.users.count(), state.products.count());
        info!(
            users = users.unwrap_or_default(),
            products = products.unwrap_or_default(),
            "Final store sizes"
        );
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Storefront API shutdown complete");
    Ok(())
}
