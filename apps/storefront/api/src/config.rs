use axum_helpers::{create_cors_layer, create_permissive_cors_layer, parse_allowed_origins};
use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use tower_http::cors::CorsLayer;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Populate empty stores with sample users and products at startup
    pub seed_sample_data: bool,
    /// Raw `CORS_ALLOWED_ORIGIN`, comma-separated
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let seed_sample_data = env_parse("SEED_SAMPLE_DATA", true)?;
        let cors_allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|raw| !raw.trim().is_empty());

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            seed_sample_data,
            cors_allowed_origin,
        })
    }

    /// CORS layer for the configured origins.
    ///
    /// Without `CORS_ALLOWED_ORIGIN`, development falls back to a permissive
    /// layer and production refuses to start.
    pub fn cors_layer(&self) -> eyre::Result<CorsLayer> {
        match (&self.cors_allowed_origin, self.environment.is_production()) {
            (Some(raw), _) => {
                let origins = parse_allowed_origins(raw)?;
                Ok(create_cors_layer(origins))
            }
            (None, false) => {
                tracing::warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
                Ok(create_permissive_cors_layer())
            }
            (None, true) => Err(eyre::eyre!(
                "CORS_ALLOWED_ORIGIN must be set when APP_ENV=production"
            )),
        }
    }
}
