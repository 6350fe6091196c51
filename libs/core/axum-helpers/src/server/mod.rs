//! Server infrastructure module.
//!
//! - Router setup with OpenAPI documentation and common middleware
//! - Health, liveness and readiness endpoints
//! - Graceful shutdown coordination with a bounded cleanup hook
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let app = create_router::<ApiDoc>(api_routes, health_router(app_info!()), cors);
//! create_production_app(app, &config.server, async { /* cleanup */ }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{
    HealthCheckFuture, HealthResponse, LiveResponse, health_router, run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
