use axum::{Router, routing::get};
use axum_helpers::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Domain routers get their own clone of the services; clones share the
/// underlying stores.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", domain_users::handlers::router(state.users.clone()))
        .nest(
            "/products",
            domain_products::handlers::router(state.products.clone()),
        )
}

/// Health endpoints mounted at the root, outside `/api`.
///
/// - `/health`, `/health/live`: process-level, from axum-helpers
/// - `/health/ready`, `/health/detailed`: query the stores
pub fn health_routes(state: AppState) -> Router {
    let app = state.config.app;

    Router::new()
        .route("/health/ready", get(health::ready_handler))
        .route("/health/detailed", get(health::detailed_handler))
        .with_state(state)
        .merge(health_router(app))
}

/// Full application router with docs and middleware.
pub fn app(state: &AppState) -> eyre::Result<Router> {
    let cors = state.config.cors_layer()?;
    Ok(create_router::<ApiDoc>(
        routes(state),
        health_routes(state.clone()),
        cors,
    ))
}
