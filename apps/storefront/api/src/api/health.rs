//! Readiness and detailed health, backed by the in-memory stores.

use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status of one store in `GET /health/detailed`
#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl StoreHealth {
    fn from_count<E: std::fmt::Display>(store: &str, count: Result<usize, E>) -> Self {
        match count {
            Ok(count) => Self {
                status: "UP",
                count: Some(count),
            },
            Err(e) => {
                tracing::error!(store, error = %e, "Store check failed");
                Self {
                    status: "DOWN",
                    count: None,
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Stores {
    pub users: StoreHealth,
    pub products: StoreHealth,
}

/// Body of `GET /health/detailed`
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    /// `UP` when every store answers, `DEGRADED` otherwise
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub application: &'static str,
    pub version: &'static str,
    pub stores: Stores,
}

/// Readiness check: every store must answer a count query.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "users",
            Box::pin(async {
                state
                    .users
                    .count()
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("Users store check failed: {}", e))
            }),
        ),
        (
            "products",
            Box::pin(async {
                state
                    .products
                    .count()
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("Products store check failed: {}", e))
            }),
        ),
    ];

    run_health_checks(checks).await.into_response()
}

/// Health plus per-store record counts.
pub async fn detailed_handler(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let (users, products) = tokio::join!(state.users.count(), state.products.count());

    let stores = Stores {
        users: StoreHealth::from_count("users", users),
        products: StoreHealth::from_count("products", products),
    };
    let status = if stores.users.status == "UP" && stores.products.status == "UP" {
        "UP"
    } else {
        "DEGRADED"
    };

    Json(DetailedHealthResponse {
        status,
        timestamp: Utc::now(),
        application: state.config.app.name,
        version: state.config.app.version,
        stores,
    })
}
