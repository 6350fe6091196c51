use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use chrono::{DateTime, Utc};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

/// Body of `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `UP` while the process is serving requests
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub application: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn up(app: AppInfo) -> Self {
        Self {
            status: "UP",
            timestamp: Utc::now(),
            application: app.name,
            version: app.version,
        }
    }
}

/// Body of `GET /health/live`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LiveResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub message: &'static str,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs readiness checks concurrently and aggregates the results.
///
/// All passing gives `200 {"status": "READY", ...}`. Any failure gives
/// `503 {"status": "NOT_READY", ...}`. Each check is reported under
/// `checks.<name>` as `UP` or `DOWN`.
///
/// # Example
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
///     ("users_store", Box::pin(async {
///         users.count().await.map(|_| ()).map_err(|e| e.to_string())
///     })),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> (StatusCode, Json<Value>) {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let futures: Vec<_> = checks.into_iter().map(|(_, check)| check).collect();
    let results = join_all(futures).await;

    let mut statuses = Map::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(()) => {
                statuses.insert(name.to_string(), json!("UP"));
            }
            Err(e) => {
                tracing::error!("Readiness check failed: {} error: {:?}", name, e);
                statuses.insert(name.to_string(), json!("DOWN"));
                all_healthy = false;
            }
        }
    }

    let (status, label, message) = if all_healthy {
        (StatusCode::OK, "READY", "Application is ready to handle requests")
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "NOT_READY",
            "One or more dependencies are unavailable",
        )
    };

    let body = json!({
        "status": label,
        "timestamp": Utc::now(),
        "message": message,
        "checks": statuses,
    });

    (status, Json(body))
}

/// Health check endpoint handler.
///
/// Always returns 200 while the service is running.
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    tracing::debug!("Health check requested");
    Json(HealthResponse::up(app))
}

/// Liveness endpoint handler.
pub async fn live_handler() -> Json<LiveResponse> {
    Json(LiveResponse {
        status: "ALIVE",
        timestamp: Utc::now(),
        message: "Application is running",
    })
}

/// Creates a router with `/health` and `/health/live`.
///
/// Readiness and detailed health depend on application state, so the app
/// adds those itself (see [`run_health_checks`]).
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let root = health_router(app_info!()).merge(api::health::router(state));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/live", get(live_handler))
        .with_state(app_info)
}
