use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use catalog_core::product_type::REGISTRY;
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Product types this build accepts, in registry order.
    pub product_types: Vec<&'static str>,
}

/// GET /health
///
/// Answers 503 while the database is unreachable.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let db_healthy = match catalog_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            false
        }
    };

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthStatus {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        product_types: REGISTRY
            .iter()
            .map(|binding| binding.product_type.as_str())
            .collect(),
    };
    (code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
