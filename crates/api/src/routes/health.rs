use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness report for load balancers and operators.
#[derive(Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    fn new(db_healthy: bool) -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health
///
/// Always answers 200; a failed database ping only downgrades `status`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    match contentflow_db::health_check(&state.pool).await {
        Ok(()) => Json(HealthResponse::new(true)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            Json(HealthResponse::new(false))
        }
    }
}

/// `/health`, mounted at the root rather than under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
