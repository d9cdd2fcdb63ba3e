use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::warn;

use crate::infra::app_state::AppState;

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mut health_status = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    match state.postgres.as_deref() {
        Some(postgres) => match postgres.ping().await {
            Ok(()) => {
                let stats = postgres.pool_stats();
                health_status["checks"]["database"] = json!({
                    "status": "ok",
                    "pool_size": stats.size,
                    "idle_connections": stats.idle,
                    "max_connections": stats.max_size,
                });
            }
            Err(e) => {
                warn!(error = %e, "database health check failed");
                health_status["status"] = json!("unavailable");
                health_status["checks"]["database"] = json!({ "status": "unavailable" });
                return (StatusCode::SERVICE_UNAVAILABLE, Json(health_status));
            }
        },
        None => {
            health_status["checks"]["database"] = json!({ "status": "in-memory" });
        }
    }

    (StatusCode::OK, Json(health_status))
}
