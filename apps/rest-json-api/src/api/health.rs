//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

/// Create a readiness router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - pings every configured MongoDB host
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let checks: Vec<(String, HealthCheckFuture)> = state
        .clients
        .iter()
        .map(|(host, client)| {
            let check: HealthCheckFuture = Box::pin(async move {
                let status = database::mongodb::check_health_detailed(client).await;
                if status.healthy {
                    Ok(())
                } else {
                    Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
                }
            });
            (host.clone(), check)
        })
        .collect();

    run_health_checks(checks).await
}
