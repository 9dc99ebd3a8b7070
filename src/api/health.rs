use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::models::health::HealthStatus;

// Always healthy: does not touch the notifier or the audit store.
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(state.clock.now()))
}
