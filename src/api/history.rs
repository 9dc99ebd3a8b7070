use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use http::StatusCode;
use serde_derive::Deserialize;

use crate::api::{internal_error, AppState, ErrorMessage};
use crate::audit::AuditError;
use crate::models::received_notification::ReceivedNotification;
use crate::models::sent_notification::SentNotification;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

pub async fn get_sent_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<SentNotification>>, (StatusCode, Json<ErrorMessage>)> {
    state.audit.list_sent(query.limit).await.map(Json).map_err(history_error)
}

pub async fn get_received_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ReceivedNotification>>, (StatusCode, Json<ErrorMessage>)> {
    state.audit.list_received(query.limit).await.map(Json).map_err(history_error)
}

fn history_error(err: AuditError) -> (StatusCode, Json<ErrorMessage>) {
    match err {
        AuditError::Uninitialized => (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorMessage { message: err.to_string() })),
        err => internal_error(err),
    }
}
