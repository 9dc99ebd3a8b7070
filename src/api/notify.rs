use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use log::{error, info, warn};

use crate::api::AppState;
use crate::models::acknowledgement::Acknowledgement;
use crate::models::notification_payload::NotificationPayload;
use crate::models::received_notification::NewReceivedNotification;
use crate::notifier::NotificationError;

pub async fn post_notify(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    body: Bytes,
) -> Response {
    let payload = match NotificationPayload::from_json(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Error parsing JSON: {:?}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
    }

    let source = connect_info.map(|ConnectInfo(addr)| addr.to_string());
    let (status, ack) = deliver(&state, &payload, source).await;

    (status, Json(ack)).into_response()
}

pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed. Use POST.")
}

/// Records a validated payload, shows it, and builds the acknowledgement.
///
/// The received record is written before the notifier runs, so it exists
/// even when rendering fails. The acknowledgement is produced only after
/// the notifier returns.
pub async fn deliver(
    state: &AppState,
    payload: &NotificationPayload,
    source: Option<String>,
) -> (StatusCode, Acknowledgement) {
    info!("Received notification: '{}' - '{}'", payload.title, payload.message);

    state
        .audit
        .record_received(NewReceivedNotification::from_payload(payload, source))
        .await;

    let shown = state.notifier.notify(&payload.title, &payload.message, payload.icon());
    let result = match state.notify_timeout {
        Some(limit) => tokio::time::timeout(limit, shown)
            .await
            .unwrap_or(Err(NotificationError::TimedOut(limit))),
        None => shown.await,
    };

    match result {
        Ok(()) => (StatusCode::OK, Acknowledgement::displayed(state.clock.now())),
        Err(e) => {
            error!("Error displaying notification: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Acknowledgement::failed(e, state.clock.now()))
        }
    }
}
