use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use log::{error, info};
use serde_derive::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::api::health::get_health;
use crate::api::history::{get_received_history, get_sent_history};
use crate::api::notify::{method_not_allowed, post_notify};
use crate::audit::AuditLog;
use crate::common::clock::MonotonicClock;
use crate::config::ServerConf;
use crate::notifier::Notifier;

mod health;
mod history;
mod notify;

pub use notify::deliver;

/// Everything a request handler can reach. Shared by all requests.
pub struct AppState {
    pub audit: AuditLog,
    pub notifier: Arc<dyn Notifier>,
    pub clock: MonotonicClock,
    pub notify_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(audit: AuditLog, notifier: Arc<dyn Notifier>) -> Self {
        AppState {
            audit,
            notifier,
            clock: MonotonicClock::new(),
            notify_timeout: None,
        }
    }

    pub fn with_notify_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.notify_timeout = timeout;
        self
    }
}

#[derive(Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/notify", post(post_notify).fallback(method_not_allowed))
        .route("/health", get(get_health))
        .route("/history/sent", get(get_sent_history))
        .route("/history/received", get(get_received_history))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the relay on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

pub async fn init(server_conf: &ServerConf, state: Arc<AppState>) -> std::io::Result<()> {
    let address = format!("{}:{}", server_conf.address, server_conf.port);

    let listener = TcpListener::bind(&address).await?;
    info!("Notification server listening on http://{}", address);
    info!("Ready to receive notifications at http://{}/notify", address);
    info!("Health check available at http://{}/health", address);

    serve(listener, state, async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received CTRL+C, shutting down"),
            Err(e) => {
                error!("Failed to listen for CTRL+C: {}", e);
                std::future::pending::<()>().await
            }
        }
    })
    .await
}

pub fn internal_error<E>(err: E) -> (StatusCode, Json<ErrorMessage>) where E: std::error::Error, {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorMessage { message: err.to_string() }))
}
