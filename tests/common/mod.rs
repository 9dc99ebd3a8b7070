#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::net::TcpListener;

use network_notifier::api::{self, AppState};
use network_notifier::audit::{AuditLog, SqliteAuditStore};
use network_notifier::notifier::{NotificationError, Notifier};

/// Notifier that counts calls and can fail, stall, or look at the audit log
/// at the moment it is invoked.
#[derive(Default)]
pub struct FakeNotifier {
    calls: AtomicUsize,
    failure: Option<String>,
    delay: Option<Duration>,
    audit: Option<AuditLog>,
    received_at_call: Mutex<Vec<usize>>,
}

impl FakeNotifier {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn failing_with(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }

    pub fn stalling_for(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn watching(mut self, audit: AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of received records that existed at each call.
    pub fn received_at_call(&self) -> Vec<usize> {
        self.received_at_call.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn notify(&self, _title: &str, _message: &str, _icon: Option<&str>) -> Result<(), NotificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(audit) = &self.audit {
            let seen = audit.list_received(None).await.map(|rows| rows.len()).unwrap_or(0);
            self.received_at_call.lock().unwrap().push(seen);
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.failure {
            Some(reason) => Err(NotificationError::SendFailed(reason.clone())),
            None => Ok(()),
        }
    }
}

pub fn temp_audit() -> (TempDir, AuditLog) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notify.db");
    let store = SqliteAuditStore::open(path.to_str().unwrap()).unwrap();
    (dir, AuditLog::new(Arc::new(store), 100))
}

/// Starts a relay server on an ephemeral localhost port.
pub async fn spawn_relay(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(api::serve(listener, Arc::new(state), std::future::pending()));

    addr
}
