//! Append-only audit trail of sent and received notifications.
//!
//! [`AuditStore`] is the storage seam; [`AuditLog`] is what the relay server
//! and client hold. Writes through [`AuditLog`] are best-effort: failures are
//! logged and never reach the caller. Reads surface every failure, including
//! a log that was never backed by a store.

mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};
use thiserror::Error;

use crate::models::received_notification::{NewReceivedNotification, ReceivedNotification};
use crate::models::sent_notification::{NewSentNotification, SentNotification};

pub use sqlite::SqliteAuditStore;

pub const DEFAULT_HISTORY_LIMIT: i64 = 100;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Database not initialized")]
    Uninitialized,

    #[error("Could not get a database connection: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Database query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn record_sent(&self, record: NewSentNotification) -> Result<(), AuditError>;

    async fn record_received(&self, record: NewReceivedNotification) -> Result<(), AuditError>;

    /// At most `limit` rows, newest first.
    async fn list_sent(&self, limit: i64) -> Result<Vec<SentNotification>, AuditError>;

    /// At most `limit` rows, newest first.
    async fn list_received(&self, limit: i64) -> Result<Vec<ReceivedNotification>, AuditError>;
}

#[derive(Clone)]
pub struct AuditLog {
    store: Option<Arc<dyn AuditStore>>,
    history_limit: i64,
}

impl AuditLog {
    pub fn new(store: Arc<dyn AuditStore>, history_limit: i64) -> Self {
        AuditLog {
            store: Some(store),
            history_limit: history_limit.max(1),
        }
    }

    /// A log with no backing store; writes are skipped and reads fail.
    pub fn disabled() -> Self {
        AuditLog {
            store: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub async fn record_sent(&self, record: NewSentNotification) {
        let Some(store) = &self.store else {
            debug!("Database not initialized, cannot log sent notification");
            return;
        };

        if let Err(e) = store.record_sent(record).await {
            error!("Failed to log sent notification: {}", e);
        }
    }

    pub async fn record_received(&self, record: NewReceivedNotification) {
        let Some(store) = &self.store else {
            debug!("Database not initialized, cannot log received notification");
            return;
        };

        if let Err(e) = store.record_received(record).await {
            error!("Failed to log received notification: {}", e);
        }
    }

    pub async fn list_sent(&self, limit: Option<i64>) -> Result<Vec<SentNotification>, AuditError> {
        let store = self.store.as_ref().ok_or(AuditError::Uninitialized)?;
        store.list_sent(self.clamp(limit)).await
    }

    pub async fn list_received(&self, limit: Option<i64>) -> Result<Vec<ReceivedNotification>, AuditError> {
        let store = self.store.as_ref().ok_or(AuditError::Uninitialized)?;
        store.list_received(self.clamp(limit)).await
    }

    fn clamp(&self, limit: Option<i64>) -> i64 {
        limit.unwrap_or(self.history_limit).clamp(1, self.history_limit)
    }
}
