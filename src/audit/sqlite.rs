use async_trait::async_trait;
use log::info;

use crate::audit::{AuditError, AuditStore};
use crate::common::db::{create_tables, establish_pool, DatabasePool};
use crate::models::received_notification::{NewReceivedNotification, ReceivedNotification};
use crate::models::sent_notification::{NewSentNotification, SentNotification};

/// Audit store backed by a sqlite file. diesel is blocking, so every call
/// runs on the blocking thread pool.
#[derive(Clone)]
pub struct SqliteAuditStore {
    pool: DatabasePool,
}

impl SqliteAuditStore {
    /// Opens the database and creates both tables if they are missing.
    pub fn open(database_url: &str) -> Result<Self, AuditError> {
        let pool = establish_pool(database_url)?;
        let mut conn = pool.get()?;
        create_tables(&mut conn)?;

        info!("Database initialized successfully");
        Ok(SqliteAuditStore { pool })
    }
}

#[async_trait]
impl AuditStore for SqliteAuditStore {
    async fn record_sent(&self, record: NewSentNotification) -> Result<(), AuditError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<(), AuditError> {
            let mut conn = pool.get()?;
            SentNotification::create(&record, &mut conn)?;
            Ok(())
        })
        .await?
    }

    async fn record_received(&self, record: NewReceivedNotification) -> Result<(), AuditError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<(), AuditError> {
            let mut conn = pool.get()?;
            ReceivedNotification::create(&record, &mut conn)?;
            Ok(())
        })
        .await?
    }

    async fn list_sent(&self, limit: i64) -> Result<Vec<SentNotification>, AuditError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<SentNotification>, AuditError> {
            let mut conn = pool.get()?;
            Ok(SentNotification::latest(limit, &mut conn)?)
        })
        .await?
    }

    async fn list_received(&self, limit: i64) -> Result<Vec<ReceivedNotification>, AuditError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<ReceivedNotification>, AuditError> {
            let mut conn = pool.get()?;
            Ok(ReceivedNotification::latest(limit, &mut conn)?)
        })
        .await?
    }
}
