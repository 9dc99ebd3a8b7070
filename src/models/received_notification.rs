use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::{RunQueryDsl, SqliteConnection};
use serde_derive::{Deserialize, Serialize};

use crate::models::notification_payload::NotificationPayload;
use crate::schema::received_notifications::dsl::*;

#[derive(Queryable, Identifiable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::received_notifications)]
pub struct ReceivedNotification {
    pub id: i32,
    pub title: String,
    pub message: String,
    pub icon: Option<String>,
    pub source_ip: Option<String>,
    pub received_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::received_notifications)]
pub struct NewReceivedNotification {
    pub title: String,
    pub message: String,
    pub icon: Option<String>,
    pub source_ip: Option<String>,
    pub received_at: NaiveDateTime,
}

impl NewReceivedNotification {
    pub fn from_payload(payload: &NotificationPayload, source: Option<String>) -> Self {
        NewReceivedNotification {
            title: payload.title.clone(),
            message: payload.message.clone(),
            icon: payload.icon().map(str::to_string),
            source_ip: source,
            received_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl ReceivedNotification {
    pub fn create(record: &NewReceivedNotification, conn: &mut SqliteConnection) -> Result<usize, diesel::result::Error> {
        diesel::insert_into(received_notifications)
            .values(record)
            .execute(conn)
    }

    // Newest first
    pub fn latest(limit: i64, conn: &mut SqliteConnection) -> Result<Vec<ReceivedNotification>, diesel::result::Error> {
        received_notifications
            .order(id.desc())
            .limit(limit)
            .load::<ReceivedNotification>(conn)
    }
}
