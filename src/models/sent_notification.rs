use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::{RunQueryDsl, SqliteConnection};
use serde_derive::{Deserialize, Serialize};

use crate::schema::sent_notifications::dsl::*;

#[derive(Queryable, Identifiable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::sent_notifications)]
pub struct SentNotification {
    pub id: i32,
    pub target: String,
    pub title: String,
    pub message: String,
    pub icon: Option<String>,
    pub success: bool,
    pub response_message: Option<String>,
    pub sent_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::sent_notifications)]
pub struct NewSentNotification {
    pub target: String,
    pub title: String,
    pub message: String,
    pub icon: Option<String>,
    pub success: bool,
    pub response_message: Option<String>,
    pub sent_at: NaiveDateTime,
}

impl SentNotification {
    pub fn create(record: &NewSentNotification, conn: &mut SqliteConnection) -> Result<usize, diesel::result::Error> {
        diesel::insert_into(sent_notifications)
            .values(record)
            .execute(conn)
    }

    // Newest first
    pub fn latest(limit: i64, conn: &mut SqliteConnection) -> Result<Vec<SentNotification>, diesel::result::Error> {
        sent_notifications
            .order(id.desc())
            .limit(limit)
            .load::<SentNotification>(conn)
    }
}
