use chrono::{DateTime, FixedOffset};
use serde_derive::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "network-notifier";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub time: DateTime<FixedOffset>,
    pub service: String,
}

impl HealthStatus {
    pub fn healthy(time: DateTime<FixedOffset>) -> Self {
        HealthStatus {
            status: "healthy".to_string(),
            time,
            service: SERVICE_NAME.to_string(),
        }
    }
}
