use chrono::{DateTime, FixedOffset};
use serde_derive::{Deserialize, Serialize};

pub const DISPLAYED_MESSAGE: &str = "Notification displayed successfully";

/// Server reply to a delivery attempt on `/notify`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
    pub time: DateTime<FixedOffset>,
}

impl Acknowledgement {
    pub fn displayed(time: DateTime<FixedOffset>) -> Self {
        Acknowledgement {
            success: true,
            message: DISPLAYED_MESSAGE.to_string(),
            time,
        }
    }

    pub fn failed(detail: impl std::fmt::Display, time: DateTime<FixedOffset>) -> Self {
        Acknowledgement {
            success: false,
            message: format!("Failed to display notification: {}", detail),
            time,
        }
    }
}
