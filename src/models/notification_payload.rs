use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

/// Notification sent over the wire to `/notify`.
///
/// Missing `title` or `message` fields decode as empty strings so that they
/// are reported by [`NotificationPayload::validate`] rather than as a JSON error.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NotificationPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Both title and message are required")]
    MissingField,

    #[error("Invalid JSON format")]
    InvalidJson(String),
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, message: impl Into<String>, icon: Option<&str>) -> Self {
        NotificationPayload {
            title: title.into(),
            message: message.into(),
            icon: icon.filter(|path| !path.is_empty()).map(str::to_string),
        }
    }

    /// Decodes a request body, which must be a JSON object.
    pub fn from_json(body: &[u8]) -> Result<Self, PayloadError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| PayloadError::InvalidJson(e.to_string()))?;

        if !value.is_object() {
            return Err(PayloadError::InvalidJson("expected a JSON object".to_string()));
        }

        serde_json::from_value(value).map_err(|e| PayloadError::InvalidJson(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.title.is_empty() || self.message.is_empty() {
            return Err(PayloadError::MissingField);
        }
        Ok(())
    }

    /// Icon path, `None` when the default icon should be used.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref().filter(|path| !path.is_empty())
    }
}
