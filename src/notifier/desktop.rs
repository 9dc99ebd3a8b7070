use async_trait::async_trait;

use crate::notifier::{NotificationError, Notifier};

const DEFAULT_ICON: &str = "dialog-information";

/// Cross-platform notifier using notify-rust
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            app_name: "Network Notifier".to_string(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, title: &str, message: &str, icon: Option<&str>) -> Result<(), NotificationError> {
        let title = title.to_owned();
        let message = message.to_owned();
        let app_name = self.app_name.clone();
        let icon = icon.unwrap_or(DEFAULT_ICON).to_owned();

        // notify-rust blocks until the notification daemon answers
        tokio::task::spawn_blocking(move || -> Result<(), NotificationError> {
            notify_rust::Notification::new()
                .appname(&app_name)
                .summary(&title)
                .body(&message)
                .icon(&icon)
                .show()
                .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

            Ok(())
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_app_name() {
        assert_eq!(DesktopNotifier::default().app_name, "Network Notifier");
    }
}
