//! Desktop notification capability used by the relay server.

mod desktop;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use desktop::DesktopNotifier;

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("{0}")]
    SendFailed(String),

    #[error("timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Renders a notification to the local user.
///
/// Implementations are shared between concurrent request handlers.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show `title` and `message`; `icon` is a path or icon name, `None` for the default icon.
    async fn notify(&self, title: &str, message: &str, icon: Option<&str>) -> Result<(), NotificationError>;
}
