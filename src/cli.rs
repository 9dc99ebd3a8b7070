//! Command line arguments

use clap::{ArgGroup, Parser, ValueEnum};

const EXAMPLES: &str = "\
Examples:
  # Start server on default port 8080
  network-notifier --server

  # Send notification to another machine
  network-notifier --send --target 192.168.1.100:8080 --title \"Alert\" --message \"Important update!\"

  # Start server on custom port
  network-notifier --server --port 9000

  # Show the last 20 notifications this machine received
  network-notifier --history received --limit 20";

/// Network Notifier - Send notifications between machines
#[derive(Parser, Debug)]
#[command(name = "network-notifier")]
#[command(version)]
#[command(about = "Send desktop notifications between machines")]
#[command(after_help = EXAMPLES)]
#[command(group(ArgGroup::new("mode").args(["server", "send", "history"])))]
pub struct Cli {
    /// Run in server mode (listen for notifications)
    #[arg(long)]
    pub server: bool,

    /// Send a notification to another machine
    #[arg(long)]
    pub send: bool,

    /// Print the local audit log of sent or received notifications
    #[arg(long, value_name = "LOG")]
    pub history: Option<HistoryKind>,

    /// Target machine IP:port (for client mode)
    #[arg(long, value_name = "ADDRESS")]
    pub target: Option<String>,

    /// Notification title
    #[arg(long, default_value = "Notification")]
    pub title: String,

    /// Notification message
    #[arg(long)]
    pub message: Option<String>,

    /// Path to notification icon
    #[arg(long, value_name = "PATH")]
    pub icon: Option<String>,

    /// Port to listen on (for server mode)
    #[arg(long)]
    pub port: Option<u16>,

    /// Number of rows to print with --history
    #[arg(long, requires = "history")]
    pub limit: Option<i64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum HistoryKind {
    Sent,
    Received,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Server,
    Send,
    History(HistoryKind),
}

impl Cli {
    pub fn mode(&self) -> Option<Mode> {
        if self.server {
            Some(Mode::Server)
        } else if self.send {
            Some(Mode::Send)
        } else {
            self.history.map(Mode::History)
        }
    }
}
