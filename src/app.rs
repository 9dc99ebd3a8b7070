use std::process::ExitCode;
use std::sync::Arc;

use clap::CommandFactory;
use log::info;
use thiserror::Error;

use crate::api::{self, AppState};
use crate::audit::{AuditError, AuditLog, SqliteAuditStore};
use crate::cli::{Cli, HistoryKind, Mode};
use crate::client::{ClientError, RelayClient};
use crate::config::{ClientConf, Config, DatabaseConf, ServerConf};
use crate::notifier::DesktopNotifier;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create Tokio runtime: {0}")]
    Runtime(std::io::Error),

    #[error("Audit log error: {0}")]
    Audit(#[from] AuditError),

    #[error("Server error: {0}")]
    Server(std::io::Error),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Message is required when sending notifications")]
    MissingMessage,

    #[error("Failed to write output: {0}")]
    Output(std::io::Error),
}

pub fn launch(cli: Cli, conf: Config) -> Result<ExitCode, AppError> {
    let Some(mode) = cli.mode() else {
        Cli::command().print_help().map_err(AppError::Output)?;
        return Ok(ExitCode::SUCCESS);
    };

    info!("Starting App in {}", conf.app.environment);

    // Build a multi-threaded Tokio runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("notifier-worker")
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    runtime.block_on(async move {
        match mode {
            Mode::Server => run_server(cli, conf).await,
            Mode::Send => run_send(cli, conf).await,
            Mode::History(kind) => show_history(kind, cli.limit, &conf.database).await,
        }
    })
}

/// Opens the sqlite audit log, creating its tables. Failure here is fatal.
fn open_audit(conf: &DatabaseConf) -> Result<AuditLog, AuditError> {
    if !conf.enabled {
        info!("Audit log disabled");
        return Ok(AuditLog::disabled());
    }

    let store = SqliteAuditStore::open(&conf.url)?;
    Ok(AuditLog::new(Arc::new(store), conf.history_limit))
}

/// `--port` wins over the configured port.
fn server_conf(cli: &Cli, mut conf: ServerConf) -> ServerConf {
    if let Some(port) = cli.port {
        conf.port = port;
    }
    conf
}

/// Resolves `(target, message)` for send mode; `--target` wins over the config.
fn send_args<'a>(cli: &'a Cli, conf: &'a ClientConf) -> Result<(&'a str, &'a str), AppError> {
    let message = cli.message.as_deref().filter(|message| !message.is_empty()).ok_or(AppError::MissingMessage)?;
    let target = cli.target.as_deref().unwrap_or(conf.target.as_str());
    Ok((target, message))
}

async fn run_server(cli: Cli, conf: Config) -> Result<ExitCode, AppError> {
    let audit = open_audit(&conf.database)?;
    let server_conf = server_conf(&cli, conf.server);

    let state = AppState::new(audit, Arc::new(DesktopNotifier::new()))
        .with_notify_timeout(server_conf.notify_timeout());

    api::init(&server_conf, Arc::new(state)).await.map_err(AppError::Server)?;

    info!("Server stopped");
    Ok(ExitCode::SUCCESS)
}

async fn run_send(cli: Cli, conf: Config) -> Result<ExitCode, AppError> {
    let (target, message) = send_args(&cli, &conf.client)?;

    let audit = open_audit(&conf.database)?;
    let client = RelayClient::new(conf.client.timeout(), audit)?;

    println!("Sending notification to {}...", target);
    println!("Title: {}", cli.title);
    println!("Message: {}", message);

    let outcome = client.send(target, &cli.title, message, cli.icon.as_deref()).await;
    println!("{}", outcome);

    if outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn show_history(kind: HistoryKind, limit: Option<i64>, conf: &DatabaseConf) -> Result<ExitCode, AppError> {
    let audit = open_audit(conf)?;

    match kind {
        HistoryKind::Sent => {
            for row in audit.list_sent(limit).await? {
                let status = if row.success { "ok" } else { "failed" };
                println!("{}  {:<6}  {}  {}: {}", row.sent_at, status, row.target, row.title, row.message);
            }
        }
        HistoryKind::Received => {
            for row in audit.list_received(limit).await? {
                let source = row.source_ip.as_deref().unwrap_or("-");
                println!("{}  {}  {}: {}", row.received_at, source, row.title, row.message);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
