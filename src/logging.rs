use std::fs::File;
use std::str::FromStr;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use thiserror::Error;

use crate::config::LogConf;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Unknown log level '{0}'")]
    InvalidLevel(String),

    #[error("Log file could not be created: {0}")]
    File(#[from] std::io::Error),

    #[error("Logger already initialized: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}

pub fn setup(conf: &LogConf) -> Result<(), LogError> {
    let level = LevelFilter::from_str(&conf.level)
        .map_err(|_| LogError::InvalidLevel(conf.level.clone()))?;

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = &conf.file {
        loggers.push(WriteLogger::new(level, Config::default(), File::create(path)?));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
