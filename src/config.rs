use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::Duration;
use std::{env, fs};

use log::{debug, error};
use serde_derive::Deserialize;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PATH: &str = "config.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub app: AppConf,
    pub server: ServerConf,
    pub client: ClientConf,
    pub database: DatabaseConf,
    pub log: LogConf,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct AppConf {
    pub environment: String,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct ServerConf {
    pub address: IpAddr,
    pub port: u16,
    /// Upper bound on a single desktop notification call, unbounded when unset or 0
    pub notify_timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct ClientConf {
    pub target: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct DatabaseConf {
    pub enabled: bool,
    pub url: String,
    pub history_limit: i64,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct LogConf {
    pub file: Option<String>,
    pub level: String,
}

impl Default for AppConf {
    fn default() -> Self {
        AppConf { environment: "production".to_string() }
    }
}

impl Default for ServerConf {
    fn default() -> Self {
        ServerConf {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            notify_timeout_secs: None,
        }
    }
}

impl ServerConf {
    pub fn notify_timeout(&self) -> Option<Duration> {
        self.notify_timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

impl Default for ClientConf {
    fn default() -> Self {
        ClientConf {
            target: format!("localhost:{}", DEFAULT_PORT),
            timeout_secs: 10,
        }
    }
}

impl ClientConf {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DatabaseConf {
    fn default() -> Self {
        DatabaseConf {
            enabled: true,
            url: "notify.db".to_string(),
            history_limit: 100,
        }
    }
}

impl Default for LogConf {
    fn default() -> Self {
        LogConf {
            file: None,
            level: "info".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config File could not be found: {0}")]
    ConfigNotFound(std::io::Error),

    #[error("Config File could not be parsed: {0}")]
    ParsingError(toml::de::Error),

    #[error("Env variable could not be found")]
    EnvVarNotFound(std::env::VarError),
}

impl Config {
    /// Loads the file named by `CONFIG_LOCATION`, else `config.toml`, else
    /// falls back to defaults. A file that exists but cannot be read or
    /// parsed is an error.
    pub fn from_any() -> Result<Self, ConfigError> {
        //Try to read from path env var
        match Self::from_env_path() {
            Ok(config) => {
                debug!("Loaded config from env path");
                return Ok(config);
            }
            Err(ConfigError::EnvVarNotFound(_)) => {
                debug!("CONFIG_LOCATION not set");
            }
            Err(error) => {
                error!("Could not load config from env path: {}", error);
                return Err(error);
            }
        }

        if !Path::new(DEFAULT_PATH).exists() {
            debug!("No {} found, using defaults", DEFAULT_PATH);
            return Ok(Config::default());
        }

        //Try to read default path
        let default_result = Self::from_default_path();
        match default_result {
            Ok(config) => {
                debug!("Loaded config from default path");
                Ok(config)
            }
            Err(error) => {
                error!("Could not load config: {}", error);
                Err(error)
            }
        }
    }

    // Read Config from default path
    pub fn from_default_path() -> Result<Self, ConfigError> {
        Self::from_file_path(DEFAULT_PATH)
    }

    // Read Config from path in CONFIG_LOCATION env variable
    pub fn from_env_path() -> Result<Self, ConfigError> {
        let path = env::var("CONFIG_LOCATION")
            .map_err(ConfigError::EnvVarNotFound)?;
        Self::from_file_path(&path)
    }

    // Read and Parse Config from path
    pub fn from_file_path(path: &str) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)
            .map_err(ConfigError::ConfigNotFound)?;

        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Self, ConfigError> {
        toml::from_str(data)
            .map_err(ConfigError::ParsingError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let conf = Config::from_toml("").unwrap();

        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.server.notify_timeout(), None);
        assert_eq!(conf.client.target, "localhost:8080");
        assert_eq!(conf.client.timeout(), Duration::from_secs(10));
        assert!(conf.database.enabled);
        assert_eq!(conf.database.history_limit, 100);
        assert_eq!(conf.log.level, "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let conf = Config::from_toml(
            r#"
            [server]
            port = 9000
            notify_timeout_secs = 15

            [database]
            url = "/var/lib/notifier/audit.db"

            [log]
            file = "notifier.log"
            "#,
        )
        .unwrap();

        assert_eq!(conf.server.port, 9000);
        assert_eq!(conf.server.address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(conf.server.notify_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(conf.database.url, "/var/lib/notifier/audit.db");
        assert!(conf.database.enabled);
        assert_eq!(conf.log.file.as_deref(), Some("notifier.log"));
    }

    #[test]
    fn zero_notify_timeout_means_unbounded() {
        let conf = Config::from_toml("[server]\nnotify_timeout_secs = 0\n").unwrap();
        assert_eq!(conf.server.notify_timeout(), None);
    }

    #[test]
    fn config_location_is_loaded_and_bad_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.toml");
        fs::write(&path, "[server]\nport = 9100\n\n[client]\ntarget = \"desk:9100\"\n").unwrap();

        // single test so no other test races on the variable
        env::set_var("CONFIG_LOCATION", &path);
        let loaded = Config::from_any();
        env::set_var("CONFIG_LOCATION", dir.path().join("missing.toml"));
        let missing = Config::from_any();
        env::remove_var("CONFIG_LOCATION");

        let conf = loaded.unwrap();
        assert_eq!(conf.server.port, 9100);
        assert_eq!(conf.client.target, "desk:9100");
        assert!(matches!(missing, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn invalid_values_are_parsing_errors() {
        let result = Config::from_toml("[server]\nport = \"eighty\"\n");
        assert!(matches!(result, Err(ConfigError::ParsingError(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = Config::from_file_path("/nonexistent/notifier/config.toml");
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }
}
