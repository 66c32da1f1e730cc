use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::LogDestination;
use minutes_engine::ClientSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogTarget {
    File,
    #[default]
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

/// Contents of `minutes.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_artifact_bytes: u64,
    pub output_dir: PathBuf,
    pub log_destination: LogTarget,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_artifact_bytes: client.max_artifact_bytes,
            output_dir: PathBuf::from("reports"),
            log_destination: LogTarget::default(),
            log_file: PathBuf::from("minutes.log"),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_artifact_bytes: self.max_artifact_bytes,
        }
    }

    /// How long to wait for a submission before giving up on it.
    pub fn completion_timeout(&self) -> Duration {
        // Covers the processing call plus the follow-up artifact fetch.
        Duration::from_secs(self.request_timeout_secs.saturating_mul(2).saturating_add(5))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads the config file. A missing file is not an error; any other problem yields the
/// defaults together with the reason, so it can be logged once logging is up.
pub fn load_config(path: &Path) -> (AppConfig, Option<ConfigError>) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), None);
        }
        Err(source) => {
            let err = ConfigError::Read {
                path: path.to_path_buf(),
                source,
            };
            return (AppConfig::default(), Some(err));
        }
    };

    match parse_config(&content) {
        Ok(config) => (config, None),
        Err(message) => (
            AppConfig::default(),
            Some(ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            }),
        ),
    }
}

fn parse_config(content: &str) -> Result<AppConfig, String> {
    ron::from_str(content).map_err(|err| err.to_string())
}
