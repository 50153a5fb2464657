//! # Configuration
//!
//! Settings are layered: built-in defaults, then an optional YAML secrets
//! file holding the database connection string, then `GROCERY_*`
//! environment variables. The connection string is never compiled in
//! except as the local development default.
//!
//! ```yaml
//! # secrets.yaml
//! database:
//!   url: "sqlite:/var/lib/grocery/expenses.db"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const SECRETS_FILE_VAR: &str = "GROCERY_SECRETS_FILE";
pub const DEFAULT_SECRETS_FILE: &str = "secrets.yaml";

pub const DATABASE_URL_VAR: &str = "GROCERY_DATABASE_URL";
pub const BIND_ADDRESS_VAR: &str = "GROCERY_BIND_ADDRESS";
pub const FRONTEND_ORIGIN_VAR: &str = "GROCERY_FRONTEND_ORIGIN";
pub const STATIC_DIR_VAR: &str = "GROCERY_STATIC_DIR";
pub const AUTO_REFRESH_VAR: &str = "GROCERY_AUTO_REFRESH";
pub const RANGE_SUMMARY_VAR: &str = "GROCERY_RANGE_SUMMARY";
pub const CHART_VAR: &str = "GROCERY_CHART";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read secrets file {path}: {source}")]
    ReadSecrets {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse secrets file {path}: {source}")]
    ParseSecrets {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{var} must be a boolean (true/false, yes/no, on/off, 1/0), got '{value}'")]
    InvalidBool { var: &'static str, value: String },
}

/// Runtime configuration for the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite connection string for the document store
    pub database_url: String,
    pub bind_address: String,
    /// Origin allowed to call the API from a browser
    pub frontend_origin: String,
    /// Directory of a built frontend to serve for non-API paths
    pub static_dir: Option<PathBuf>,
    /// Re-read the dataset right after a successful insert
    pub auto_refresh_after_insert: bool,
    pub range_summary_enabled: bool,
    pub chart_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:grocery_expenses.db".to_string(),
            bind_address: "127.0.0.1:3000".to_string(),
            frontend_origin: "http://localhost:8080".to_string(),
            static_dir: None,
            auto_refresh_after_insert: true,
            range_summary_enabled: true,
            chart_enabled: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    database: Option<DatabaseSecrets>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSecrets {
    url: String,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(SECRETS_FILE_VAR).ok().map(PathBuf::from);
        let secrets_path = explicit.or_else(|| {
            let default = PathBuf::from(DEFAULT_SECRETS_FILE);
            default.exists().then_some(default)
        });

        Self::from_sources(secrets_path.as_deref(), |name| std::env::var(name).ok())
    }

    /// Build configuration from an optional secrets file and an environment lookup
    pub fn from_sources<F>(secrets_path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = secrets_path {
            let secrets = read_secrets(path)?;
            if let Some(database) = secrets.database {
                info!("Using database connection string from {}", path.display());
                config.database_url = database.url;
            }
        }

        if let Some(url) = env(DATABASE_URL_VAR) {
            config.database_url = url;
        }
        if let Some(address) = env(BIND_ADDRESS_VAR) {
            config.bind_address = address;
        }
        if let Some(origin) = env(FRONTEND_ORIGIN_VAR) {
            config.frontend_origin = origin;
        }
        if let Some(dir) = env(STATIC_DIR_VAR) {
            config.static_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = env(AUTO_REFRESH_VAR) {
            config.auto_refresh_after_insert = parse_bool(AUTO_REFRESH_VAR, &value)?;
        }
        if let Some(value) = env(RANGE_SUMMARY_VAR) {
            config.range_summary_enabled = parse_bool(RANGE_SUMMARY_VAR, &value)?;
        }
        if let Some(value) = env(CHART_VAR) {
            config.chart_enabled = parse_bool(CHART_VAR, &value)?;
        }

        Ok(config)
    }
}

fn read_secrets(path: &Path) -> Result<SecretsFile, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadSecrets {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Ok(SecretsFile::default());
    }

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::ParseSecrets {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
