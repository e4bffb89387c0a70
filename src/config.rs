use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DB_NAME: &str = "trains";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_name: String,
    pub log_filter: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            db_name: DEFAULT_DB_NAME.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let data_dir = env_map
            .get("TRAINBOARD_DATA_DIR")
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_DATA_DIR);
        if data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "TRAINBOARD_DATA_DIR".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let db_name = env_map
            .get("TRAINBOARD_DB_NAME")
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_DB_NAME);
        validate_db_name(db_name)?;

        let log_filter = env_map
            .get("RUST_LOG")
            .cloned()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            data_dir: PathBuf::from(data_dir),
            db_name: db_name.to_string(),
            log_filter,
        })
    }

    /// Location of the database file: `<data_dir>/<db_name>.db`.
    pub fn database_path(&self) -> PathBuf {
        database_file(&self.data_dir, &self.db_name)
    }
}

pub(crate) fn database_file(data_dir: &Path, db_name: &str) -> PathBuf {
    data_dir.join(format!("{}.db", db_name))
}

fn validate_db_name(db_name: &str) -> Result<(), ConfigError> {
    if db_name.trim().is_empty() {
        return Err(ConfigError::InvalidValue(
            "TRAINBOARD_DB_NAME".to_string(),
            "must not be empty".to_string(),
        ));
    }
    if db_name.contains('/') || db_name.contains('\\') {
        return Err(ConfigError::InvalidValue(
            "TRAINBOARD_DB_NAME".to_string(),
            format!("must be a bare name, got {}", db_name),
        ));
    }
    Ok(())
}
