// ==========================================
// Road appraisal - configuration errors
// ==========================================

use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration value (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("configuration storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("configuration lock failure: {0}")]
    LockError(String),

    #[error("configuration snapshot is not valid JSON: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn invalid(key: &str, value: impl Display, message: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
