//! SDK Error Types

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error object reported by the server inside a response envelope
///
/// Displays as `data`, which is where Zabbix puts the human-readable detail
/// (e.g. `"Login name or password is incorrect."`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("{data}")]
pub struct ZabbixError {
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: String,
}

// Zabbix sends `"data": null` for some internal errors
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// SDK Error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ZabbixError),

    #[error("user.login returned a non-string result: {0}")]
    UnexpectedLoginResult(serde_json::Value),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Server-side error code, if this is an API error
    pub fn api_code(&self) -> Option<i64> {
        match self {
            ApiError::Api(e) => Some(e.code),
            _ => None,
        }
    }
}
