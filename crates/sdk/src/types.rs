//! JSON-RPC envelopes exchanged with `api_jsonrpc.php`

use crate::error::ZabbixError;
use jsonrpsee::types::TwoPointZero;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Methods callable without an auth token
pub const AUTH_EXEMPT_METHODS: [&str; 2] = ["apiinfo.version", "user.checkAuthentication"];

/// Method used for the implicit login
pub const LOGIN_METHOD: &str = "user.login";

/// Whether `method` may be called without an auth token
pub fn is_auth_exempt(method: &str) -> bool {
    AUTH_EXEMPT_METHODS.contains(&method)
}

/// Outbound envelope
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    pub jsonrpc: TwoPointZero,
    pub method: String,
    pub params: Value,
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

impl RequestEnvelope {
    pub fn new(method: impl Into<String>, params: Value, id: u64, auth: Option<String>) -> Self {
        Self {
            jsonrpc: TwoPointZero,
            method: method.into(),
            params,
            id,
            auth,
        }
    }
}

/// Inbound envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    /// Absent in replies from some frontends; any value other than "2.0" is rejected
    #[serde(default)]
    pub jsonrpc: Option<TwoPointZero>,
    #[serde(default)]
    pub error: Option<ZabbixError>,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub id: Option<u64>,
}

impl ResponseEnvelope {
    /// Split into the result or the server-reported error.
    ///
    /// An error object with code 0 is treated as absent.
    pub fn into_result(self) -> Result<Value, ZabbixError> {
        match self.error {
            Some(err) if err.code != 0 => Err(err),
            _ => Ok(self.result),
        }
    }
}
