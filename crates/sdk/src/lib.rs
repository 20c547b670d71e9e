//! Zabbix API - Rust Client Library
//!
//! Provides a single [`ApiClient::request`] passthrough to the Zabbix JSON-RPC
//! API. Consult the Zabbix API reference for method names and parameters.
//!
//! # Example
//!
//! ```no_run
//! use zabbix_api::ApiClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ApiClient::new("https://example.org/zabbix", "api", "mypass")?;
//!
//!     let hosts = client.request("host.get", json!({
//!         "search": {
//!             "name": "frontend-*.example.org",
//!             "ip": "10.2.22.*"
//!         },
//!         "searchByAny": "1",
//!         "output": "extend",
//!         "searchWildcardsEnabled": "1"
//!     })).await?;
//!
//!     println!("{:#}", hosts);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
pub mod transport;
mod types;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::{ApiError, Result, ZabbixError};
pub use transport::{HttpTransport, Transport};
pub use types::{
    is_auth_exempt, RequestEnvelope, ResponseEnvelope, AUTH_EXEMPT_METHODS, LOGIN_METHOD,
};
