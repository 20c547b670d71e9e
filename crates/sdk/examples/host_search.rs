//! Host Search Example
//!
//! Demonstrates basic usage of the Zabbix API client.
//!
//! # Usage
//!
//! ```bash
//! ZABBIX_URL=https://example.org/zabbix ZABBIX_USER=api ZABBIX_PASSWORD=mypass \
//!     cargo run --example host_search
//! ```

use serde_json::json;
use zabbix_api::{ApiClient, ClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    println!("Connecting to {}", config.endpoint);

    let mut client = ApiClient::from_config(config)?;

    // 1. No login needed for the version call
    let version = client.api_version().await?;
    println!("API version: {}\n", version);

    // 2. First authenticated call logs in implicitly
    let hosts = client
        .request(
            "host.get",
            json!({
                "search": {
                    "name": "frontend-*.example.org",
                    "ip": "10.2.22.*"
                },
                "searchByAny": "1",
                "output": ["hostid", "host"],
                "searchWildcardsEnabled": "1"
            }),
        )
        .await?;

    let hosts = hosts.as_array().cloned().unwrap_or_default();
    println!("Found {} hosts", hosts.len());
    for host in &hosts {
        println!("  {} {}", host["hostid"], host["host"]);
    }

    Ok(())
}
