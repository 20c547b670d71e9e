//! Zabbix CLI - command-line front end for the Zabbix API client

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use std::time::Duration;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zabbix_api::{ApiClient, ApiError, ClientConfig};

#[derive(Parser)]
#[command(name = "zabbix")]
#[command(about = "Zabbix JSON-RPC API client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Zabbix frontend URL (without /api_jsonrpc.php)
    #[arg(long, env = "ZABBIX_URL")]
    url: String,

    /// API user
    #[arg(long, env = "ZABBIX_USER", default_value = "")]
    user: String,

    /// API password
    #[arg(long, env = "ZABBIX_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Request timeout in seconds
    #[arg(long, env = "ZABBIX_TIMEOUT_SECS", default_value = "10")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Call an API method and print its result
    Call {
        /// Method name (e.g., host.get, item.get)
        method: String,

        /// Parameters as JSON string
        #[arg(short, long, default_value = "{}")]
        params: String,

        /// Render an array of objects as a table
        #[arg(long)]
        table: bool,
    },

    /// Show the server API version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<ApiError>() {
            Some(ApiError::Api(api)) => {
                eprintln!("{} {} ({})", "✗ API error:".red().bold(), api.data, api.code)
            }
            _ => eprintln!("{} {:#}", "✗".red().bold(), e),
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let log_format = std::env::var("ZABBIX_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("zabbix=warn"))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    if cli.timeout == 0 {
        anyhow::bail!("--timeout must be at least 1 second");
    }

    let config = ClientConfig::new(cli.url, cli.user, cli.password)
        .with_timeout(Duration::from_secs(cli.timeout));
    tracing::debug!(config = ?config, "Client configured");

    let mut client = ApiClient::from_config(config).context("Failed to create client")?;

    match cli.command {
        Commands::Call {
            method,
            params,
            table,
        } => {
            let params: Value = serde_json::from_str(&params).context("Invalid JSON params")?;

            let result = client.request(&method, params).await?;

            match render_table(&result) {
                Some(rendered) if table => println!("{}", rendered),
                _ => println!("{}", serde_json::to_string_pretty(&result)?),
            }
        }

        Commands::Version => {
            let version = client.api_version().await?;
            println!("{} {}", "API version:".bold(), version.green());
        }
    }

    Ok(())
}

/// Render an array of objects as a table, columns taken from the first row
fn render_table(result: &Value) -> Option<String> {
    let rows = result.as_array()?;
    let columns: Vec<String> = rows.first()?.as_object()?.keys().cloned().collect();

    let mut builder = Builder::default();
    builder.push_record(columns.clone());

    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|col| match row.get(col) {
                Some(Value::String(s)) => s.clone(),
                None | Some(Value::Null) => String::new(),
                Some(other) => other.to_string(),
            })
            .collect();
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    Some(table.to_string())
}
