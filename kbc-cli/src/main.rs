//! Keboola CLI
//!
//! Command-line interface for Keboola Storage tables, Queue jobs, and the
//! release-tag check used by CI.

mod commands;
mod config;

use std::time::Duration;

use anyhow::Result;
use clap::{ArgAction, Parser};
use commands::{Commands, handle_command};
use config::{Config, DEFAULT_URL};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kbc", version)]
#[command(about = "Keboola Storage and Queue CLI", long_about = None)]
struct Cli {
    /// Connection URL of the Keboola stack
    #[arg(long, env = "KBC_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Storage API token
    #[arg(long, env = "KBC_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Queue API URL (derived from --url when omitted)
    #[arg(long, env = "KBC_QUEUE_URL")]
    queue_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "KBC_HTTP_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = Config {
        url: cli.url,
        token: cli.token,
        queue_url: cli.queue_url,
        http_timeout: Duration::from_secs(cli.timeout),
    };
    tracing::debug!("Loaded configuration: {:?}", config);

    handle_command(cli.command, &config).await
}

/// Logs go to stderr so command output on stdout stays scriptable
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "kbc=warn,kbc_client=warn",
        1 => "kbc=info,kbc_client=info",
        _ => "kbc=debug,kbc_client=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
