//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod release;
mod table;

pub use job::JobCommands;
pub use release::ReleaseCommands;
pub use table::TableCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Storage tables
    Table {
        #[command(subcommand)]
        command: TableCommands,
    },
    /// Queue jobs
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Release tag checks for CI
    Release {
        #[command(subcommand)]
        command: ReleaseCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module. Connection settings are
/// only validated by commands that talk to Keboola.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Table { command } => table::handle_table_command(command, config).await,
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Release { command } => release::handle_release_command(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn broken_config() -> Config {
        Config {
            url: "not-a-url".to_string(),
            token: None,
            queue_url: None,
            http_timeout: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_release_check_ignores_connection_settings() {
        let command = Commands::Release {
            command: ReleaseCommands::Check {
                git_ref: "refs/tags/v1.2.3".to_string(),
            },
        };
        assert!(handle_command(command, &broken_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_table_commands_validate_connection_settings() {
        let command = Commands::Table {
            command: TableCommands::List,
        };
        let err = handle_command(command, &broken_config()).await.unwrap_err();
        assert!(err.to_string().contains("url"));
    }
}
