//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod task_wait;

pub use task_wait::TaskWaitArgs;

use anyhow::Result;
use clap::Subcommand;
use std::process::ExitCode;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Wait for a task to complete
    #[command(
        long_about = "Wait for a task to complete.\n\n\
            Accepts either a notification UUID, or the JSON response of an API call \
            that started a task. The JSON must contain the _links.notification.href \
            property. Pass \"-\" to read that input from standard input."
    )]
    TaskWait(TaskWaitArgs),
}

impl Commands {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Commands::TaskWait(args) => args.default_log_filter(),
        }
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// The process exit code, or an error for invalid input
pub async fn handle_command(command: Commands, config: &Config) -> Result<ExitCode> {
    match command {
        Commands::TaskWait(args) => task_wait::handle_task_wait(args, config).await,
    }
}
