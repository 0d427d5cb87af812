//! Taskwait CLI
//!
//! Command-line interface that waits for a remote long-running operation,
//! tracked by a notification, to complete.

mod commands;
mod config;
mod notification_id;
mod spinner;

use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::Config;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "taskwait")]
#[command(about = "Wait for remote long-running operations", long_about = None)]
struct Cli {
    /// Base URL of the API serving notifications
    #[arg(
        long,
        env = "TASKWAIT_API_URL",
        default_value = "http://localhost:8080/api"
    )]
    api_url: String,

    /// Bearer token for the API
    #[arg(long, env = "TASKWAIT_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout belongs to the spinner and the final message
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.command.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config {
        api_url: cli.api_url,
        api_token: cli.api_token,
    };

    match handle_command(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
