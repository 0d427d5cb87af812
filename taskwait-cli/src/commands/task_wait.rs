//! Task wait command handler
//!
//! Resolves the notification to wait for, polls it until the task is done,
//! then reports the outcome and maps it to an exit code.

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use clap::{Args, ValueEnum};
use colored::*;
use std::fmt::Display;
use std::process::ExitCode;
use std::time::Duration;
use taskwait_core::{PollFailure, PollOutcome, StatusSnapshot, TaskDuration};
use taskwait_poller::{
    NoopSink, PollConfig, PollDriver, ProgressSink, TerminalPolicy, TracingSink,
};

use crate::config::Config;
use crate::notification_id::{read_input, resolve_notification_id};
use crate::spinner::SpinnerSink;

/// How progress is displayed while waiting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ProgressStyle {
    /// One self-rewriting terminal line
    #[default]
    Spinner,
    /// Structured log lines on stderr
    Log,
    /// Nothing until the task is done
    None,
}

/// Arguments of `taskwait task-wait`
#[derive(Debug, Args)]
pub struct TaskWaitArgs {
    /// Notification UUID, API response JSON with _links.notification.href, or "-" for stdin
    #[arg(value_name = "NOTIFICATION")]
    notification: String,

    /// Seconds between status checks
    #[arg(long, default_value_t = 5)]
    interval: u64,

    /// Seconds to wait before giving up
    #[arg(long, default_value_t = 45)]
    timeout: u64,

    /// Seconds a single status check may take
    #[arg(long)]
    fetch_timeout: Option<u64>,

    /// Treat a finished task whose status is "failed" or "error" as a failure
    #[arg(long)]
    fail_on_error_status: bool,

    /// How to display progress
    #[arg(long, value_enum, default_value_t = ProgressStyle::Spinner)]
    progress: ProgressStyle,
}

impl TaskWaitArgs {
    pub fn default_log_filter(&self) -> &'static str {
        match self.progress {
            ProgressStyle::Log => "warn,taskwait_poller=info",
            _ => "warn",
        }
    }

    fn poll_config(&self) -> PollConfig {
        let policy = if self.fail_on_error_status {
            TerminalPolicy::HonorFailureStatus
        } else {
            TerminalPolicy::TrustProgress
        };

        PollConfig::new()
            .with_interval(Duration::from_secs(self.interval))
            .with_timeout(Duration::from_secs(self.timeout))
            .with_fetch_timeout(self.fetch_timeout.map(Duration::from_secs))
            .with_policy(policy)
    }
}

/// Handle `taskwait task-wait`
pub async fn handle_task_wait(args: TaskWaitArgs, config: &Config) -> Result<ExitCode> {
    let input = read_input(&args.notification, std::io::stdin().lock())?;
    let notification_id = resolve_notification_id(&input)?.to_string();
    let poll_config = args.poll_config();

    let mut sink: Box<dyn ProgressSink> = match args.progress {
        ProgressStyle::Spinner => Box::new(SpinnerSink::stdout(&format!(
            "Waiting for task {} to complete",
            notification_id
        ))),
        ProgressStyle::Log => Box::new(TracingSink),
        ProgressStyle::None => Box::new(NoopSink),
    };

    let driver = PollDriver::new(config.client());
    let outcome = driver
        .wait_async(&notification_id, &poll_config, sink.as_mut())
        .await?;

    print_outcome(&outcome, &notification_id);

    Ok(ExitCode::from(exit_status(&outcome)))
}

/// 0 for a completed task, 1 otherwise
fn exit_status(outcome: &PollOutcome) -> u8 {
    if outcome.is_completed() { 0 } else { 1 }
}

/// Print the final outcome
fn print_outcome(outcome: &PollOutcome, notification_id: &str) {
    match outcome {
        PollOutcome::Completed { snapshot, duration } => {
            println!();
            for line in completion_lines(snapshot, duration, &Local) {
                println!(" {}", line.green());
            }
            println!();
        }
        PollOutcome::Failed(failure) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), failure);
            if let PollFailure::Remote { snapshot } = failure {
                eprintln!("        Task type: {}", snapshot.label);
            }
        }
        PollOutcome::TimedOut {
            elapsed,
            last_snapshot,
        } => {
            eprintln!(
                "{} {}",
                "[ERROR]".red().bold(),
                timeout_message(notification_id, *elapsed, last_snapshot.as_ref())
            );
        }
    }
}

/// Success message of a completed task, with the completion date shown in `tz`
fn completion_lines<Tz>(
    snapshot: &StatusSnapshot,
    duration: &TaskDuration,
    tz: &Tz,
) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let completed_on = snapshot
        .completed_at
        .as_deref()
        .and_then(|at| DateTime::parse_from_rfc3339(at).ok())
        .map(|at| {
            at.with_timezone(tz)
                .format("%a %b %-d %-H:%M:%S %Z %Y")
                .to_string()
        })
        .unwrap_or_else(|| "an unknown date".to_string());

    let duration = match duration {
        TaskDuration::Exact(delta) => format!("Duration: {} seconds", delta.num_seconds()),
        TaskDuration::Negative(delta) => format!(
            "Duration: {} seconds (completed_at precedes created_at)",
            delta.num_seconds()
        ),
        TaskDuration::Unknown => {
            "Duration: unknown (completed_at missing or unparseable)".to_string()
        }
    };

    vec![
        format!(
            "The task with notification uuid {} completed with status \"{}\"",
            snapshot.operation_id, snapshot.status
        ),
        format!("on {}", completed_on),
        format!("Task type: {}", snapshot.label),
        duration,
    ]
}

fn timeout_message(
    notification_id: &str,
    elapsed: Duration,
    last_snapshot: Option<&StatusSnapshot>,
) -> String {
    let mut message = format!(
        "Timed out after {} seconds waiting for task {}",
        elapsed.as_secs(),
        notification_id
    );
    if let Some(snapshot) = last_snapshot {
        message.push_str(&format!(
            " (last reported: {} at {}%, status \"{}\")",
            snapshot.label, snapshot.progress, snapshot.status
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeDelta, Utc};
    use clap::Parser;
    use taskwait_core::FetchError;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: TaskWaitArgs,
    }

    fn parse(argv: &[&str]) -> TaskWaitArgs {
        let mut full = vec!["task-wait"];
        full.extend_from_slice(argv);
        Harness::parse_from(full).args
    }

    fn completed_snapshot() -> StatusSnapshot {
        StatusSnapshot::new(
            "1bd3487e-71d1-4fca-a2d9-5f969b3d35c1",
            "Application added to recents list",
            100,
            "completed",
            "2019-07-29T20:47:13+00:00",
        )
        .with_completed_at("2019-07-29T20:47:50+00:00")
    }

    #[test]
    fn test_default_args() {
        let args = parse(&["abc"]);
        assert_eq!(args.notification, "abc");
        assert_eq!(args.progress, ProgressStyle::Spinner);
        assert_eq!(args.default_log_filter(), "warn");

        let config = args.poll_config();
        assert_eq!(config, PollConfig::default());
    }

    #[test]
    fn test_args_map_to_poll_config() {
        let args = parse(&[
            "abc",
            "--interval",
            "2",
            "--timeout",
            "120",
            "--fetch-timeout",
            "10",
            "--fail-on-error-status",
            "--progress",
            "log",
        ]);
        assert_eq!(args.default_log_filter(), "warn,taskwait_poller=info");

        let config = args.poll_config();
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.policy, TerminalPolicy::HonorFailureStatus);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_completion_lines() {
        let lines = completion_lines(
            &completed_snapshot(),
            &TaskDuration::Exact(TimeDelta::seconds(37)),
            &Utc,
        );
        assert_eq!(
            lines,
            vec![
                "The task with notification uuid 1bd3487e-71d1-4fca-a2d9-5f969b3d35c1 completed with status \"completed\"",
                "on Mon Jul 29 20:47:50 UTC 2019",
                "Task type: Application added to recents list",
                "Duration: 37 seconds",
            ]
        );
    }

    #[test]
    fn test_completion_date_uses_given_zone() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let lines = completion_lines(
            &completed_snapshot(),
            &TaskDuration::Exact(TimeDelta::seconds(37)),
            &cest,
        );
        assert_eq!(lines[1], "on Mon Jul 29 22:47:50 +02:00 2019");
    }

    #[test]
    fn test_completion_lines_with_anomalies() {
        let lines = completion_lines(
            &completed_snapshot(),
            &TaskDuration::Negative(TimeDelta::seconds(-4)),
            &Utc,
        );
        assert_eq!(
            lines[3],
            "Duration: -4 seconds (completed_at precedes created_at)"
        );

        let mut snapshot = completed_snapshot();
        snapshot.completed_at = None;
        let lines = completion_lines(&snapshot, &TaskDuration::Unknown, &Utc);
        assert_eq!(lines[1], "on an unknown date");
        assert_eq!(
            lines[3],
            "Duration: unknown (completed_at missing or unparseable)"
        );
    }

    #[test]
    fn test_exit_status() {
        let completed = PollOutcome::completed(completed_snapshot());
        assert_eq!(exit_status(&completed), 0);

        let failed = PollOutcome::Failed(PollFailure::Fetch(FetchError::Transport(
            "refused".to_string(),
        )));
        assert_eq!(exit_status(&failed), 1);

        let timed_out = PollOutcome::TimedOut {
            elapsed: Duration::from_secs(45),
            last_snapshot: None,
        };
        assert_eq!(exit_status(&timed_out), 1);
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            timeout_message("abc", Duration::from_millis(45_002), None),
            "Timed out after 45 seconds waiting for task abc"
        );

        let last = StatusSnapshot::new("abc", "Backup", 40, "in-progress", "");
        assert_eq!(
            timeout_message("abc", Duration::from_secs(45), Some(&last)),
            "Timed out after 45 seconds waiting for task abc (last reported: Backup at 40%, status \"in-progress\")"
        );
    }
}
