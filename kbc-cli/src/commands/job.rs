//! Job command handlers
//!
//! Queueing component runs, checking their status, and waiting for them.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use kbc_client::{Job, JobStatus, KeboolaClient, QueueJob, WaitOptions};

use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Queue a run of a component configuration
    Run {
        /// Component id (e.g. keboola.ex-http)
        component: String,

        /// Configuration id
        config: String,

        /// Variable values as name=value pairs
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,

        /// Development branch id
        #[arg(long)]
        branch: Option<u64>,

        /// Wait for the job to finish
        #[arg(short, long)]
        wait: bool,

        #[command(flatten)]
        wait_args: WaitArgs,
    },
    /// Show a job's status
    Status {
        /// Job id
        id: String,
    },
    /// Wait for a job to finish
    Wait {
        /// Job id
        id: String,

        #[command(flatten)]
        wait_args: WaitArgs,
    },
}

/// Polling settings shared by `run --wait` and `wait`
#[derive(Args)]
pub struct WaitArgs {
    /// Seconds between status checks
    #[arg(long, default_value_t = 5)]
    interval: u64,

    /// Give up after this many seconds
    #[arg(long, default_value_t = 1800)]
    max_wait: u64,
}

impl WaitArgs {
    fn options(&self) -> Result<WaitOptions> {
        if self.interval == 0 {
            anyhow::bail!("--interval must be greater than 0");
        }
        Ok(WaitOptions {
            poll_interval: Duration::from_secs(self.interval),
            timeout: Duration::from_secs(self.max_wait),
        })
    }
}

/// Parse a single name=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid NAME=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        JobCommands::Run {
            component,
            config: config_id,
            vars,
            branch,
            wait,
            wait_args,
        } => {
            let mut req = QueueJob::run(component, config_id);
            for (name, value) in vars {
                req = req.with_variable(name, value);
            }
            if let Some(branch) = branch {
                req = req.on_branch(branch);
            }
            let wait = if wait { Some(wait_args.options()?) } else { None };
            run_job(&client, req, wait).await
        }
        JobCommands::Status { id } => job_status(&client, &id).await,
        JobCommands::Wait { id, wait_args } => {
            wait_for_job(&client, &id, wait_args.options()?).await
        }
    }
}

/// Queue a job, optionally waiting for it
async fn run_job(client: &KeboolaClient, req: QueueJob, wait: Option<WaitOptions>) -> Result<()> {
    let component = req.component.clone();
    let job_id = client
        .queue_job(req)
        .await
        .context("Failed to queue a job in Keboola")?;

    println!("{}", "✓ Job queued successfully!".green().bold());
    println!("  Job ID:    {}", job_id.cyan());
    println!("  Component: {}", component.dimmed());

    match wait {
        Some(options) => {
            println!();
            wait_for_job(client, &job_id, options).await
        }
        None => Ok(()),
    }
}

/// Get and display a job
async fn job_status(client: &KeboolaClient, id: &str) -> Result<()> {
    let job = client
        .get_job(id)
        .await
        .with_context(|| format!("Failed to check status of job {}", id))?;

    print_job_details(&job);

    Ok(())
}

/// Wait for a job; a job that ends unsuccessfully is an error
async fn wait_for_job(client: &KeboolaClient, id: &str, options: WaitOptions) -> Result<()> {
    println!(
        "{}",
        format!("Waiting for job {} (up to {}s)...", id, options.timeout.as_secs()).dimmed()
    );

    let job = client.wait_for_job(id, options).await?;

    print_job_details(&job);

    if !job.status.is_success() {
        anyhow::bail!("Job {} finished with status {}", job.id, job.status);
    }

    Ok(())
}

/// Print detailed job information
fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:        {}", job.id.cyan());
    println!("  Status:    {}", colorize_status(&job.status));
    if let Some(component) = &job.component {
        println!("  Component: {}", component);
    }
    if let Some(config) = &job.config {
        println!("  Config:    {}", config);
    }
    if let Some(created) = job.created_time {
        println!("  Created:   {}", created.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(started) = job.start_time {
        println!("  Started:   {}", started.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(ended) = job.end_time {
        println!("  Ended:     {}", ended.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(duration) = job.duration() {
        println!("  Duration:  {}s", duration.num_seconds());
    }
    if let Some(message) = job.result_message() {
        println!("\n{}", "Result:".bold());
        if job.status.is_success() {
            println!("{}", message);
        } else {
            println!("{}", message.red());
        }
    }
}

/// Colorize job status for display
fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Created | JobStatus::Waiting => status_str.yellow(),
        JobStatus::Processing | JobStatus::Terminating => status_str.cyan(),
        JobStatus::Success => status_str.green(),
        JobStatus::Warning => status_str.yellow().bold(),
        JobStatus::Error => status_str.red(),
        JobStatus::Cancelled | JobStatus::Terminated | JobStatus::Unknown => status_str.dimmed(),
    }
}
