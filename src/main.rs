//! Command-line interface for estate-bench
//!
//! # Usage Examples
//!
//! ## Snapshot Verification
//! ```bash
//! # Replay the default plan against a local deployment
//! estate-bench verify --snapshots-dir ./snapshots
//!
//! # Reproducible sampling, custom task counts, JSON report
//! estate-bench verify \
//!   --snapshots-dir ./snapshots \
//!   --target-url http://10.0.0.5:1323 \
//!   --plan verify_plan.yaml \
//!   --seed 42 \
//!   --output-format json
//! ```
//!
//! ## Exit Codes
//! - `0`: every outcome matched its snapshot
//! - `1`: the application diverged from at least one snapshot (or startup failed)
//! - `2`: only the corpus or harness was at fault

use anyhow::Context;
use clap::{Parser, Subcommand};
use estate_client::HttpLiveClient;
use snapshot_verify::{OutputFormat, SnapshotVerifier, VerificationReport, VerifyArgs};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "estate-bench")]
#[command(about = "Benchmark harness tools for the estate search application")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded snapshots against a live deployment and report divergences
    Verify {
        #[command(flatten)]
        args: VerifyArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Verify { args } => run_verify(args).await,
    }
}

async fn run_verify(args: VerifyArgs) -> anyhow::Result<ExitCode> {
    let config = args
        .verify_config()
        .with_context(|| format!("Failed to load verification plan from {:?}", args.plan))?;

    let client = HttpLiveClient::new(args.client_config())
        .with_context(|| format!("Failed to create client for {}", args.target_url))?;

    tracing::info!(
        "Verifying {} against snapshots in {:?} (timeout {}s)",
        args.target_url,
        args.snapshots_dir,
        args.timeout_secs
    );

    let cancel = CancellationToken::new();
    let watchdog = tokio::spawn(cancel_on_deadline_or_interrupt(
        cancel.clone(),
        args.run_timeout(),
    ));

    let report = SnapshotVerifier::new(Arc::new(client), config)
        .with_cancellation(cancel)
        .run()
        .await;
    watchdog.abort();

    match args.output_format {
        OutputFormat::Table => println!("{}", report.format_table()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }

    Ok(exit_code(&report))
}

/// Cancel `token` once `timeout` elapses or on Ctrl-C, whichever is first.
async fn cancel_on_deadline_or_interrupt(token: CancellationToken, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    tokio::select! {
        _ = tokio::time::sleep_until(deadline) => {
            tracing::warn!("Verification timed out after {timeout:?}, cancelling in-flight calls");
        }
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => {
                tracing::info!("Received interrupt signal (Ctrl+C), cancelling in-flight calls");
            }
            Err(e) => {
                tracing::warn!("Failed to listen for Ctrl+C: {e}");
                tokio::time::sleep_until(deadline).await;
            }
        },
    }
    token.cancel();
}

fn exit_code(report: &VerificationReport) -> ExitCode {
    if !report.application_faults().is_empty() {
        tracing::error!("Verification found application faults");
        ExitCode::from(1)
    } else if !report.tooling_faults().is_empty() {
        tracing::error!("Verification found only tooling faults; check the snapshot corpus");
        ExitCode::from(2)
    } else {
        tracing::info!("Verification completed successfully - every snapshot matched");
        ExitCode::SUCCESS
    }
}
