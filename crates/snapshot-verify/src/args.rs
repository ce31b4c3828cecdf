//! CLI argument definitions for the snapshot verifier.

use crate::config::{VerifyConfig, VerifyPlan};
use crate::error::ConfigError;
use clap::{Args, ValueEnum};
use estate_client::ClientConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Report rendering.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Arguments for replaying snapshots against a live deployment.
#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    /// Root of the snapshot corpus (one subdirectory per endpoint category)
    #[arg(long, env = "SNAPSHOTS_DIR")]
    pub snapshots_dir: PathBuf,

    /// Base URL of the application under test
    #[arg(long, default_value = "http://localhost:1323", env = "TARGET_URL")]
    pub target_url: String,

    /// Deadline for the whole run; in-flight calls are cancelled when it expires
    #[arg(long, default_value = "60")]
    pub timeout_secs: u64,

    /// Timeout for a single live call
    #[arg(long, default_value = "10")]
    pub request_timeout_secs: u64,

    /// Random seed for snapshot sampling (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML file overriding per-category task counts
    #[arg(long, value_name = "PATH")]
    pub plan: Option<PathBuf>,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

impl VerifyArgs {
    pub fn verify_config(&self) -> Result<VerifyConfig, ConfigError> {
        let plan = match &self.plan {
            Some(path) => VerifyPlan::from_file(path)?,
            None => VerifyPlan::default(),
        };
        let mut config = VerifyConfig::new(&self.snapshots_dir).with_plan(plan);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.target_url)
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
