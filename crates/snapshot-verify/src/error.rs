//! Error types for snapshot verification.

use estate_client::ClientError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which side of the benchmark a failure points at.
///
/// Tooling faults mean the corpus or the harness is broken and must not count
/// against the system under test. Application faults mean the system under
/// test diverged from the recorded contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultDomain {
    Tooling,
    Application,
}

impl fmt::Display for FaultDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultDomain::Tooling => f.write_str("tooling"),
            FaultDomain::Application => f.write_str("application"),
        }
    }
}

/// Errors that can occur while verifying one snapshot.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Category directory could not be enumerated, or holds no snapshots.
    #[error("Snapshot category '{category}' unavailable: {reason}")]
    StorageUnavailable { category: String, reason: String },

    /// Recorded request or recorded response could not be decoded.
    #[error("Snapshot corrupt: {0}")]
    SnapshotCorrupt(String),

    /// Live call failed where the snapshot recorded success.
    #[error("Live call failed: {0}")]
    LiveCallFailed(#[from] ClientError),

    /// Live value differs from the recorded one.
    #[error("Response mismatch at {path}: expected {expected}, got {actual}")]
    UnexpectedMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// Live call reported "not found" where the snapshot recorded a value.
    #[error("Live call returned no value but the snapshot recorded one")]
    UnexpectedAbsence,

    /// Live call succeeded where the snapshot recorded a failure.
    #[error("Live call succeeded but the snapshot recorded status {recorded_status}")]
    UnexpectedSuccess { recorded_status: u16 },

    /// Verification task panicked.
    #[error("Verification task panicked: {0}")]
    TaskPanicked(String),
}

impl VerifyError {
    pub fn fault_domain(&self) -> FaultDomain {
        match self {
            VerifyError::StorageUnavailable { .. }
            | VerifyError::SnapshotCorrupt(_)
            | VerifyError::TaskPanicked(_) => FaultDomain::Tooling,
            VerifyError::LiveCallFailed(_)
            | VerifyError::UnexpectedMismatch { .. }
            | VerifyError::UnexpectedAbsence
            | VerifyError::UnexpectedSuccess { .. } => FaultDomain::Application,
        }
    }

    pub(crate) fn corrupt(context: &str, err: impl fmt::Display) -> Self {
        VerifyError::SnapshotCorrupt(format!("{context}: {err}"))
    }
}

/// Errors raised while loading verification settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid plan: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unknown endpoint category: {0}")]
    UnknownEndpoint(String),
}
