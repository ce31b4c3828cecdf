//! Snapshot-based response verification for the estate search benchmark.
//!
//! A snapshot corpus records request/response pairs captured from a reference
//! deployment, one subdirectory per endpoint category. This crate replays
//! randomly sampled snapshots against a live deployment and checks that the
//! live answers still match what was recorded.
//!
//! Every failure is classified into a [`FaultDomain`]: application faults
//! point at the system under test, tooling faults at the corpus or harness.
//!
//! # Example
//!
//! ```ignore
//! use estate_client::{ClientConfig, HttpLiveClient};
//! use snapshot_verify::{SnapshotVerifier, VerifyConfig};
//! use std::sync::Arc;
//!
//! let client = HttpLiveClient::new(ClientConfig::new("http://localhost:1323"))?;
//! let config = VerifyConfig::new("snapshots").with_seed(42);
//!
//! let report = SnapshotVerifier::new(Arc::new(client), config).run().await;
//! assert!(report.application_faults().is_empty());
//! ```

pub mod args;
pub mod collector;
pub mod compare;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod orchestrator;
pub mod query;
pub mod report;
pub mod snapshot;
pub mod surface;
pub mod verifier;

#[cfg(test)]
mod test_support;

pub use args::{OutputFormat, VerifyArgs};
pub use collector::{FailureCollector, FailureRecord, VerificationOutcome};
pub use compare::{compare_documents, compare_values, CompareResult, RuleSet};
pub use config::{VerifyConfig, VerifyPlan};
pub use endpoint::Endpoint;
pub use error::{ConfigError, FaultDomain, VerifyError};
pub use orchestrator::{RunPhase, SnapshotVerifier};
pub use report::{EndpointSummary, VerificationReport};
pub use snapshot::{Snapshot, SnapshotListing, SnapshotStore};
