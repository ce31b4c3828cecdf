//! Concurrency-safe sink for verification outcomes.

use crate::endpoint::Endpoint;
use crate::error::{FaultDomain, VerifyError};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// A classified failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub domain: FaultDomain,
    pub endpoint: Endpoint,
    pub message: String,
    /// Snapshot file the failure was observed on, if any.
    pub source: Option<PathBuf>,
}

impl FailureRecord {
    pub fn from_error(endpoint: Endpoint, err: &VerifyError, source: Option<PathBuf>) -> Self {
        Self {
            domain: err.fault_domain(),
            endpoint,
            message: format!("{}: {err}", endpoint.label()),
            source,
        }
    }
}

/// What one verification task (or one category listing) produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub endpoint: Endpoint,
    pub snapshot: Option<PathBuf>,
    /// `None` when the live system matched the snapshot.
    pub failure: Option<FailureRecord>,
}

impl VerificationOutcome {
    pub fn passed(endpoint: Endpoint, snapshot: PathBuf) -> Self {
        Self {
            endpoint,
            snapshot: Some(snapshot),
            failure: None,
        }
    }

    pub fn failed(endpoint: Endpoint, snapshot: Option<PathBuf>, err: &VerifyError) -> Self {
        let failure = FailureRecord::from_error(endpoint, err, snapshot.clone());
        Self {
            endpoint,
            snapshot,
            failure: Some(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Append-only outcome log shared by all verification tasks of a run.
///
/// Each append takes the lock once, so records are never lost or torn.
#[derive(Debug, Default)]
pub struct FailureCollector {
    outcomes: Mutex<Vec<VerificationOutcome>>,
}

impl FailureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, outcome: VerificationOutcome) {
        if let Some(failure) = &outcome.failure {
            warn!("[{}] {}", failure.domain, failure.message);
        }
        self.lock().push(outcome);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Take every outcome recorded so far, in append order.
    pub fn drain(&self) -> Vec<VerificationOutcome> {
        std::mem::take(&mut *self.lock())
    }

    // A panicking appender cannot leave the Vec half-written, so the data
    // behind a poisoned lock is still valid.
    fn lock(&self) -> MutexGuard<'_, Vec<VerificationOutcome>> {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_append_and_drain() {
        let collector = FailureCollector::new();
        collector.append(VerificationOutcome::passed(
            Endpoint::ChairDetail,
            PathBuf::from("a.json"),
        ));
        collector.append(VerificationOutcome::failed(
            Endpoint::EstateDetail,
            None,
            &VerifyError::SnapshotCorrupt("bad".to_string()),
        ));

        assert_eq!(collector.len(), 2);
        let outcomes = collector.drain();
        assert!(collector.is_empty());
        assert!(outcomes[0].is_success());

        let failure = outcomes[1].failure.as_ref().unwrap();
        assert_eq!(failure.domain, FaultDomain::Tooling);
        assert_eq!(failure.message, "GET /api/estate/:id: Snapshot corrupt: bad");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_not_lost() {
        let collector = Arc::new(FailureCollector::new());
        let mut handles = Vec::new();
        for worker in 0..16 {
            let collector = Arc::clone(&collector);
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    let path = PathBuf::from(format!("{worker}-{i}.json"));
                    collector.append(VerificationOutcome::passed(Endpoint::ChairSearch, path));
                    tokio::task::yield_now().await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut outcomes = collector.drain();
        assert_eq!(outcomes.len(), 800);
        outcomes.sort_by(|a, b| a.snapshot.cmp(&b.snapshot));
        outcomes.dedup();
        assert_eq!(outcomes.len(), 800);
    }
}
