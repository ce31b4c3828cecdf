//! Fan-out of verification tasks across endpoint categories.

use crate::collector::{FailureCollector, VerificationOutcome};
use crate::config::{VerifyConfig, VerifyPlan};
use crate::endpoint::Endpoint;
use crate::error::VerifyError;
use crate::report::VerificationReport;
use crate::snapshot::{SnapshotListing, SnapshotStore};
use estate_client::LiveClient;
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Lifecycle of one verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Dispatching,
    AwaitingCompletion,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Idle => f.write_str("idle"),
            RunPhase::Dispatching => f.write_str("dispatching"),
            RunPhase::AwaitingCompletion => f.write_str("awaiting completion"),
            RunPhase::Done => f.write_str("done"),
        }
    }
}

/// Runs one snapshot verification pass against a live system.
///
/// Every category in [`Endpoint::ALL`] gets the number of tasks its plan
/// entry asks for. All tasks share one [`FailureCollector`] and one
/// cancellation token, and [`run`](Self::run) returns only after every task
/// of every category has finished.
pub struct SnapshotVerifier {
    client: Arc<dyn LiveClient>,
    store: SnapshotStore,
    plan: VerifyPlan,
    cancel: CancellationToken,
    rng: StdRng,
    phase: RunPhase,
    collector: Arc<FailureCollector>,
}

impl SnapshotVerifier {
    pub fn new(client: Arc<dyn LiveClient>, config: VerifyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            client,
            store: SnapshotStore::new(config.snapshots_dir),
            plan: config.plan,
            cancel: CancellationToken::new(),
            rng,
            phase: RunPhase::Idle,
            collector: Arc::new(FailureCollector::new()),
        }
    }

    /// Share an externally owned cancellation token with every task.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts in-flight live calls when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Dispatch every category, wait for all tasks, and report.
    pub async fn run(mut self) -> VerificationReport {
        let started = Instant::now();
        info!(
            "Starting snapshot verification: {} tasks from {}",
            self.plan.total_tasks(),
            self.store.root().display()
        );

        self.enter(RunPhase::Dispatching);
        let mut tasks = JoinSet::new();
        for endpoint in Endpoint::ALL {
            self.dispatch(endpoint, &mut tasks).await;
        }

        self.enter(RunPhase::AwaitingCompletion);
        while let Some(joined) = tasks.join_next().await {
            // Tasks catch their own panics, so this only fires on runtime shutdown.
            if let Err(e) = joined {
                warn!("Verification task did not complete: {e}");
            }
        }

        self.enter(RunPhase::Done);
        let report = VerificationReport::new(self.collector.drain(), started.elapsed());
        info!("{}", report.summary());
        report
    }

    fn enter(&mut self, phase: RunPhase) {
        debug!("Verification run: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    async fn dispatch(&mut self, endpoint: Endpoint, tasks: &mut JoinSet<()>) {
        let count = self.plan.tasks_for(endpoint);
        if count == 0 {
            debug!("Skipping {}: no tasks planned", endpoint.label());
            return;
        }

        let listing = match self.store.list_category(endpoint.dir_name()).await {
            Ok(listing) => Arc::new(listing),
            Err(err) => {
                self.collector
                    .append(VerificationOutcome::failed(endpoint, None, &err));
                return;
            }
        };

        info!(
            "Dispatching {count} tasks for {} ({} snapshots)",
            endpoint.label(),
            listing.len()
        );

        for _ in 0..count {
            let task_rng = StdRng::seed_from_u64(self.rng.random());
            let task = VerificationTask {
                endpoint,
                listing: Arc::clone(&listing),
                client: Arc::clone(&self.client),
                cancel: self.cancel.clone(),
                collector: Arc::clone(&self.collector),
            };
            tasks.spawn(task.run(task_rng));
        }
    }
}

/// One sampled snapshot replayed against the live system.
struct VerificationTask {
    endpoint: Endpoint,
    listing: Arc<SnapshotListing>,
    client: Arc<dyn LiveClient>,
    cancel: CancellationToken,
    collector: Arc<FailureCollector>,
}

impl VerificationTask {
    async fn run(self, mut rng: StdRng) {
        let path = self.listing.sample(&mut rng).to_path_buf();
        let endpoint = self.endpoint;

        let result = AssertUnwindSafe(self.verify(&path)).catch_unwind().await;
        let outcome = match result {
            Ok(Ok(())) => VerificationOutcome::passed(endpoint, path),
            Ok(Err(err)) => VerificationOutcome::failed(endpoint, Some(path), &err),
            Err(panic) => VerificationOutcome::failed(
                endpoint,
                Some(path),
                &VerifyError::TaskPanicked(panic_message(panic.as_ref())),
            ),
        };
        self.collector.append(outcome);
    }

    async fn verify(&self, path: &Path) -> Result<(), VerifyError> {
        debug!("Verifying {} against {}", self.endpoint.label(), path.display());
        let snapshot = SnapshotStore::load(path).await?;
        self.endpoint
            .verify(self.client.as_ref(), &snapshot, &self.cancel)
            .await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
