//! Configuration types for snapshot verification.

use crate::endpoint::Endpoint;
use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Number of concurrent verification tasks per endpoint category.
///
/// YAML format (categories not listed keep their default):
///
/// ```yaml
/// tasks:
///   chair_detail: 10
///   estate_nazotte: 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPlan {
    tasks: BTreeMap<Endpoint, usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
    #[serde(default)]
    tasks: BTreeMap<String, usize>,
}

impl VerifyPlan {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: PlanFile = serde_yaml::from_str(yaml)?;
        let mut plan = Self::default();
        for (category, count) in file.tasks {
            plan.tasks.insert(category.parse::<Endpoint>()?, count);
        }
        Ok(plan)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// A plan that launches nothing; combine with [`with_tasks`](Self::with_tasks).
    pub fn empty() -> Self {
        Self {
            tasks: Endpoint::ALL.into_iter().map(|e| (e, 0)).collect(),
        }
    }

    pub fn with_tasks(mut self, endpoint: Endpoint, count: usize) -> Self {
        self.tasks.insert(endpoint, count);
        self
    }

    pub fn tasks_for(&self, endpoint: Endpoint) -> usize {
        self.tasks.get(&endpoint).copied().unwrap_or(0)
    }

    pub fn total_tasks(&self) -> usize {
        self.tasks.values().sum()
    }
}

impl Default for VerifyPlan {
    fn default() -> Self {
        Self {
            tasks: Endpoint::ALL
                .into_iter()
                .map(|e| (e, e.default_tasks()))
                .collect(),
        }
    }
}

/// Configuration for a verification run.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Root of the snapshot corpus (one subdirectory per category).
    pub snapshots_dir: PathBuf,
    /// Tasks per category.
    pub plan: VerifyPlan,
    /// Seed for snapshot sampling. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl VerifyConfig {
    pub fn new(snapshots_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots_dir: snapshots_dir.into(),
            plan: VerifyPlan::default(),
            seed: None,
        }
    }

    pub fn with_plan(mut self, plan: VerifyPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
