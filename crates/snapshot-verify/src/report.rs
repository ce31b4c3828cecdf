//! Verification report types.

use crate::collector::{FailureRecord, VerificationOutcome};
use crate::endpoint::Endpoint;
use crate::error::FaultDomain;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde::Serialize;
use std::time::Duration;

/// Per-category counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSummary {
    pub endpoint: Endpoint,
    /// Outcomes recorded (tasks plus listing failures).
    pub outcomes: usize,
    pub succeeded: usize,
    pub application_faults: usize,
    pub tooling_faults: usize,
}

/// Everything a run recorded, read after the completion barrier.
///
/// Deliberately verdict-free: callers decide what the fault counts mean.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationReport {
    /// Outcomes in the order they were appended.
    pub outcomes: Vec<VerificationOutcome>,
    /// Wall-clock time from dispatch to barrier.
    pub total_duration: Duration,
}

impl VerificationReport {
    pub fn new(outcomes: Vec<VerificationOutcome>, total_duration: Duration) -> Self {
        Self {
            outcomes,
            total_duration,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &FailureRecord> {
        self.outcomes.iter().filter_map(|o| o.failure.as_ref())
    }

    pub fn faults(&self, domain: FaultDomain) -> impl Iterator<Item = &FailureRecord> {
        self.failures().filter(move |f| f.domain == domain)
    }

    pub fn application_faults(&self) -> Vec<&FailureRecord> {
        self.faults(FaultDomain::Application).collect()
    }

    pub fn tooling_faults(&self) -> Vec<&FailureRecord> {
        self.faults(FaultDomain::Tooling).collect()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Counts for one category.
    pub fn for_endpoint(&self, endpoint: Endpoint) -> EndpointSummary {
        let mut summary = EndpointSummary {
            endpoint,
            outcomes: 0,
            succeeded: 0,
            application_faults: 0,
            tooling_faults: 0,
        };
        for outcome in self.outcomes.iter().filter(|o| o.endpoint == endpoint) {
            summary.outcomes += 1;
            match outcome.failure.as_ref().map(|f| f.domain) {
                None => summary.succeeded += 1,
                Some(FaultDomain::Application) => summary.application_faults += 1,
                Some(FaultDomain::Tooling) => summary.tooling_faults += 1,
            }
        }
        summary
    }

    /// Counts for every category, in dispatch order.
    pub fn per_endpoint(&self) -> Vec<EndpointSummary> {
        Endpoint::ALL
            .into_iter()
            .map(|e| self.for_endpoint(e))
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Snapshot verification: {} outcomes in {:?} - {} succeeded, {} application faults, {} tooling faults",
            self.outcomes.len(),
            self.total_duration,
            self.succeeded(),
            self.faults(FaultDomain::Application).count(),
            self.faults(FaultDomain::Tooling).count()
        )
    }

    /// Render per-category counts followed by every failure message.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            "Endpoint",
            "Outcomes",
            "Succeeded",
            "Application",
            "Tooling",
        ]);

        for summary in self.per_endpoint() {
            table.add_row(vec![
                Cell::new(summary.endpoint.label()),
                Cell::new(summary.outcomes),
                Cell::new(summary.succeeded),
                fault_cell(summary.application_faults, Color::Red),
                fault_cell(summary.tooling_faults, Color::Yellow),
            ]);
        }

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(&self.summary());
        output.push('\n');

        let failures: Vec<_> = self.failures().collect();
        if !failures.is_empty() {
            output.push_str("\nFailures:\n");
            for failure in failures {
                output.push_str(&format!("  [{}] {}", failure.domain, failure.message));
                if let Some(source) = &failure.source {
                    output.push_str(&format!(" (snapshot: {})", source.display()));
                }
                output.push('\n');
            }
        }

        output
    }
}

fn fault_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        Cell::new(count)
    }
}
