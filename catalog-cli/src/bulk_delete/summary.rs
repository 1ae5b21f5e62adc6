//! Per-item outcomes and the aggregate run summary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::sheet::{Identifier, InvalidRow};

/// Why a single delete did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// No product matched the identifier
    NotFound,
    /// Server refused the request (HTTP 400)
    Rejected { message: Option<String> },
    /// Server answered with an error status
    Fault { status: u16, message: Option<String> },
    /// No answer arrived: connection refused, reset, unreadable body
    Transport(String),
    /// The call exceeded the per-call timeout
    TimedOut(Duration),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::Rejected { message: Some(m) } => write!(f, "rejected: {}", m),
            FailureKind::Rejected { message: None } => write!(f, "rejected"),
            FailureKind::Fault {
                status,
                message: Some(m),
            } => write!(f, "server error {}: {}", status, m),
            FailureKind::Fault {
                status,
                message: None,
            } => write!(f, "server error {}", status),
            FailureKind::Transport(e) => write!(f, "transport error: {}", e),
            FailureKind::TimedOut(limit) => write!(f, "timed out after {:?}", limit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Succeeded { deleted_count: u64 },
    Failed(FailureKind),
}

/// Result of one delete attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub identifier: Identifier,
    pub status: OutcomeStatus,
}

impl DeletionOutcome {
    pub fn succeeded(identifier: Identifier, deleted_count: u64) -> Self {
        Self {
            identifier,
            status: OutcomeStatus::Succeeded { deleted_count },
        }
    }

    pub fn failed(identifier: Identifier, kind: FailureKind) -> Self {
        Self {
            identifier,
            status: OutcomeStatus::Failed(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded { .. })
    }

    pub fn failure(&self) -> Option<&FailureKind> {
        match &self.status {
            OutcomeStatus::Failed(kind) => Some(kind),
            OutcomeStatus::Succeeded { .. } => None,
        }
    }
}

/// `round(100 * completed / total)`, halves rounding up
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u128;
    let total = total as u128;
    ((200 * completed + total) / (2 * total)) as u8
}

/// Aggregate state of one pass over a batch.
///
/// Counters only grow during a run, so `progress` never decreases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// Failed identifiers in the order their outcomes were recorded
    pub failed_items: Vec<Identifier>,
    /// Rows left out of the batch by the decoder; not part of `total`
    pub invalid_rows: Vec<InvalidRow>,
    /// Integer percentage 0..=100
    pub progress: u8,
    /// Set when the run stopped before every identifier was attempted
    pub cancelled: bool,
}

impl RunSummary {
    /// Initial summary for a batch of `total` identifiers
    pub fn start(total: usize, invalid_rows: Vec<InvalidRow>) -> Self {
        Self {
            total,
            invalid_rows,
            ..Self::default()
        }
    }

    /// Fold one outcome in and recompute progress
    pub fn record(&mut self, outcome: &DeletionOutcome) {
        if outcome.is_success() {
            self.success += 1;
        } else {
            self.failed += 1;
            self.failed_items.push(outcome.identifier.clone());
        }
        self.progress = progress_percent(self.completed(), self.total);
    }

    /// Freeze the summary at the end of a run
    pub fn finish(&mut self) {
        if self.is_complete() {
            self.progress = 100;
        }
    }

    /// Back to the empty state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn completed(&self) -> usize {
        self.success + self.failed
    }

    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.completed() == self.total
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
