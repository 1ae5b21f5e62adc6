//! Spreadsheet-driven bulk deletion
//!
//! Flow: an upload is decoded into a batch of identifiers, then one delete is
//! issued per identifier against a [`DeleteByKey`](crate::api::DeleteByKey)
//! collaborator. Each outcome is folded into a [`RunSummary`] and published
//! to an observer as a [`RunEvent`].

pub mod orchestrator;
pub mod runner;
pub mod summary;

pub use orchestrator::{BulkDeleteOptions, BulkDeleteOrchestrator, RunError, Upload};
pub use runner::{RunEvent, run_batch};
pub use summary::{DeletionOutcome, FailureKind, OutcomeStatus, RunSummary, progress_percent};
