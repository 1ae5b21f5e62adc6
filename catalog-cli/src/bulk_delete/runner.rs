//! The per-identifier delete loop
//!
//! Issues one delete per identifier and folds each outcome into a caller-owned
//! [`RunSummary`]. With the default configuration exactly one request is
//! outstanding at a time; the next one is not issued until the previous
//! outcome (success, error response, transport fault or timeout) is known.
//!
//! With `max_in_flight > 1` up to that many requests run concurrently.
//! Outcomes are still folded in batch order, so progress stays monotone and
//! `failed_items` keeps batch order, but an update for item k may arrive after
//! later items have already finished on the server.

use futures::StreamExt;
use futures::stream;
use log::{debug, error, info, warn};
use std::pin::pin;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::summary::{DeletionOutcome, FailureKind, RunSummary};
use crate::api::{DeleteByKey, DeleteResponse, ResilienceConfig};
use crate::sheet::Identifier;

/// Notifications published while a run progresses
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
    /// Summary initialised, nothing attempted yet
    Started(&'a RunSummary),
    /// One identifier finished
    Completed {
        outcome: &'a DeletionOutcome,
        summary: &'a RunSummary,
    },
    /// Terminal summary; no further events follow
    Finished(&'a RunSummary),
}

impl<'a> RunEvent<'a> {
    pub fn summary(&self) -> &'a RunSummary {
        match self {
            RunEvent::Started(summary) | RunEvent::Finished(summary) => summary,
            RunEvent::Completed { summary, .. } => summary,
        }
    }
}

/// Delete every identifier in `batch`, updating `summary` as outcomes arrive.
///
/// `summary` must already be initialised with [`RunSummary::start`]. Per-item
/// failures never abort the run. Cancellation is checked before each delete
/// is issued; once observed, no further deletes start, and deletes already
/// issued are still recorded.
pub async fn run_batch<C, F>(
    client: &C,
    batch: &[Identifier],
    config: &ResilienceConfig,
    cancel: &CancellationToken,
    summary: &mut RunSummary,
    mut observer: F,
) where
    C: DeleteByKey + ?Sized,
    F: FnMut(RunEvent<'_>),
{
    let timeout = config.timeout.request_timeout;
    let in_flight = config.in_flight_limit();

    info!(
        "Starting bulk delete of {} identifiers ({} in flight)",
        batch.len(),
        in_flight
    );
    observer(RunEvent::Started(&*summary));

    let mut outcomes = pin!(stream::iter(batch)
        .map(|identifier| delete_one(client, identifier, timeout, cancel))
        .buffered(in_flight));

    while let Some(outcome) = outcomes.next().await {
        let Some(outcome) = outcome else {
            summary.cancelled = true;
            continue;
        };

        summary.record(&outcome);
        observer(RunEvent::Completed {
            outcome: &outcome,
            summary: &*summary,
        });
    }

    if summary.cancelled {
        warn!(
            "Bulk delete cancelled after {}/{} identifiers",
            summary.completed(),
            summary.total
        );
    }
    summary.finish();
    info!(
        "Bulk delete finished: {} succeeded, {} failed of {}",
        summary.success, summary.failed, summary.total
    );
    observer(RunEvent::Finished(&*summary));
}

/// Attempt one delete and classify the result. `None` if cancelled before
/// the delete was issued.
///
/// The timeout starts once a slot is reserved, so waiting behind other
/// requests never counts against it.
async fn delete_one<C>(
    client: &C,
    identifier: &Identifier,
    timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> Option<DeletionOutcome>
where
    C: DeleteByKey + ?Sized,
{
    if cancel.is_cancelled() {
        return None;
    }

    let _slot = match client.reserve().await {
        Ok(slot) => slot,
        Err(e) => return Some(classify(identifier, Err(e))),
    };

    if cancel.is_cancelled() {
        return None;
    }

    let call = client.delete(identifier);

    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                error!("Delete {} timed out after {:?}", identifier, limit);
                return Some(DeletionOutcome::failed(
                    identifier.clone(),
                    FailureKind::TimedOut(limit),
                ));
            }
        },
        None => call.await,
    };

    Some(classify(identifier, result))
}

fn classify(identifier: &Identifier, result: anyhow::Result<DeleteResponse>) -> DeletionOutcome {
    let identifier = identifier.clone();

    match result {
        Ok(DeleteResponse::Deleted { deleted_count }) => {
            debug!("Deleted {} ({} records)", identifier, deleted_count);
            DeletionOutcome::succeeded(identifier, deleted_count)
        }
        Ok(DeleteResponse::NotFound { message }) => {
            warn!(
                "No product matched {}{}",
                identifier,
                message.map(|m| format!(": {}", m)).unwrap_or_default()
            );
            DeletionOutcome::failed(identifier, FailureKind::NotFound)
        }
        Ok(DeleteResponse::Rejected { message }) => {
            error!("Delete {} rejected: {:?}", identifier, message);
            DeletionOutcome::failed(identifier, FailureKind::Rejected { message })
        }
        Ok(DeleteResponse::Fault { status, message }) => {
            error!("Delete {} failed with {}: {:?}", identifier, status, message);
            DeletionOutcome::failed(identifier, FailureKind::Fault { status, message })
        }
        Err(e) => {
            error!("Delete {} transport error: {:#}", identifier, e);
            DeletionOutcome::failed(identifier, FailureKind::Transport(format!("{:#}", e)))
        }
    }
}
