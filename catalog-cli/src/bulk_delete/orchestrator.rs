//! Stateful bulk-delete workflow: select an upload, run it, reset

use log::{debug, info};
use std::path::Path;
use tokio_util::sync::CancellationToken;

use super::runner::{RunEvent, run_batch};
use super::summary::RunSummary;
use crate::api::{DeleteByKey, ResilienceConfig};
use crate::sheet::{DecodeError, DecodeOptions, DecodedBatch, decode_identifiers};

/// Errors that stop a run before any delete is issued
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("no upload selected")]
    NoUpload,
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A selected spreadsheet upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Settings for a bulk-delete run
#[derive(Debug, Clone, Default)]
pub struct BulkDeleteOptions {
    pub decode: DecodeOptions,
    pub resilience: ResilienceConfig,
}

/// Owns the upload selection and the run summary for one delete collaborator.
///
/// Runs take `&mut self`, so at most one run is active per orchestrator.
pub struct BulkDeleteOrchestrator<C> {
    client: C,
    options: BulkDeleteOptions,
    upload: Option<Upload>,
    summary: RunSummary,
}

impl<C: DeleteByKey> BulkDeleteOrchestrator<C> {
    pub fn new(client: C, options: BulkDeleteOptions) -> Self {
        Self {
            client,
            options,
            upload: None,
            summary: RunSummary::default(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn options(&self) -> &BulkDeleteOptions {
        &self.options
    }

    /// Select an upload from disk, replacing any previous selection
    pub fn select_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DecodeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.select_bytes(name, bytes);
        Ok(())
    }

    /// Select an upload already held in memory
    pub fn select_bytes(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        debug!("Selected upload {} ({} bytes)", name, bytes.len());
        self.upload = Some(Upload { name, bytes });
    }

    pub fn upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn progress(&self) -> u8 {
        self.summary.progress
    }

    /// Decode the selected upload without touching the summary
    pub fn decode(&self) -> Result<DecodedBatch, RunError> {
        let upload = self.upload.as_ref().ok_or(RunError::NoUpload)?;
        info!("Decoding {}", upload.name);
        Ok(decode_identifiers(&upload.bytes, &self.options.decode)?)
    }

    /// Decode the selected upload and delete every identifier in it.
    ///
    /// The summary is reset first, so a decode failure leaves it empty rather
    /// than showing the previous run. Per-item failures are folded into the
    /// returned summary; only [`RunError`] aborts.
    pub async fn run<F>(
        &mut self,
        cancel: &CancellationToken,
        observer: F,
    ) -> Result<RunSummary, RunError>
    where
        F: FnMut(RunEvent<'_>),
    {
        self.summary.reset();
        let batch = self.decode()?;
        Ok(self.run_decoded(batch, cancel, observer).await)
    }

    /// Delete every identifier in a batch obtained from [`decode`](Self::decode)
    pub async fn run_decoded<F>(
        &mut self,
        batch: DecodedBatch,
        cancel: &CancellationToken,
        observer: F,
    ) -> RunSummary
    where
        F: FnMut(RunEvent<'_>),
    {
        self.summary = RunSummary::start(batch.len(), batch.invalid_rows);
        run_batch(
            &self.client,
            &batch.identifiers,
            &self.options.resilience,
            cancel,
            &mut self.summary,
            observer,
        )
        .await;

        self.summary.clone()
    }

    /// Clear the selection and summary; valid before or after a run
    pub fn reset(&mut self) {
        self.upload = None;
        self.summary.reset();
    }
}
