//! Progress reporting for batch runs.
//!
//! [`run_batch`](crate::run_batch) reports each PDF as it starts and
//! finishes. The CLI renders these events with `indicatif`; tests and
//! library callers use [`NullProgress`].

use std::path::Path;
use std::sync::Arc;

use crate::report::{BatchReport, FileReport};

/// Receives per-PDF events from a batch run.
///
/// Implementations must be `Send + Sync` because files may be processed
/// concurrently. With more than one job, `file_started` calls for later
/// files may arrive before `file_finished` for earlier ones.
pub trait ProgressCallback: Send + Sync {
    /// Number of PDFs discovered. Called once, before any file starts.
    fn set_total(&self, total: u64);

    /// Extraction of `pdf` is about to begin.
    fn file_started(&self, pdf: &Path);

    /// `pdf` is done, successfully or not.
    fn file_finished(&self, report: &FileReport);

    /// Every file is done.
    fn finish(&self, report: &BatchReport);

    /// The run ended without converting anything (empty input directory).
    fn finish_and_clear(&self);
}

/// Ignores all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn file_started(&self, _pdf: &Path) {}
    fn file_finished(&self, _report: &FileReport) {}
    fn finish(&self, _report: &BatchReport) {}
    fn finish_and_clear(&self) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
