#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for pdf-tabify.
//!
//! Provides an `indicatif`-backed progress bar behind the
//! [`ProgressCallback`] trait, plus [`init_logger`] which sets up
//! `indicatif-log-bridge` so that `log::info!` and friends are suspended
//! while progress bars redraw.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pdf_tabify_pipeline::{BatchReport, FileReport, ProgressCallback};

pub use indicatif::MultiProgress;

/// Per-PDF progress bar that implements [`ProgressCallback`].
///
/// The message shows the file most recently started and the prefix counts
/// failures so far, so a run going wrong is visible before the summary.
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Style to switch to once `set_total()` provides a known length.
    bar_style: ProgressStyle,
    failed: AtomicU64,
}

impl IndicatifProgress {
    fn new(bar: ProgressBar) -> Self {
        let bar_style = ProgressStyle::with_template(
            "  {prefix:.red} {msg:30!} {wide_bar:.cyan/dim} {pos}/{len} PDFs [{elapsed_precise}, eta {eta}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

        Self {
            bar,
            bar_style,
            failed: AtomicU64::new(0),
        }
    }

    /// Creates the batch progress bar. It spins while the input directory
    /// is scanned and becomes a bar with ETA once the PDF count is known.
    #[must_use]
    pub fn files_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        Arc::new(Self::new(bar))
    }
}

impl ProgressCallback for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(self.bar_style.clone());
    }

    fn file_started(&self, pdf: &Path) {
        if let Some(name) = pdf.file_name() {
            self.bar.set_message(name.to_string_lossy().into_owned());
        }
    }

    fn file_finished(&self, report: &FileReport) {
        if !report.outcome.is_success() {
            let failed = self.failed.fetch_add(1, Ordering::Relaxed) + 1;
            self.bar.set_prefix(format!("{failed} failed"));
        }
        self.bar.inc(1);
    }

    fn finish(&self, report: &BatchReport) {
        self.bar.finish_with_message(report.summary());
    }

    fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Initializes the global logger wrapped in `indicatif-log-bridge` so that
/// `log::info!` and friends are suspended while progress bars redraw.
///
/// Defaults to the `info` level for pdf-tabify crates when `RUST_LOG` is
/// unset. Returns the [`MultiProgress`] that all progress bars must be
/// added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    // Build the pretty-env-logger logger manually so we can wrap it.
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.parse_filters("pdf_tabify=info"),
    };
    let logger = builder.build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok(); // Ignore error if logger was already set (e.g., in tests)

    log::set_max_level(level);

    multi
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pdf_tabify_pipeline::{FileOutcome, TabifyStats};

    use super::*;

    fn file_report(name: &str, outcome: FileOutcome) -> FileReport {
        FileReport {
            pdf: PathBuf::from(format!("/in/{name}.pdf")),
            output: PathBuf::from(format!("/out/{name}.tsv")),
            outcome,
            elapsed_ms: 5,
        }
    }

    #[test]
    fn tracks_current_file_and_failures() {
        let progress = IndicatifProgress::new(ProgressBar::hidden());
        progress.set_total(2);

        progress.file_started(Path::new("/in/jan.pdf"));
        assert_eq!(progress.bar.message(), "jan.pdf");

        let jan = file_report("jan", FileOutcome::Converted(TabifyStats::default()));
        let feb = file_report(
            "feb",
            FileOutcome::ExtractionFailed {
                reason: "timed out".to_owned(),
            },
        );
        progress.file_finished(&jan);
        assert_eq!(progress.bar.prefix(), "");
        progress.file_finished(&feb);
        assert_eq!(progress.bar.prefix(), "1 failed");
        assert_eq!(progress.bar.position(), 2);

        progress.finish(&BatchReport {
            files: vec![jan, feb],
        });
        assert!(progress.bar.is_finished());
        assert_eq!(progress.bar.message(), "1 of 2 PDF(s) converted, 1 failed");
    }
}
