#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch conversion of PDF tables into tab-delimited files.
//!
//! For every `*.pdf` in the input directory, [`run_batch`] runs
//! `pdftotext` to produce a space-aligned `.spt` file, then re-segments
//! each line of it into fields and writes a `.tsv` file. A failure on one
//! file is recorded in the [`BatchReport`] and the batch moves on; only
//! the up-front directory check is fatal.

pub mod config;
pub mod lines;
pub mod paths;
pub mod progress;
pub mod report;
pub mod tabify;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::StreamExt as _;
use pdf_tabify_extract::PdfToText;

pub use config::{BatchConfig, ConfigError, TabifyConfig};
pub use paths::{OutputPaths, discover_pdfs, validate_dirs};
pub use progress::{NullProgress, ProgressCallback, null_progress};
pub use report::{BatchReport, FileOutcome, FileReport};
pub use tabify::{TabifyStats, tabify_file, tabify_reader};

/// Errors from the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A configured directory is unusable. Fatal for the whole batch.
    #[error("invalid {role} directory {}: {reason}", path.display())]
    InvalidDirectory {
        /// Which directory (`"PDF input"` or `"output"`).
        role: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// The output path names the input file itself.
    #[error("refusing to overwrite input {} with its own output", .0.display())]
    SameFile(PathBuf),

    /// Reading or writing a specific file failed.
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn file(path: &Path, source: std::io::Error) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Converts every PDF in `config.pdfs_dir`.
///
/// Up to `config.jobs` files are in flight at once. The report lists files
/// in discovery order regardless of completion order.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidDirectory`] if either directory fails
/// validation, or [`PipelineError::File`] if the input directory cannot be
/// listed. Per-file failures are reported in the returned [`BatchReport`].
pub async fn run_batch(
    config: &BatchConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<BatchReport, PipelineError> {
    validate_dirs(&config.pdfs_dir, &config.output_dir)?;

    let pdfs = discover_pdfs(&config.pdfs_dir)?;
    log::info!(
        "Found {} PDF(s) in {}",
        pdfs.len(),
        config.pdfs_dir.display()
    );
    if pdfs.is_empty() {
        log::warn!("Nothing to convert in {}", config.pdfs_dir.display());
        progress.finish_and_clear();
        return Ok(BatchReport::default());
    }

    progress.set_total(pdfs.len() as u64);

    let extractor = PdfToText::new(config.extractor.clone());
    let files = futures::stream::iter(pdfs)
        .map(|pdf| process_pdf(&extractor, config, pdf, progress))
        .buffered(config.jobs.max(1))
        .collect::<Vec<_>>()
        .await;

    let report = BatchReport { files };
    log::info!("{}", report.summary());
    progress.finish(&report);

    Ok(report)
}

/// Extracts and tabifies one PDF, never failing: errors become outcomes.
async fn process_pdf(
    extractor: &PdfToText,
    config: &BatchConfig,
    pdf: PathBuf,
    progress: &Arc<dyn ProgressCallback>,
) -> FileReport {
    let start = Instant::now();
    let paths = OutputPaths::for_pdf(&pdf, &config.output_dir);

    progress.file_started(&pdf);

    let outcome = convert_pdf(extractor, config, &pdf, &paths).await;

    match &outcome {
        FileOutcome::Converted(stats) => log::info!(
            "Converted {} -> {} ({} lines)",
            pdf.display(),
            paths.output.display(),
            stats.lines
        ),
        FileOutcome::ExtractionFailed { reason } => {
            log::warn!("Extraction failed for {}: {reason}", pdf.display());
        }
        FileOutcome::TabifyFailed { reason } => {
            log::warn!("Conversion failed for {}: {reason}", pdf.display());
        }
    }

    let report = FileReport {
        pdf,
        output: paths.output,
        outcome,
        elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    progress.file_finished(&report);
    report
}

async fn convert_pdf(
    extractor: &PdfToText,
    config: &BatchConfig,
    pdf: &Path,
    paths: &OutputPaths,
) -> FileOutcome {
    if let Err(e) = extractor
        .extract(pdf, config.extractor.pages, &paths.intermediate)
        .await
    {
        return FileOutcome::ExtractionFailed {
            reason: e.to_string(),
        };
    }

    let intermediate = paths.intermediate.clone();
    let output = paths.output.clone();
    let keep_intermediate = config.keep_intermediate;

    let result = tokio::task::spawn_blocking(move || {
        let stats = tabify_file(&intermediate, &output)?;
        if !keep_intermediate && let Err(e) = std::fs::remove_file(&intermediate) {
            log::warn!("Could not remove {}: {e}", intermediate.display());
        }
        Ok::<_, PipelineError>(stats)
    })
    .await;

    match result {
        Ok(Ok(stats)) => FileOutcome::Converted(stats),
        Ok(Err(e)) => FileOutcome::TabifyFailed {
            reason: e.to_string(),
        },
        Err(e) => FileOutcome::TabifyFailed {
            reason: format!("conversion task failed: {e}"),
        },
    }
}
