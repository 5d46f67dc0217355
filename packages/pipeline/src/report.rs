//! Per-file outcomes of a batch run.

use std::path::PathBuf;

use serde::Serialize;

use crate::tabify::TabifyStats;

/// What happened to one PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The `.tsv` file was written.
    Converted(TabifyStats),
    /// `pdftotext` failed or timed out; no `.tsv` was written.
    ExtractionFailed { reason: String },
    /// Extraction succeeded but the `.spt` could not be converted.
    TabifyFailed { reason: String },
}

impl FileOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Converted(_))
    }

    /// The failure reason, if this outcome is a failure.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Converted(_) => None,
            Self::ExtractionFailed { reason } | Self::TabifyFailed { reason } => Some(reason),
        }
    }
}

/// Outcome for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// The input PDF.
    pub pdf: PathBuf,
    /// Where the `.tsv` was (or would have been) written.
    pub output: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
    /// Wall-clock time spent on this file, in milliseconds.
    pub elapsed_ms: u64,
}

/// Outcomes for every PDF in a batch, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Number of files converted successfully.
    #[must_use]
    pub fn converted(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_success()).count()
    }

    /// Number of files that failed at any step.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.files.len() - self.converted()
    }

    /// True if there was at least one file and none converted.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        !self.files.is_empty() && self.converted() == 0
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} of {} PDF(s) converted, {} failed",
            self.converted(),
            self.files.len(),
            self.failed()
        )
    }

    /// Pretty-printed JSON representation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, outcome: FileOutcome) -> FileReport {
        FileReport {
            pdf: PathBuf::from(format!("/in/{name}.pdf")),
            output: PathBuf::from(format!("/out/{name}.tsv")),
            outcome,
            elapsed_ms: 12,
        }
    }

    #[test]
    fn counts_and_summarises() {
        let batch = BatchReport {
            files: vec![
                report(
                    "a",
                    FileOutcome::Converted(TabifyStats {
                        lines: 10,
                        fields: 30,
                    }),
                ),
                report(
                    "b",
                    FileOutcome::ExtractionFailed {
                        reason: "timed out".to_owned(),
                    },
                ),
            ],
        };

        assert_eq!(batch.converted(), 1);
        assert_eq!(batch.failed(), 1);
        assert!(!batch.all_failed());
        assert_eq!(batch.summary(), "1 of 2 PDF(s) converted, 1 failed");
    }

    #[test]
    fn empty_batch_has_not_all_failed() {
        assert!(!BatchReport::default().all_failed());
    }

    #[test]
    fn serializes_flat_status_records() {
        let batch = BatchReport {
            files: vec![report(
                "a",
                FileOutcome::Converted(TabifyStats {
                    lines: 2,
                    fields: 4,
                }),
            )],
        };

        let json: serde_json::Value = serde_json::from_str(&batch.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "files": [{
                    "pdf": "/in/a.pdf",
                    "output": "/out/a.tsv",
                    "status": "converted",
                    "lines": 2,
                    "fields": 4,
                    "elapsed_ms": 12,
                }]
            })
        );
    }
}
