#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Bounded `pdftotext` invocation.
//!
//! Runs poppler's `pdftotext` as a child process to turn the tables in a
//! PDF into space-aligned columnar text. Each run is limited by a
//! wall-clock timeout; a run that does not finish in time is killed and
//! reported as [`ExtractError::Timeout`].
//!
//! The primary entry point is [`PdfToText::extract`].

pub mod config;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;

pub use config::{EndOfLine, Layout, PageRange, PdfToTextConfig};

/// Errors from a single extraction run.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The program could not be started (usually: not installed).
    #[error("failed to run '{program}' (is poppler installed?): {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program did not finish within the configured timeout.
    #[error("extraction timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The program exited unsuccessfully.
    #[error("extraction exited with {status}: {stderr}")]
    Failed {
        /// Exit status of the program.
        status: ExitStatus,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The program reported success but wrote no output file.
    #[error("extraction produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    /// The requested page range is empty or uses page 0.
    #[error("invalid page range: first={first:?} last={last:?}")]
    InvalidPageRange {
        /// First page requested.
        first: Option<u32>,
        /// Last page requested.
        last: Option<u32>,
    },

    /// Waiting on the child process failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs `pdftotext` with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct PdfToText {
    config: PdfToTextConfig,
}

impl PdfToText {
    #[must_use]
    pub const fn new(config: PdfToTextConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &PdfToTextConfig {
        &self.config
    }

    /// Builds the argument vector for one run, e.g.
    /// `-table -eol dos -f 3 -l 3 in.pdf out.spt`.
    #[must_use]
    pub fn command_args(&self, source: &Path, pages: PageRange, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.config.layout.flag().into(),
            "-eol".into(),
            self.config.eol.to_string().into(),
        ];

        if let Some(first) = pages.first {
            args.push("-f".into());
            args.push(first.to_string().into());
        }
        if let Some(last) = pages.last {
            args.push("-l".into());
            args.push(last.to_string().into());
        }

        args.push(source.into());
        args.push(output.into());
        args
    }

    /// Extracts `pages` of `source` into the text file `output`.
    ///
    /// The child is killed if it outlives the configured timeout.
    ///
    /// # Errors
    ///
    /// * [`ExtractError::InvalidPageRange`] - `pages` fails validation
    /// * [`ExtractError::Spawn`] - the program could not be started
    /// * [`ExtractError::Timeout`] - the run exceeded the timeout
    /// * [`ExtractError::Failed`] - the program exited unsuccessfully
    /// * [`ExtractError::MissingOutput`] - no output file was written
    pub async fn extract(
        &self,
        source: &Path,
        pages: PageRange,
        output: &Path,
    ) -> Result<(), ExtractError> {
        pages.validate()?;

        let args = self.command_args(source, pages, output);
        let timeout = self.config.timeout();

        log::debug!(
            "Running {} {:?} (timeout {}s)",
            self.config.program,
            args,
            timeout.as_secs()
        );

        let child = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExtractError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let result = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| ExtractError::Timeout(timeout))??;

        if !result.status.success() {
            return Err(ExtractError::Failed {
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_owned(),
            });
        }

        if !tokio::fs::try_exists(output).await.unwrap_or(false) {
            return Err(ExtractError::MissingOutput(output.to_path_buf()));
        }

        log::debug!("Extracted {} -> {}", source.display(), output.display());

        Ok(())
    }
}
