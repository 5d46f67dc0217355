//! Batch configuration.
//!
//! A [`TabifyConfig`] is read from TOML, then resolved into a
//! [`BatchConfig`] once the directories are known. Values come from, in
//! order of precedence: command-line flags (applied by the caller), the
//! config file, and the `PDF_TABIFY_PDFS_DIR` / `PDF_TABIFY_OUTPUT_DIR`
//! environment variables.
//!
//! ```toml
//! pdfs_dir = "/data/bulletins"
//! output_dir = "/data/tsv"
//! jobs = 4
//! keep_intermediate = true
//!
//! [extractor]
//! eol = "dos"
//! timeout_secs = 120
//!
//! [extractor.pages]
//! first = 3
//! last = 3
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use pdf_tabify_extract::PdfToTextConfig;
use serde::Deserialize;

/// Environment variable naming the PDF input directory.
pub const ENV_PDFS_DIR: &str = "PDF_TABIFY_PDFS_DIR";

/// Environment variable naming the output directory.
pub const ENV_OUTPUT_DIR: &str = "PDF_TABIFY_OUTPUT_DIR";

/// Errors loading or resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`TabifyConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required value was not provided anywhere.
    #[error("missing {0} (set it in the config file, on the command line, or via the environment)")]
    Missing(&'static str),

    /// A value is out of range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Batch settings as written in a config file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TabifyConfig {
    /// Directory scanned for `*.pdf` files.
    pub pdfs_dir: Option<PathBuf>,
    /// Directory receiving `.spt` and `.tsv` files.
    pub output_dir: Option<PathBuf>,
    /// Maximum number of files processed concurrently.
    pub jobs: usize,
    /// Keep the intermediate `.spt` file after a successful conversion.
    pub keep_intermediate: bool,
    /// `pdftotext` settings.
    pub extractor: PdfToTextConfig,
}

impl Default for TabifyConfig {
    fn default() -> Self {
        Self {
            pdfs_dir: None,
            output_dir: None,
            jobs: 1,
            keep_intermediate: true,
            extractor: PdfToTextConfig::default(),
        }
    }
}

/// Fully resolved batch settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub pdfs_dir: PathBuf,
    pub output_dir: PathBuf,
    pub jobs: usize,
    pub keep_intermediate: bool,
    pub extractor: PdfToTextConfig,
}

impl TabifyConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Resolves against the process environment.
    ///
    /// # Errors
    ///
    /// See [`TabifyConfig::resolve_with`].
    pub fn resolve(self) -> Result<BatchConfig, ConfigError> {
        self.resolve_with(|key| std::env::var_os(key))
    }

    /// Resolves using `env` to look up missing directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if a directory is set nowhere, or
    /// [`ConfigError::Invalid`] if `jobs` is zero or the page range is
    /// invalid.
    pub fn resolve_with(
        self,
        env: impl Fn(&str) -> Option<OsString>,
    ) -> Result<BatchConfig, ConfigError> {
        let from_env = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        let pdfs_dir = self
            .pdfs_dir
            .or_else(|| from_env(ENV_PDFS_DIR))
            .ok_or(ConfigError::Missing("pdfs_dir"))?;
        let output_dir = self
            .output_dir
            .or_else(|| from_env(ENV_OUTPUT_DIR))
            .ok_or(ConfigError::Missing("output_dir"))?;

        if self.jobs == 0 {
            return Err(ConfigError::Invalid {
                field: "jobs",
                reason: "must be at least 1".to_owned(),
            });
        }

        self.extractor
            .pages
            .validate()
            .map_err(|e| ConfigError::Invalid {
                field: "extractor.pages",
                reason: e.to_string(),
            })?;

        Ok(BatchConfig {
            pdfs_dir,
            output_dir,
            jobs: self.jobs,
            keep_intermediate: self.keep_intermediate,
            extractor: self.extractor,
        })
    }
}

#[cfg(test)]
mod tests {
    use pdf_tabify_extract::{EndOfLine, PageRange};

    use super::*;

    fn no_env(_: &str) -> Option<OsString> {
        None
    }

    #[test]
    fn parses_full_document() {
        let config = TabifyConfig::from_toml_str(
            r#"
            pdfs_dir = "/data/pdfs"
            output_dir = "/data/out"
            jobs = 4
            keep_intermediate = false

            [extractor]
            eol = "dos"

            [extractor.pages]
            first = 3
            last = 3
            "#,
        )
        .unwrap();

        let batch = config.resolve_with(no_env).unwrap();
        assert_eq!(batch.pdfs_dir, PathBuf::from("/data/pdfs"));
        assert_eq!(batch.jobs, 4);
        assert!(!batch.keep_intermediate);
        assert_eq!(batch.extractor.eol, EndOfLine::Dos);
        assert_eq!(batch.extractor.pages, PageRange::single(3));
        assert_eq!(batch.extractor.timeout_secs, 120);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = TabifyConfig::from_toml_str("").unwrap();
        assert_eq!(config, TabifyConfig::default());
        assert_eq!(config.jobs, 1);
        assert!(config.keep_intermediate);
    }

    #[test]
    fn environment_fills_missing_directories() {
        let env = |key: &str| match key {
            ENV_PDFS_DIR => Some(OsString::from("/env/pdfs")),
            ENV_OUTPUT_DIR => Some(OsString::from("/env/out")),
            _ => None,
        };
        let config = TabifyConfig {
            output_dir: Some(PathBuf::from("/file/out")),
            ..TabifyConfig::default()
        };

        let batch = config.resolve_with(env).unwrap();
        assert_eq!(batch.pdfs_dir, PathBuf::from("/env/pdfs"));
        assert_eq!(batch.output_dir, PathBuf::from("/file/out"));
    }

    #[test]
    fn missing_directory_is_reported() {
        let err = TabifyConfig::default().resolve_with(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("pdfs_dir")), "{err}");
    }

    #[test]
    fn zero_jobs_is_invalid() {
        let config = TabifyConfig {
            pdfs_dir: Some(PathBuf::from("a")),
            output_dir: Some(PathBuf::from("b")),
            jobs: 0,
            ..TabifyConfig::default()
        };
        let err = config.resolve_with(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "jobs", .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            TabifyConfig::from_toml_str("pdf_dir = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
