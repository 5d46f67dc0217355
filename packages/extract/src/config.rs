//! Extraction tool configuration.
//!
//! Deserializable from the `[extractor]` table of a pdf-tabify TOML config.
//! Every field has a default, so an empty table (or no table) yields a
//! working `pdftotext -table` setup with a 120 second timeout.

use std::time::Duration;

use serde::Deserialize;
use strum_macros::{Display, EnumString};

use crate::ExtractError;

/// Default wall-clock limit for one extraction.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default extraction program, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "pdftotext";

/// How `pdftotext` arranges text on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    /// `-table`: keep table columns aligned with spaces.
    #[default]
    Table,
    /// `-layout`: keep the physical page layout.
    Layout,
    /// `-raw`: content stream order.
    Raw,
}

impl Layout {
    /// The command-line flag selecting this layout.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Table => "-table",
            Self::Layout => "-layout",
            Self::Raw => "-raw",
        }
    }
}

/// Line terminator written by the extraction tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EndOfLine {
    #[default]
    Unix,
    Dos,
    Mac,
}

/// Inclusive, 1-based page range. `None` means "from the first page" or
/// "to the last page" respectively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageRange {
    /// First page to extract.
    pub first: Option<u32>,
    /// Last page to extract.
    pub last: Option<u32>,
}

impl PageRange {
    /// Every page of the document.
    pub const ALL: Self = Self {
        first: None,
        last: None,
    };

    /// A range covering exactly one page.
    #[must_use]
    pub const fn single(page: u32) -> Self {
        Self {
            first: Some(page),
            last: Some(page),
        }
    }

    /// Checks that pages are 1-based and that `first <= last`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidPageRange`] if the range is empty or
    /// uses page 0.
    pub fn validate(self) -> Result<(), ExtractError> {
        let zero = self.first == Some(0) || self.last == Some(0);
        let reversed = matches!((self.first, self.last), (Some(f), Some(l)) if f > l);

        if zero || reversed {
            return Err(ExtractError::InvalidPageRange {
                first: self.first,
                last: self.last,
            });
        }
        Ok(())
    }
}

/// Settings for the `pdftotext` collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfToTextConfig {
    /// Program name or path.
    pub program: String,
    /// Text layout mode.
    pub layout: Layout,
    /// Line terminator for the intermediate file.
    pub eol: EndOfLine,
    /// Pages to extract from each PDF.
    pub pages: PageRange,
    /// Wall-clock limit for one extraction, in seconds.
    pub timeout_secs: u64,
}

impl Default for PdfToTextConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_owned(),
            layout: Layout::default(),
            eol: EndOfLine::default(),
            pages: PageRange::ALL,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PdfToTextConfig {
    /// The extraction timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
