//! Directory checks, PDF discovery and output naming.
//!
//! `<name>.pdf` in the input directory becomes `<name>.spt` (space-aligned
//! text from the extractor) and `<name>.tsv` (tab-delimited records) in
//! the output directory.

use std::path::{Path, PathBuf};

use crate::PipelineError;

/// Extension of the intermediate space-delimited text.
pub const INTERMEDIATE_EXTENSION: &str = "spt";

/// Extension of the final tab-delimited output.
pub const OUTPUT_EXTENSION: &str = "tsv";

/// Output locations derived from one input PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Intermediate `.spt` file.
    pub intermediate: PathBuf,
    /// Final `.tsv` file.
    pub output: PathBuf,
}

impl OutputPaths {
    /// Derives the `.spt` and `.tsv` paths for `pdf` inside `output_dir`.
    #[must_use]
    pub fn for_pdf(pdf: &Path, output_dir: &Path) -> Self {
        let stem = pdf.file_stem().unwrap_or_else(|| pdf.as_os_str());

        // Appended rather than `with_extension` so dotted stems survive.
        let named = |extension: &str| {
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(extension);
            output_dir.join(name)
        };

        Self {
            intermediate: named(INTERMEDIATE_EXTENSION),
            output: named(OUTPUT_EXTENSION),
        }
    }
}

/// Lists the `.pdf` files directly inside `dir`, sorted by path.
///
/// The extension match is case-insensitive; subdirectories are not
/// searched.
///
/// # Errors
///
/// Returns [`PipelineError::File`] if the directory cannot be read.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let entries = std::fs::read_dir(dir).map_err(|source| PipelineError::file(dir, source))?;

    let mut pdfs = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| PipelineError::file(dir, source))?
            .path();

        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }

    pdfs.sort();
    Ok(pdfs)
}

/// Checks one directory, creating it first when the path is absolute.
fn validate_dir(path: &Path, role: &'static str) -> Result<(), PipelineError> {
    if path.is_absolute() && !path.exists() {
        log::info!("Creating {role} directory {}", path.display());
        std::fs::create_dir_all(path).map_err(|e| PipelineError::InvalidDirectory {
            role,
            path: path.to_path_buf(),
            reason: format!("could not be created: {e}"),
        })?;
    }

    if !path.is_dir() {
        return Err(PipelineError::InvalidDirectory {
            role,
            path: path.to_path_buf(),
            reason: "does not exist or is not a directory".to_owned(),
        });
    }

    Ok(())
}

/// Validates the input and output directories before any file is
/// processed.
///
/// Absolute paths that do not exist yet are created. Relative paths must
/// already exist.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidDirectory`] for the first directory
/// that is missing or cannot be created.
pub fn validate_dirs(pdfs_dir: &Path, output_dir: &Path) -> Result<(), PipelineError> {
    validate_dir(pdfs_dir, "PDF input")?;
    validate_dir(output_dir, "output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_intermediate_and_output_names() {
        let paths = OutputPaths::for_pdf(Path::new("/in/2024 Q1.report.pdf"), Path::new("/out"));
        assert_eq!(paths.intermediate, PathBuf::from("/out/2024 Q1.report.spt"));
        assert_eq!(paths.output, PathBuf::from("/out/2024 Q1.report.tsv"));
    }

    #[test]
    fn discovers_only_top_level_pdfs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();
        std::fs::write(dir.path().join("nested.pdf").join("d.pdf"), b"").unwrap();

        let found: Vec<String> = discover_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(found, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn creates_missing_absolute_directories() {
        let dir = tempfile::tempdir().unwrap();
        let pdfs = dir.path().join("pdfs");
        let out = dir.path().join("nested").join("out");

        validate_dirs(&pdfs, &out).unwrap();

        assert!(pdfs.is_dir());
        assert!(out.is_dir());
    }

    #[test]
    fn rejects_missing_relative_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_dirs(Path::new("surely/not/here"), dir.path()).unwrap_err();
        assert!(
            matches!(err, PipelineError::InvalidDirectory { role: "PDF input", .. }),
            "{err}"
        );
    }

    #[test]
    fn rejects_file_as_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.txt");
        std::fs::write(&file, b"").unwrap();

        let err = validate_dirs(dir.path(), &file).unwrap_err();
        assert!(
            matches!(err, PipelineError::InvalidDirectory { role: "output", .. }),
            "{err}"
        );
    }
}
