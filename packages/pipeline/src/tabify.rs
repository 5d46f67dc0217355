//! Space-delimited to tab-delimited conversion of whole files.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use pdf_tabify_segment::segment;
use serde::Serialize;

use crate::PipelineError;
use crate::lines::{LineSink, LineSource};

/// Counts collected while tabifying one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TabifyStats {
    /// Lines read (and written).
    pub lines: u64,
    /// Fields written across all lines.
    pub fields: u64,
}

/// Which side of a conversion an I/O error came from.
enum StreamError {
    Read(io::Error),
    Write(io::Error),
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Read(e) | StreamError::Write(e) => e,
        }
    }
}

fn copy_segmented<R: BufRead, W: Write>(
    reader: R,
    writer: W,
) -> Result<TabifyStats, StreamError> {
    let mut sink = LineSink::new(writer);
    let mut stats = TabifyStats::default();

    for line in LineSource::new(reader) {
        let fields = segment(&line.map_err(StreamError::Read)?);
        stats.lines += 1;
        stats.fields += fields.len() as u64;
        sink.write_record(&fields).map_err(StreamError::Write)?;
    }

    sink.finish().map_err(StreamError::Write)?;
    Ok(stats)
}

/// Segments every line of `reader` and writes one tab-joined record per
/// line to `writer`, preserving line order.
///
/// Blank lines produce empty records. The writer is flushed on success.
///
/// # Errors
///
/// Returns any I/O error from reading or writing.
pub fn tabify_reader<R: BufRead, W: Write>(
    reader: R,
    writer: W,
) -> io::Result<TabifyStats> {
    Ok(copy_segmented(reader, writer)?)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Converts the space-delimited file `input` into the tab-delimited file
/// `output`.
///
/// The records are staged in a temporary file next to `output` and renamed
/// into place only once every line has been written, so a failed
/// conversion never leaves a partial `output` behind.
///
/// # Errors
///
/// Returns [`PipelineError::SameFile`] if `output` is `input`, or
/// [`PipelineError::File`] naming the file that could not be read or
/// written.
pub fn tabify_file(input: &Path, output: &Path) -> Result<TabifyStats, PipelineError> {
    if is_same_file(input, output) {
        return Err(PipelineError::SameFile(input.to_path_buf()));
    }

    let reader = File::open(input)
        .map(BufReader::new)
        .map_err(|source| PipelineError::file(input, source))?;

    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staged = tempfile::Builder::new()
        .prefix(".tabify-")
        .suffix(".partial")
        .tempfile_in(dir)
        .map_err(|source| PipelineError::file(output, source))?;

    let stats = copy_segmented(reader, BufWriter::new(staged.as_file())).map_err(|e| match e {
        StreamError::Read(source) => PipelineError::file(input, source),
        StreamError::Write(source) => PipelineError::file(output, source),
    })?;

    // Temp files are created owner-only; outputs get ordinary file modes.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(|source| PipelineError::file(output, source))?;
    }

    staged
        .persist(output)
        .map_err(|e| PipelineError::file(output, e.error))?;

    log::debug!(
        "Tabified {} -> {} ({} lines, {} fields)",
        input.display(),
        output.display(),
        stats.lines,
        stats.fields
    );

    Ok(stats)
}
