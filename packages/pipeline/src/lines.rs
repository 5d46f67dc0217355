//! Line source and line sink.
//!
//! [`LineSource`] reads lines lazily and in order, accepting `\n`, `\r\n`
//! and bare `\r` terminators (`pdftotext -eol unix|dos|mac`). Bytes that
//! are not valid UTF-8 are replaced rather than failing the file.
//!
//! [`LineSink`] writes one tab-joined record per input line.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use pdf_tabify_segment::FIELD_SEPARATOR;

/// Lazy, forward-only iterator over the lines of a reader.
pub struct LineSource<R> {
    reader: R,
    pending: VecDeque<String>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineSource<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            buf: Vec::new(),
            done: false,
        }
    }

    /// Reads up to the next `\n` and queues every line it contains.
    ///
    /// `read_until` stops right after `\n`, so a `\r\n` pair is never
    /// split across two reads.
    fn fill(&mut self) -> io::Result<()> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            self.done = true;
            return Ok(());
        }

        let buf = &self.buf;
        let mut start = 0;
        let mut i = 0;
        while i < buf.len() {
            match buf[i] {
                b'\n' => {
                    self.pending
                        .push_back(String::from_utf8_lossy(&buf[start..i]).into_owned());
                    start = i + 1;
                }
                b'\r' => {
                    self.pending
                        .push_back(String::from_utf8_lossy(&buf[start..i]).into_owned());
                    if buf.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }

        // Final line without a terminator.
        if start < buf.len() {
            self.pending
                .push_back(String::from_utf8_lossy(&buf[start..]).into_owned());
        }

        Ok(())
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.fill() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

/// Writes tab-joined records, one per line.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `fields` joined by a tab, followed by `\n`.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_record<S: AsRef<str>>(&mut self, fields: &[S]) -> io::Result<()> {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(FIELD_SEPARATOR.as_bytes())?;
            }
            self.writer.write_all(field.as_ref().as_bytes())?;
        }
        self.writer.write_all(b"\n")
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns any error from flushing.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
