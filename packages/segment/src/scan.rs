//! Single-pass whitespace-run scanner.
//!
//! Walks a line once, left to right, tracking where the current field
//! started, where its most recent non-space character was, and where the
//! most recent space was. A field closes when a second consecutive space
//! follows it or when the line ends.

/// The only character treated as a separator.
pub const SPACE: char = ' ';

/// A field borrowed from the scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'a> {
    /// Character offset of the first character.
    pub start: usize,
    /// Character offset of the last character (inclusive).
    pub end: usize,
    /// The field text.
    pub text: &'a str,
}

/// A position in the line, kept in both character and byte units so the
/// field text can be sliced without a second pass.
#[derive(Debug, Clone, Copy)]
struct Mark {
    chars: usize,
    bytes: usize,
}

/// Scan state for one line. Never shared between lines.
#[derive(Debug, Default)]
struct ScanState {
    last_space: Option<usize>,
    /// `None` means no field is open. `bytes` is the start byte offset.
    first_letter: Option<Mark>,
    /// `bytes` is the byte offset one past the end of the character.
    last_letter: Option<Mark>,
}

impl ScanState {
    fn on_space(&mut self, chars: usize) {
        self.last_space = Some(chars);
    }

    fn on_letter(&mut self, chars: usize, bytes: usize, ch: char) {
        self.last_letter = Some(Mark {
            chars,
            bytes: bytes + ch.len_utf8(),
        });
        if self.first_letter.is_none() {
            self.first_letter = Some(Mark { chars, bytes });
        }
    }

    /// True once the second space of a run following an open field has
    /// been seen.
    fn at_double_space(&self) -> bool {
        match (self.first_letter, self.last_letter, self.last_space) {
            (Some(_), Some(letter), Some(space)) => space == letter.chars + 2,
            _ => false,
        }
    }

    /// Closes the open field, if any, and resets all scan state.
    fn close<'a>(&mut self, line: &'a str) -> Option<RawField<'a>> {
        let first = self.first_letter.take();
        let last = self.last_letter.take();
        self.last_space = None;

        let (first, last) = first.zip(last)?;
        Some(RawField {
            start: first.chars,
            end: last.chars,
            text: &line[first.bytes..last.bytes],
        })
    }
}

/// Scans `line`, calling `emit` for each field in left-to-right order.
pub fn scan<'a>(line: &'a str, mut emit: impl FnMut(RawField<'a>)) {
    let mut state = ScanState::default();

    for (chars, (bytes, ch)) in line.char_indices().enumerate() {
        if ch == SPACE {
            state.on_space(chars);
        } else {
            state.on_letter(chars, bytes, ch);
        }

        if state.at_double_space()
            && let Some(field) = state.close(line)
        {
            emit(field);
        }
    }

    // End of line closes whatever field is still open.
    if let Some(field) = state.close(line) {
        emit(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &str) -> Vec<RawField<'_>> {
        let mut out = Vec::new();
        scan(line, |f| out.push(f));
        out
    }

    #[test]
    fn reports_character_offsets() {
        let fields = collect("ab  cd e");
        assert_eq!(
            fields,
            vec![
                RawField {
                    start: 0,
                    end: 1,
                    text: "ab",
                },
                RawField {
                    start: 4,
                    end: 7,
                    text: "cd e",
                },
            ]
        );
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let fields = collect("Zürich  Köln");
        assert_eq!(fields[0].text, "Zürich");
        assert_eq!((fields[0].start, fields[0].end), (0, 5));
        assert_eq!(fields[1].text, "Köln");
        assert_eq!((fields[1].start, fields[1].end), (8, 11));
    }

    #[test]
    fn stale_space_before_field_does_not_close_it() {
        // The leading space is recorded before the field opens and must not
        // be mistaken for a boundary.
        let fields = collect(" x y");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].text, "x y");
    }
}
