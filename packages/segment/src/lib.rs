#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Column segmentation for space-aligned text extracted from PDF tables.
//!
//! PDF-to-text tools lay tables out as columns padded with spaces, and no
//! column-boundary metadata survives. This crate recovers the columns of
//! one line at a time using run-length cues alone:
//!
//! - a single space is part of a field (`"New York"` stays one field)
//! - two or more consecutive spaces separate fields
//! - leading and trailing spaces never produce empty fields
//!
//! Every function here is pure and holds no state between calls, so lines
//! (or whole files) may be segmented concurrently.

pub mod scan;

pub use pdf_tabify_segment_models::{Field, FieldSequence};

/// Separator used when joining fields into an output record.
pub const FIELD_SEPARATOR: &str = "\t";

/// Splits `line` into its field texts, in left-to-right order.
///
/// ```
/// use pdf_tabify_segment::segment;
///
/// assert_eq!(segment("Name  Age  City"), vec!["Name", "Age", "City"]);
/// assert_eq!(segment("  New York   NY "), vec!["New York", "NY"]);
/// assert!(segment("   ").is_empty());
/// ```
#[must_use]
pub fn segment(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    scan::scan(line, |f| fields.push(f.text.to_owned()));
    fields
}

/// Splits `line` into fields with their character offsets.
#[must_use]
pub fn segment_spans(line: &str) -> FieldSequence {
    let mut fields = FieldSequence::new();
    scan::scan(line, |f| {
        fields.push(Field {
            start: f.start,
            end: f.end,
            text: f.text.to_owned(),
        });
    });
    fields
}

/// Segments `line` and joins the fields with [`FIELD_SEPARATOR`].
///
/// A line with no fields yields an empty string.
#[must_use]
pub fn tabify_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    scan::scan(line, |f| {
        if !out.is_empty() {
            out.push_str(FIELD_SEPARATOR);
        }
        out.push_str(f.text);
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_space_stays_within_field() {
        assert_eq!(segment("a b"), vec!["a b"]);
    }

    #[test]
    fn double_space_splits() {
        assert_eq!(segment("a  b"), vec!["a", "b"]);
    }

    #[test]
    fn longer_runs_split_once() {
        assert_eq!(segment("a   b"), vec!["a", "b"]);
        assert_eq!(segment("a          b"), vec!["a", "b"]);
    }

    #[test]
    fn leading_and_trailing_spaces_are_dropped() {
        assert_eq!(segment("  a b  "), vec!["a b"]);
        assert_eq!(segment("a b "), vec!["a b"]);
    }

    #[test]
    fn empty_and_blank_lines_have_no_fields() {
        assert!(segment("").is_empty());
        assert!(segment(" ").is_empty());
        assert!(segment("   ").is_empty());
    }

    #[test]
    fn splits_header_row() {
        assert_eq!(segment("Name  Age  City"), vec!["Name", "Age", "City"]);
    }

    #[test]
    fn keeps_field_starting_at_first_character() {
        assert_eq!(segment("a"), vec!["a"]);
        assert_eq!(segment("a  b"), vec!["a", "b"]);
        assert_eq!(segment("x   "), vec!["x"]);
    }

    #[test]
    fn tabs_are_field_content() {
        assert_eq!(segment("a\tb  c"), vec!["a\tb", "c"]);
    }

    #[test]
    fn realistic_table_row() {
        let line = "01/15/2024   THEFT FROM AUTO    100 N Main St     Closed";
        assert_eq!(
            segment(line),
            vec!["01/15/2024", "THEFT FROM AUTO", "100 N Main St", "Closed"]
        );
    }

    #[test]
    fn tabify_joins_with_tabs() {
        assert_eq!(tabify_line("Name  Age  City"), "Name\tAge\tCity");
        assert_eq!(tabify_line("   "), "");
        assert_eq!(tabify_line("New York"), "New York");
    }

    #[test]
    fn spans_slice_back_to_text() {
        let line = "  Los Angeles    CA  90012";
        let spans = segment_spans(line);
        let chars: Vec<char> = line.chars().collect();
        for field in &spans {
            let slice: String = chars[field.start..=field.end].iter().collect();
            assert_eq!(slice, field.text);
        }
        assert_eq!(spans.join("|"), "Los Angeles|CA|90012");
    }

    #[test]
    fn single_spaced_lines_reconstruct_when_joined() {
        for line in [
            "a",
            "a b",
            " a b c ",
            "The quick brown fox",
            "  leading",
            "trailing ",
        ] {
            assert_eq!(segment(line).join(" "), line.trim(), "line: {line:?}");
        }
    }

    /// Every line over the alphabet `{'a', ' '}` up to length 10.
    fn all_short_lines() -> impl Iterator<Item = String> {
        (0..=10u32).flat_map(|len| {
            (0..(1u32 << len)).map(move |bits| {
                (0..len)
                    .map(|i| if bits & (1 << i) == 0 { ' ' } else { 'a' })
                    .collect()
            })
        })
    }

    #[test]
    fn exhaustive_short_lines_hold_field_invariants() {
        for line in all_short_lines() {
            let spans = segment_spans(&line);
            let chars: Vec<char> = line.chars().collect();

            let mut prev_end: Option<usize> = None;
            for field in &spans {
                assert!(!field.text.is_empty(), "empty field in {line:?}");
                assert!(!field.text.starts_with(' ') && !field.text.ends_with(' '));
                assert!(!field.text.contains("  "), "unsplit run in {line:?}");

                let slice: String = chars[field.start..=field.end].iter().collect();
                assert_eq!(slice, field.text);

                if let Some(prev) = prev_end {
                    assert!(field.start > prev + 2, "fields too close in {line:?}");
                    assert!(chars[prev + 1..field.start].iter().all(|&c| c == ' '));
                } else {
                    assert!(chars[..field.start].iter().all(|&c| c == ' '));
                }
                prev_end = Some(field.end);
            }

            let tail_start = prev_end.map_or(0, |e| e + 1);
            assert!(chars[tail_start..].iter().all(|&c| c == ' '));

            assert_eq!(spans.clone().into_texts(), segment(&line));
        }
    }
}
