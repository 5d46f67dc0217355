#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Field types produced by the pdf-tabify segmenter.
//!
//! A [`Field`] is one column value cut out of a single line of
//! space-aligned text. A [`FieldSequence`] holds the fields of one line in
//! the order they appear, left to right.

use serde::{Deserialize, Serialize};

/// A single column value detected within a line.
///
/// Offsets are character offsets into the source line (not byte offsets)
/// and `end` is inclusive. The text always starts and ends on a non-space
/// character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Character offset of the first character of the field.
    pub start: usize,
    /// Character offset of the last character of the field (inclusive).
    pub end: usize,
    /// The field text, i.e. `line[start..=end]`.
    pub text: String,
}

impl Field {
    /// Number of characters spanned by the field.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Ordered fields extracted from one line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSequence {
    fields: Vec<Field>,
}

impl FieldSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field. Callers push fields in left-to-right order.
    pub fn push(&mut self, field: Field) {
        debug_assert!(
            self.fields.last().is_none_or(|prev| prev.end < field.start),
            "fields must be pushed in left-to-right order"
        );
        self.fields.push(field);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Iterates over the field texts in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.text.as_str())
    }

    /// Consumes the sequence, returning only the field texts.
    #[must_use]
    pub fn into_texts(self) -> Vec<String> {
        self.fields.into_iter().map(|f| f.text).collect()
    }

    /// Joins the field texts with `separator`.
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.texts().collect::<Vec<_>>().join(separator)
    }
}

impl IntoIterator for FieldSequence {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldSequence {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl From<Vec<Field>> for FieldSequence {
    fn from(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(start: usize, end: usize, text: &str) -> Field {
        Field {
            start,
            end,
            text: text.to_owned(),
        }
    }

    #[test]
    fn joins_texts_with_separator() {
        let seq = FieldSequence::from(vec![field(0, 3, "Name"), field(6, 8, "Age")]);
        assert_eq!(seq.join("\t"), "Name\tAge");
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn empty_sequence_joins_to_empty_string() {
        let seq = FieldSequence::new();
        assert!(seq.is_empty());
        assert_eq!(seq.join("\t"), "");
    }

    #[test]
    fn width_counts_inclusive_span() {
        assert_eq!(field(4, 11, "New York").width(), 8);
        assert_eq!(field(0, 0, "a").width(), 1);
    }

    #[test]
    fn serializes_as_plain_array() {
        let seq = FieldSequence::from(vec![field(0, 0, "a")]);
        let json = serde_json::to_value(&seq).unwrap();
        assert_eq!(json, serde_json::json!([{"start": 0, "end": 0, "text": "a"}]));
    }
}
