//! Immutable UTF-16 source buffer.

use std::fmt;
use std::sync::Arc;

use text_size::{TextRange, TextSize};

/// Source text as UTF-16 code units.
///
/// Offsets everywhere in xqsyntax (tokens, nodes, diagnostics) count UTF-16
/// units into this buffer. The buffer may hold unpaired surrogates; nothing
/// here assumes it is well-formed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourceText {
    units: Arc<[u16]>,
}

impl SourceText {
    pub fn from_utf16(units: impl Into<Arc<[u16]>>) -> Self {
        Self {
            units: units.into(),
        }
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    pub fn len(&self) -> TextSize {
        TextSize::from(self.units.len() as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::up_to(self.len())
    }

    /// Code units covered by `range`.
    ///
    /// Panics if `range` extends past the end of the buffer.
    pub fn slice(&self, range: TextRange) -> &[u16] {
        self.ensure_in_bounds(range);
        &self.units[usize::from(range.start())..usize::from(range.end())]
    }

    /// Text covered by `range`, with unpaired surrogates replaced by U+FFFD.
    pub fn text(&self, range: TextRange) -> String {
        String::from_utf16_lossy(self.slice(range))
    }

    /// Whether the units in `range` spell `expected` exactly.
    pub fn text_eq(&self, range: TextRange, expected: &str) -> bool {
        self.slice(range).iter().copied().eq(expected.encode_utf16())
    }

    /// Lossy UTF-8 rendering of the whole buffer.
    pub fn to_lossy_string(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }

    /// Byte offset in [`Self::to_lossy_string`] that corresponds to a UTF-16 offset.
    ///
    /// An offset that falls between the halves of a surrogate pair maps to
    /// the start of the merged character.
    pub fn to_utf8_offset(&self, offset: TextSize) -> usize {
        let end = usize::from(offset).min(self.units.len());
        let mut bytes: usize = char::decode_utf16(self.units[..end].iter().copied())
            .map(|decoded| decoded.map_or(char::REPLACEMENT_CHARACTER.len_utf8(), char::len_utf8))
            .sum();
        // A high surrogate cut off by `end` decodes as a replacement character,
        // but in the full buffer it belongs to the pair that follows.
        if end > 0 && end < self.units.len() && self.splits_pair(end) {
            bytes -= char::REPLACEMENT_CHARACTER.len_utf8();
        }
        bytes
    }

    fn splits_pair(&self, offset: usize) -> bool {
        is_high_surrogate(self.units[offset - 1]) && is_low_surrogate(self.units[offset])
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::from_utf16(text.encode_utf16().collect::<Vec<_>>())
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<Vec<u16>> for SourceText {
    fn from(units: Vec<u16>) -> Self {
        Self::from_utf16(units)
    }
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SourceText")
            .field(&self.to_lossy_string())
            .finish()
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lossy_string())
    }
}
