//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use text_size::TextRange;

use crate::SourceText;

impl SourceText {
    #[inline]
    pub(crate) fn ensure_in_bounds(&self, range: TextRange) {
        assert!(
            usize::from(range.end()) <= self.units().len(),
            "SourceText: range {range:?} out of bounds (len {})",
            self.units().len()
        );
    }
}

#[inline]
pub(crate) fn ensure_scan_bounds(start: usize, end: usize, len: usize) {
    assert!(
        start <= end && end <= len,
        "CodepointRange: invalid scan bounds {start}..{end} (buffer len {len})"
    );
}
