//! Codepoint cursor over a UTF-16 buffer.
//!
//! The cursor tracks two offsets: the start of the token being scanned and
//! the current position. `advance` moves the current position by one
//! codepoint (one or two units); `flush` makes the current position the
//! start of the next token.

use crate::invariants::ensure_scan_bounds;
use crate::source::{is_high_surrogate, is_low_surrogate};

/// Returned by [`CodepointRange::codepoint`] at the configured end offset.
pub const END_OF_BUFFER: u32 = 0xFFFF_FFFF;

/// Returned by [`CodepointRange::codepoint`] for an unpaired surrogate unit.
pub const INVALID: u32 = 0xFFFF_FFFE;

#[derive(Debug, Clone)]
pub struct CodepointRange<'src> {
    buffer: &'src [u16],
    start: usize,
    end: usize,
    buffer_end: usize,
    saved: usize,
}

impl<'src> CodepointRange<'src> {
    pub fn new() -> Self {
        Self {
            buffer: &[],
            start: 0,
            end: 0,
            buffer_end: 0,
            saved: 0,
        }
    }

    /// Reset the cursor to scan `buffer[start..end]`.
    pub fn start(&mut self, buffer: &'src [u16], start: usize, end: usize) {
        ensure_scan_bounds(start, end, buffer.len());
        self.buffer = buffer;
        self.start = start;
        self.end = start;
        self.buffer_end = end;
        self.saved = start;
    }

    pub fn buffer(&self) -> &'src [u16] {
        self.buffer
    }

    /// Start offset of the token being scanned.
    pub fn start_offset(&self) -> usize {
        self.start
    }

    /// Current position; the end of the token being scanned.
    pub fn end_offset(&self) -> usize {
        self.end
    }

    pub fn buffer_end(&self) -> usize {
        self.buffer_end
    }

    pub fn is_at_end(&self) -> bool {
        self.end >= self.buffer_end
    }

    /// Codepoint at the current position, without advancing.
    pub fn codepoint(&self) -> u32 {
        self.codepoint_at(self.end)
    }

    fn codepoint_at(&self, pos: usize) -> u32 {
        if pos >= self.buffer_end {
            return END_OF_BUFFER;
        }
        let unit = self.buffer[pos];
        if is_high_surrogate(unit) {
            match self.low_surrogate_after(pos) {
                Some(low) => {
                    0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
                }
                None => INVALID,
            }
        } else if is_low_surrogate(unit) {
            INVALID
        } else {
            u32::from(unit)
        }
    }

    fn low_surrogate_after(&self, pos: usize) -> Option<u16> {
        let next = pos + 1;
        if next < self.buffer_end && is_low_surrogate(self.buffer[next]) {
            Some(self.buffer[next])
        } else {
            None
        }
    }

    fn width_at(&self, pos: usize) -> usize {
        if is_high_surrogate(self.buffer[pos]) && self.low_surrogate_after(pos).is_some() {
            2
        } else {
            1
        }
    }

    /// Move past the current codepoint. A no-op at the end.
    pub fn advance(&mut self) {
        if self.end < self.buffer_end {
            self.end += self.width_at(self.end);
        }
    }

    /// Mark the current position as the start of the next token.
    pub fn flush(&mut self) {
        self.start = self.end;
    }

    pub fn save(&mut self) {
        self.saved = self.end;
    }

    pub fn restore(&mut self) {
        self.end = self.saved;
    }

    /// Whether the units at the current position spell `text`.
    ///
    /// Only meaningful for ASCII `text`: ASCII units never occur inside a
    /// surrogate pair, so no codepoint merging is needed.
    pub fn at_ascii(&self, text: &str) -> bool {
        self.ascii_at(self.end, text)
    }

    pub fn ascii_at(&self, pos: usize, text: &str) -> bool {
        let bytes = text.as_bytes();
        pos + bytes.len() <= self.buffer_end
            && self.buffer[pos..pos + bytes.len()]
                .iter()
                .zip(bytes)
                .all(|(&unit, &byte)| unit == u16::from(byte))
    }

    /// Consume `text` if the current position spells it.
    pub fn eat_ascii(&mut self, text: &str) -> bool {
        if self.at_ascii(text) {
            self.end += text.len();
            true
        } else {
            false
        }
    }

    /// The `n`th codepoint after the current one, without moving.
    pub fn peek(&self, n: usize) -> u32 {
        let mut pos = self.end;
        for _ in 0..n {
            if pos >= self.buffer_end {
                return END_OF_BUFFER;
            }
            pos += self.width_at(pos);
        }
        self.codepoint_at(pos)
    }
}

impl Default for CodepointRange<'_> {
    fn default() -> Self {
        Self::new()
    }
}
