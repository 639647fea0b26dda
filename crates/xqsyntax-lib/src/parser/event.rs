//! Parser output events and the marker protocol over them.
//!
//! The grammar never builds tree nodes directly. It appends events; a
//! [`Marker`] remembers where its `Start` event sits so the node kind can be
//! filled in once the production is known to match. Rolling back truncates
//! the event list, which makes speculative parsing free of side effects.

use text_size::{TextRange, TextSize};

use super::core::Parser;
use super::cst::SyntaxKind;
use crate::Error;
use crate::diagnostics::{DiagnosticKind, RelatedInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorInfo {
    pub kind: DiagnosticKind,
    pub detail: Option<String>,
    /// Secondary location reported with the diagnostic.
    pub related: Option<RelatedInfo>,
}

impl ErrorInfo {
    pub(crate) fn new(kind: DiagnosticKind, detail: Option<String>) -> Self {
        Self {
            kind,
            detail,
            related: None,
        }
    }

    pub(crate) fn related_to(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related = Some(RelatedInfo::new(range, message));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    /// `kind: None` is a tombstone left by a dropped marker.
    Start {
        kind: Option<SyntaxKind>,
        error: Option<Box<ErrorInfo>>,
    },
    /// Consumes the next non-trivia token, relabelled as `kind`.
    Token { kind: SyntaxKind },
    Finish,
}

impl Event {
    pub(crate) fn tombstone() -> Self {
        Event::Start {
            kind: None,
            error: None,
        }
    }
}

/// Checkpoint with exactly one terminal action: complete, drop or rollback.
#[must_use = "markers must be completed, dropped or rolled back"]
pub(crate) struct Marker {
    event: usize,
    pos: usize,
    last_error_pos: Option<TextSize>,
    nesting_exhausted: bool,
}

impl Marker {
    pub(super) fn new(p: &mut Parser<'_>) -> Self {
        let event = p.events.len();
        p.events.push(Event::tombstone());
        Self {
            event,
            pos: p.pos,
            last_error_pos: p.last_error_pos,
            nesting_exhausted: p.nesting_exhausted,
        }
    }

    /// Wraps everything created since the marker into a node of `kind`.
    pub(crate) fn complete(self, p: &mut Parser<'_>, kind: SyntaxKind) {
        if !kind.is_node() {
            p.fatal(Error::InvalidNodeKind(kind));
            return;
        }
        self.finish(p, kind, None);
    }

    /// Wraps everything created since the marker into an `Error` node.
    pub(crate) fn complete_error(
        self,
        p: &mut Parser<'_>,
        kind: DiagnosticKind,
        detail: Option<String>,
    ) {
        self.complete_with_error(p, ErrorInfo::new(kind, detail));
    }

    pub(crate) fn complete_with_error(self, p: &mut Parser<'_>, error: ErrorInfo) {
        self.finish(p, SyntaxKind::Error, Some(Box::new(error)));
    }

    fn finish(self, p: &mut Parser<'_>, kind: SyntaxKind, error: Option<Box<ErrorInfo>>) {
        p.events[self.event] = Event::Start {
            kind: Some(kind),
            error,
        };
        p.events.push(Event::Finish);
    }

    /// Discards the marker; children stay at the current nesting level.
    pub(crate) fn drop(self, p: &mut Parser<'_>) {
        if self.event + 1 == p.events.len() {
            p.events.pop();
        }
    }

    /// Restores the token cursor and discards every event since the marker.
    pub(crate) fn rollback(self, p: &mut Parser<'_>) {
        p.events.truncate(self.event);
        p.pos = self.pos;
        p.last_error_pos = self.last_error_pos;
        p.nesting_exhausted = self.nesting_exhausted;
    }

    /// Whether anything has been recorded since the marker.
    pub(crate) fn is_empty(&self, p: &Parser<'_>) -> bool {
        p.events.len() == self.event + 1
    }
}
