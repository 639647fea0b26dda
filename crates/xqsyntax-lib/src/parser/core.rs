//! Parser state machine and low-level operations.

use std::cell::Cell;

use text_size::{TextRange, TextSize};
use tracing::debug;
use xqsyntax_core::SourceText;

use super::cst::{SyntaxKind, TokenSet};
use super::event::{ErrorInfo, Event, Marker};
use super::sink::TreeSink;
use super::{Parse, Profile};
use crate::diagnostics::DiagnosticKind;
use crate::lexer::{Token, lex};
use crate::{Error, Result};

const DEFAULT_RECURSION_LIMIT: u32 = 128;
const DEBUG_FUEL: u32 = 4096;

/// Recursive-descent parser over a pre-lexed token vector.
///
/// Trivia tokens are never consumed explicitly: lookahead skips them and the
/// tree sink attaches them when the events are replayed.
pub struct Parser<'src> {
    pub(super) source: &'src SourceText,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) events: Vec<Event>,
    pub(super) profile: Profile,
    pub(super) depth: u32,
    pub(super) last_error_pos: Option<TextSize>,
    pub(super) nesting_exhausted: bool,
    pub(super) debug_fuel: Cell<u32>,
    recursion_limit: u32,
    exec_fuel_initial: Option<u32>,
    exec_fuel_remaining: Option<u32>,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src SourceText, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            events: Vec::new(),
            profile: Profile::default(),
            depth: 0,
            last_error_pos: None,
            nesting_exhausted: false,
            debug_fuel: Cell::new(DEBUG_FUEL),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            exec_fuel_initial: None,
            exec_fuel_remaining: None,
            fatal_error: None,
        }
    }

    /// Lexes `source` and returns a parser over its tokens.
    pub fn for_source(source: &'src SourceText) -> Self {
        Self::new(source, lex(source))
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel_initial = limit;
        self.exec_fuel_remaining = limit;
        self
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<Parse> {
        debug!(tokens = self.tokens.len(), profile = ?self.profile, "parse start");
        self.parse_module();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        let exec_fuel_consumed = match (self.exec_fuel_initial, self.exec_fuel_remaining) {
            (Some(initial), Some(remaining)) => initial.saturating_sub(remaining),
            _ => 0,
        };
        let (root, diagnostics) = TreeSink::new(self.source, &self.tokens).build(self.events);
        debug!(diagnostics = diagnostics.len(), "parse done");
        Ok(Parse {
            source: self.source.clone(),
            root,
            diagnostics,
            exec_fuel_consumed,
        })
    }

    pub(super) fn fatal(&mut self, err: Error) {
        if self.fatal_error.is_none() {
            self.fatal_error = Some(err);
        }
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(super) fn start(&mut self) -> Marker {
        Marker::new(self)
    }

    fn skip_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.pos += 1;
        }
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(DEBUG_FUEL);
    }

    fn consume_exec_fuel(&mut self) {
        if let Some(ref mut remaining) = self.exec_fuel_remaining {
            if *remaining == 0 {
                self.fatal(Error::ExecFuelExhausted);
                return;
            }
            *remaining -= 1;
        }
    }

    pub(super) fn eof(&mut self) -> bool {
        self.skip_trivia();
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&mut self) -> bool {
        self.eof() || self.has_fatal_error()
    }

    /// Current non-trivia token kind, `Eof` past the end.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.nth(0)
    }

    /// LL(k) lookahead past trivia.
    pub(super) fn nth(&mut self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map_or(SyntaxKind::Eof, |i| self.tokens[i].kind)
    }

    /// Token index of the `n`-th non-trivia token from the cursor.
    pub(super) fn nth_index(&mut self, n: usize) -> Option<usize> {
        self.skip_trivia();
        self.ensure_progress();
        let mut count = 0;
        let mut pos = self.pos;
        while pos < self.tokens.len() {
            if !self.tokens[pos].kind.is_trivia() {
                if count == n {
                    return Some(pos);
                }
                count += 1;
            }
            pos += 1;
        }
        None
    }

    /// Raw token kind `n` tokens after the current one, trivia included.
    /// Used where tokens must be adjacent, as inside a QName.
    pub(super) fn raw_nth(&mut self, n: usize) -> SyntaxKind {
        self.skip_trivia();
        self.tokens
            .get(self.pos + n)
            .map_or(SyntaxKind::Eof, |t| t.kind)
    }

    /// Whether the raw token right after the last consumed one is `kind`,
    /// with no trivia in between.
    pub(super) fn at_adjacent(&self, kind: SyntaxKind) -> bool {
        self.tokens.get(self.pos).is_some_and(|t| t.kind == kind)
    }

    /// Concatenated text of the non-trivia tokens in `tokens[start..end]`.
    pub(super) fn text_of_tokens(&self, start: usize, end: usize) -> String {
        self.tokens[start.min(end)..end.min(self.tokens.len())]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| self.source.text(t.span))
            .collect()
    }

    /// Span of the non-trivia tokens in `start..end`.
    pub(super) fn range_of_tokens(&self, start: usize, end: usize) -> Option<TextRange> {
        let mut significant = self.tokens[start.min(end)..end.min(self.tokens.len())]
            .iter()
            .filter(|t| !t.kind.is_trivia());
        let first = significant.next()?.span;
        let last = significant.last().map_or(first, |t| t.span);
        Some(first.cover(last))
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_set(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    pub(super) fn current_range(&mut self) -> TextRange {
        match self.nth_index(0) {
            Some(i) => self.tokens[i].span,
            None => TextRange::empty(self.source.len()),
        }
    }

    pub(super) fn token_text_is(&self, index: usize, text: &str) -> bool {
        self.tokens
            .get(index)
            .is_some_and(|t| self.source.text_eq(t.span, text))
    }

    /// Text of the `n`-th non-trivia token.
    pub(super) fn nth_text(&mut self, n: usize) -> String {
        self.nth_index(n)
            .map(|i| self.source.text(self.tokens[i].span))
            .unwrap_or_default()
    }

    /// Whether the `n`-th non-trivia token is the name `keyword` and not the
    /// prefix of a QName.
    pub(super) fn nth_at_keyword(&mut self, n: usize, keyword: &str) -> bool {
        let Some(i) = self.nth_index(n) else {
            return false;
        };
        self.tokens[i].kind == SyntaxKind::NCName
            && self.token_text_is(i, keyword)
            && self.tokens.get(i + 1).map(|t| t.kind) != Some(SyntaxKind::QNameSeparator)
    }

    pub(super) fn at_keyword(&mut self, keyword: &str) -> bool {
        self.nth_at_keyword(0, keyword)
    }

    pub(super) fn at_any_keyword(&mut self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.at_keyword(k))
    }

    pub(super) fn bump(&mut self) {
        let kind = self.current();
        self.bump_as(kind);
    }

    /// Consumes the current token, relabelling it in the tree.
    pub(super) fn bump_as(&mut self, kind: SyntaxKind) {
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        self.consume_exec_fuel();
        self.events.push(Event::Token { kind });
        self.pos += 1;
    }

    pub(super) fn bump_keyword(&mut self) {
        self.bump_as(SyntaxKind::Keyword);
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.bump_keyword();
            true
        } else {
            false
        }
    }

    /// On mismatch: emit diagnostic but don't consume.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_expected(what);
        false
    }

    pub(super) fn expect_keyword(&mut self, keyword: &str) -> bool {
        if self.eat_keyword(keyword) {
            return true;
        }
        self.error_expected(&format!("`{keyword}`"));
        false
    }

    fn should_report(&mut self) -> bool {
        if self.nesting_exhausted {
            return false;
        }
        let pos = self.current_range().start();
        if self.last_error_pos == Some(pos) {
            return false;
        }
        self.last_error_pos = Some(pos);
        true
    }

    /// Zero-width error node at the current position.
    pub(super) fn error(&mut self, kind: DiagnosticKind, detail: Option<String>) {
        if !self.should_report() {
            return;
        }
        self.events.push(Event::Start {
            kind: Some(SyntaxKind::Error),
            error: Some(Box::new(ErrorInfo::new(kind, detail))),
        });
        self.events.push(Event::Finish);
    }

    pub(super) fn error_expected(&mut self, what: &str) {
        self.error(DiagnosticKind::Expected, Some(what.to_string()));
    }

    /// Wraps the current token in an error node.
    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind, detail: Option<String>) {
        if self.eof() {
            self.error(kind, detail);
            return;
        }
        self.last_error_pos = Some(self.current_range().start());
        let m = self.start();
        self.bump();
        m.complete_error(self, kind, detail);
    }

    /// Consumes one token nothing else wants. Lexical error tokens are
    /// diagnosed by the tree sink, everything else gets an `UnexpectedToken`.
    pub(super) fn recover_token(&mut self) {
        if self.current().is_error() {
            self.bump();
            return;
        }
        let text = self.nth_text(0);
        self.error_and_bump(DiagnosticKind::UnexpectedToken, Some(format!("`{text}`")));
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.depth >= self.recursion_limit {
            self.wrap_rest_as_too_deep();
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    /// Swallows the remaining input into one error node and silences
    /// everything the unwinding productions would report.
    fn wrap_rest_as_too_deep(&mut self) {
        if self.eof() {
            self.nesting_exhausted = true;
            return;
        }
        debug!(depth = self.depth, pos = self.pos, "recursion limit reached");
        let m = self.start();
        while !self.eof() {
            self.bump();
        }
        m.complete_error(self, DiagnosticKind::NestingTooDeep, None);
        self.nesting_exhausted = true;
    }
}
