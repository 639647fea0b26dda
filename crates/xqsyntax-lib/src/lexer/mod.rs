//! Lexers for XQuery source.
//!
//! Tokens carry kind and span only; text is sliced from the source when needed.
//!
//! ## Resumable scanning
//!
//! Every lexer implements [`Lexer`]: it can be started on any sub-range of a
//! buffer in any state it previously reported, and will then produce the same
//! tokens a full left-to-right scan produced from that point. The state is a
//! plain `u32` so editors can store it per line.
//!
//! ## Layers
//!
//! - [`XQueryLexer`]: the primary multi-state lexer with an explicit state stack
//! - [`XQDocLexer`]: lexer for the body of `(:~ ... :)` documentation comments
//! - [`LexerComposition`]: runs a secondary lexer over selected primary tokens
//!
//! ## Error handling
//!
//! The lexers never fail. Unknown characters become `BadCharacter` tokens,
//! consecutive ones coalesced; unterminated constructs end in a zero-width
//! `Incomplete*` token at end of input.

mod composition;
mod references;
mod xqdoc;
mod xquery;


use text_size::{TextRange, TextSize};
use xqsyntax_core::SourceText;

use crate::parser::cst::SyntaxKind;

pub use composition::{Composition, LexerComposition, XQDOC_STATE_ID};
pub use xqdoc::XQDocLexer;
pub use xquery::XQueryLexer;

/// Externally storable lexer state.
pub type LexerState = u32;

/// Zero-copy token: kind + span, text retrieved from the [`SourceText`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// Incremental lexer interface.
///
/// After [`Lexer::start`] the lexer is positioned on its first token;
/// [`Lexer::advance`] moves to the next one. `token_kind` returns `None` once
/// the range is exhausted.
pub trait Lexer<'src> {
    /// Start scanning `buffer[start..end]` in `state`.
    fn start(&mut self, buffer: &'src [u16], start: usize, end: usize, state: LexerState);

    fn advance(&mut self);

    fn token_kind(&self) -> Option<SyntaxKind>;

    fn token_start(&self) -> usize;

    fn token_end(&self) -> usize;

    /// State at the start of the current token.
    fn state(&self) -> LexerState;

    fn token(&self) -> Option<Token> {
        let kind = self.token_kind()?;
        let span = TextRange::new(
            TextSize::from(self.token_start() as u32),
            TextSize::from(self.token_end() as u32),
        );
        Some(Token::new(kind, span))
    }
}

/// Lazy token stream paired with the resume state of each token.
pub struct Tokens<'src> {
    lexer: LexerComposition<'src>,
}

impl Iterator for Tokens<'_> {
    type Item = (Token, LexerState);

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lexer.token()?;
        let state = self.lexer.state();
        self.lexer.advance();
        Some((token, state))
    }
}

/// Tokenizes `source` from `offset` onwards, starting in `state`.
///
/// `state` must be `0` at offset 0, or a state previously reported for a
/// token starting at `offset`.
pub fn tokenize_from(source: &SourceText, offset: TextSize, state: LexerState) -> Tokens<'_> {
    let buffer = source.units();
    let mut lexer = LexerComposition::xquery();
    lexer.start(buffer, usize::from(offset), buffer.len(), state);
    Tokens { lexer }
}

/// Tokenizes the whole of `source`.
pub fn tokenize(source: &SourceText) -> Tokens<'_> {
    tokenize_from(source, TextSize::from(0), 0)
}

/// Tokenizes source into a vector of span-based tokens.
pub fn lex(source: &SourceText) -> Vec<Token> {
    tokenize(source).map(|(token, _)| token).collect()
}

/// Retrieves the text slice for a token.
#[inline]
pub fn token_text(source: &SourceText, token: &Token) -> String {
    source.text(token.span)
}
