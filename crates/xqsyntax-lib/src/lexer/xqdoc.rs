//! Lexer for xqDoc comment bodies.
//!
//! Runs over the text between `(:` and `:)` of a comment that starts with
//! `(:~`. Recognises the `~` marker, `@tag` lines, `$name` after `@param`,
//! inline XML markup and references; everything else is contents. There is
//! no state stack: nested markup returns to plain contents once closed.

use xqsyntax_core::{CharClass, CodepointRange, char_class};

use super::references::{Reference, at_name_start, scan_reference, skip_name_chars};
use super::{Lexer, LexerState};
use crate::parser::cst::SyntaxKind::{self, *};

pub(crate) mod state {
    pub const DEFAULT: u32 = 0;
    pub const CONTENTS: u32 = 1;
    pub const TAGGED_CONTENTS: u32 = 2;
    pub const ELEM_CONSTRUCTOR: u32 = 3;
    pub const ELEM_CONTENTS: u32 = 4;
    pub const ELEM_CONSTRUCTOR_CLOSING: u32 = 5;
    pub const ATTRIBUTE_VALUE_QUOTE: u32 = 6;
    pub const ATTRIBUTE_VALUE_APOS: u32 = 7;
    pub const TRIM: u32 = 8;
    pub const TAG_NAME: u32 = 9;
    pub const PARAM_TAG_CONTENTS_START: u32 = 10;
    pub const PARAM_TAG_VAR_NAME: u32 = 11;
}

const TAGS: [&str; 8] = [
    "author",
    "deprecated",
    "error",
    "param",
    "return",
    "see",
    "since",
    "version",
];

pub struct XQDocLexer<'src> {
    range: CodepointRange<'src>,
    kind: Option<SyntaxKind>,
    token_state: LexerState,
    state: LexerState,
}

impl<'src> XQDocLexer<'src> {
    pub fn new() -> Self {
        Self {
            range: CodepointRange::new(),
            kind: None,
            token_state: state::DEFAULT,
            state: state::DEFAULT,
        }
    }

    fn at(&self, c: char) -> bool {
        self.range.codepoint() == c as u32
    }

    fn at_line_break(&self) -> bool {
        self.at('\n') || self.at('\r')
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.range.advance();
        kind
    }

    fn next_token(&mut self) -> Option<SyntaxKind> {
        if self.range.is_at_end() {
            return None;
        }
        let kind = match self.state {
            state::DEFAULT => {
                self.state = state::CONTENTS;
                if self.at('~') {
                    self.single(XQDocCommentMarker)
                } else {
                    self.lex_contents()
                }
            }
            state::TRIM => {
                if self.at('@') && char_class(self.range.peek(1)).is_name_start() {
                    self.state = state::TAG_NAME;
                    self.single(XQDocTagMarker)
                } else {
                    self.state = state::CONTENTS;
                    self.lex_contents()
                }
            }
            state::TAG_NAME => self.lex_tag_name(),
            state::PARAM_TAG_CONTENTS_START => {
                if self.at('$') {
                    self.state = state::PARAM_TAG_VAR_NAME;
                    self.single(XQDocVariableIndicator)
                } else if self.at(' ') || self.at('\t') {
                    self.skip_blanks();
                    XQDocContents
                } else {
                    self.state = state::TAGGED_CONTENTS;
                    self.lex_contents()
                }
            }
            state::PARAM_TAG_VAR_NAME => {
                self.state = state::TAGGED_CONTENTS;
                if at_name_start(&self.range) {
                    skip_name_chars(&mut self.range);
                    XQDocNCName
                } else {
                    self.lex_contents()
                }
            }
            state::ELEM_CONSTRUCTOR => self.lex_start_tag(),
            state::ELEM_CONSTRUCTOR_CLOSING => self.lex_end_tag(),
            state::ATTRIBUTE_VALUE_QUOTE => self.lex_attribute_value('"'),
            state::ATTRIBUTE_VALUE_APOS => self.lex_attribute_value('\''),
            state::ELEM_CONTENTS => self.lex_element_contents(),
            _ => self.lex_contents(),
        };
        Some(kind)
    }

    fn lex_tag_name(&mut self) -> SyntaxKind {
        self.state = state::TAGGED_CONTENTS;
        let start = self.range.end_offset();
        skip_name_chars(&mut self.range);
        let name = &self.range.buffer()[start..self.range.end_offset()];
        let is_name = |tag: &str| name.iter().copied().eq(tag.encode_utf16());
        if is_name("param") {
            self.state = state::PARAM_TAG_CONTENTS_START;
        }
        if TAGS.iter().any(|tag| is_name(tag)) {
            XQDocTag
        } else {
            XQDocContents
        }
    }

    /// Free text of the current line, a line break, markup or a reference.
    fn lex_contents(&mut self) -> SyntaxKind {
        if self.at_line_break() {
            return self.lex_trim();
        }
        if self.range.at_ascii("</") && char_class(self.range.peek(2)).is_name_start() {
            self.range.eat_ascii("</");
            self.state = state::ELEM_CONSTRUCTOR_CLOSING;
            return XQDocXmlCloseTagOpen;
        }
        if self.at('<') && char_class(self.range.peek(1)).is_name_start() {
            self.state = state::ELEM_CONSTRUCTOR;
            return self.single(XQDocXmlTagOpen);
        }
        if self.at('&') {
            return self.lex_reference();
        }
        loop {
            self.range.advance();
            if self.range.is_at_end() || self.at_line_break() || self.at('<') || self.at('&') {
                return XQDocContents;
            }
        }
    }

    fn skip_blanks(&mut self) {
        while self.at(' ') || self.at('\t') {
            self.range.advance();
        }
    }

    /// Line break, indentation and an optional leading `:` with the blanks after it.
    fn lex_trim(&mut self) -> SyntaxKind {
        if !self.range.eat_ascii("\r\n") {
            self.range.advance();
        }
        self.skip_blanks();
        if self.at(':') {
            self.range.advance();
            self.skip_blanks();
        }
        self.state = state::TRIM;
        XQDocTrim
    }

    fn lex_reference(&mut self) -> SyntaxKind {
        match scan_reference(&mut self.range) {
            Reference::Predefined | Reference::Entity | Reference::Character => {
                XQDocEntityReference
            }
            Reference::Empty | Reference::Partial => XQDocContents,
        }
    }

    fn lex_start_tag(&mut self) -> SyntaxKind {
        match char_class(self.range.codepoint()) {
            CharClass::Whitespace => self.lex_whitespace(),
            CharClass::NameStartChar => self.lex_qname(),
            CharClass::Equal => self.single(XQDocXmlEqual),
            CharClass::Quote => {
                self.state = state::ATTRIBUTE_VALUE_QUOTE;
                self.single(XQDocXmlAttributeValueStart)
            }
            CharClass::Apostrophe => {
                self.state = state::ATTRIBUTE_VALUE_APOS;
                self.single(XQDocXmlAttributeValueStart)
            }
            CharClass::GreaterThan => {
                self.state = state::ELEM_CONTENTS;
                self.single(XQDocXmlTagEnd)
            }
            CharClass::ForwardSlash if self.range.at_ascii("/>") => {
                self.range.eat_ascii("/>");
                self.state = state::CONTENTS;
                XQDocXmlSelfClose
            }
            _ => {
                self.state = state::CONTENTS;
                self.lex_contents()
            }
        }
    }

    fn lex_end_tag(&mut self) -> SyntaxKind {
        match char_class(self.range.codepoint()) {
            CharClass::Whitespace => self.lex_whitespace(),
            CharClass::NameStartChar => self.lex_qname(),
            CharClass::GreaterThan => {
                self.state = state::CONTENTS;
                self.single(XQDocXmlTagEnd)
            }
            _ => {
                self.state = state::CONTENTS;
                self.lex_contents()
            }
        }
    }

    fn lex_whitespace(&mut self) -> SyntaxKind {
        while char_class(self.range.codepoint()) == CharClass::Whitespace {
            self.range.advance();
        }
        XQDocWhitespace
    }

    fn lex_qname(&mut self) -> SyntaxKind {
        skip_name_chars(&mut self.range);
        if self.at(':') && char_class(self.range.peek(1)).is_name_start() {
            self.range.advance();
            skip_name_chars(&mut self.range);
        }
        XQDocNCName
    }

    fn lex_attribute_value(&mut self, quote: char) -> SyntaxKind {
        if self.at(quote) {
            self.state = state::ELEM_CONSTRUCTOR;
            return self.single(XQDocXmlAttributeValueEnd);
        }
        if self.at('&') {
            return self.lex_reference();
        }
        while !(self.range.is_at_end() || self.at(quote) || self.at('&')) {
            self.range.advance();
        }
        XQDocXmlAttributeValueContents
    }

    fn lex_element_contents(&mut self) -> SyntaxKind {
        if self.range.at_ascii("</") {
            self.range.eat_ascii("</");
            self.state = state::ELEM_CONSTRUCTOR_CLOSING;
            return XQDocXmlCloseTagOpen;
        }
        if self.at('<') && char_class(self.range.peek(1)).is_name_start() {
            self.state = state::ELEM_CONSTRUCTOR;
            return self.single(XQDocXmlTagOpen);
        }
        if self.at('&') {
            return self.lex_reference();
        }
        loop {
            self.range.advance();
            if self.range.is_at_end() || self.at('<') || self.at('&') {
                return XQDocXmlElementContents;
            }
        }
    }
}

impl Default for XQDocLexer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'src> Lexer<'src> for XQDocLexer<'src> {
    fn start(&mut self, buffer: &'src [u16], start: usize, end: usize, state: LexerState) {
        self.range.start(buffer, start, end);
        self.state = if state <= state::PARAM_TAG_VAR_NAME {
            state
        } else {
            state::DEFAULT
        };
        self.advance();
    }

    fn advance(&mut self) {
        self.token_state = self.state;
        self.range.flush();
        self.kind = self.next_token();
    }

    fn token_kind(&self) -> Option<SyntaxKind> {
        self.kind
    }

    fn token_start(&self) -> usize {
        self.range.start_offset()
    }

    fn token_end(&self) -> usize {
        self.range.end_offset()
    }

    fn state(&self) -> LexerState {
        self.token_state
    }
}
