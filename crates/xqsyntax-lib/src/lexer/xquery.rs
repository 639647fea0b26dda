//! Primary XQuery lexer.
//!
//! A state machine over [`CodepointRange`] with an explicit stack of state
//! ids. Entering a nested construct (string, comment, tag, enclosed
//! expression) pushes the current state; finishing it pops. Popping an empty
//! stack yields `DEFAULT`, which is how unbalanced `}` and similar input is
//! absorbed.
//!
//! ## State packing
//!
//! | bits  | content                                   |
//! |-------|-------------------------------------------|
//! | 0-4   | current state                             |
//! | 5-24  | up to four saved frames, innermost first  |
//! | 25-27 | number of saved frames                    |
//! | 28-31 | reserved for [`super::LexerComposition`]  |
//!
//! Frames below the innermost four are not stored; popping past them falls
//! back to `DEFAULT`.

use xqsyntax_core::{CharClass, CodepointRange, END_OF_BUFFER, char_class};

use super::references::{Reference, at_name_start, scan_reference, skip_name_chars};
use super::{Lexer, LexerState};
use crate::parser::cst::SyntaxKind::{self, *};

pub(crate) mod state {
    pub const DEFAULT: u8 = 0;
    pub const STRING_LITERAL_QUOTE: u8 = 1;
    pub const STRING_LITERAL_APOS: u8 = 2;
    pub const XQUERY_COMMENT: u8 = 3;
    pub const XQDOC_COMMENT: u8 = 4;
    pub const XML_COMMENT: u8 = 5;
    pub const CDATA_SECTION: u8 = 6;
    pub const PROCESSING_INSTRUCTION: u8 = 7;
    pub const PROCESSING_INSTRUCTION_CONTENTS: u8 = 8;
    pub const PRAGMA: u8 = 9;
    pub const PRAGMA_CONTENTS: u8 = 10;
    pub const BRACED_URI_LITERAL: u8 = 11;
    pub const DIR_ELEM_CONSTRUCTOR: u8 = 12;
    pub const DIR_ELEM_CONSTRUCTOR_CLOSING: u8 = 13;
    pub const DIR_ATTRIBUTE_VALUE_QUOTE: u8 = 14;
    pub const DIR_ATTRIBUTE_VALUE_APOS: u8 = 15;
    pub const DIR_ELEM_CONTENT: u8 = 16;
    pub const DOUBLE_EXPONENT: u8 = 17;

    pub const COUNT: u8 = 18;
}

const STATE_BITS: u32 = 5;
const STATE_MASK: u32 = (1 << STATE_BITS) - 1;
const MAX_SAVED_FRAMES: usize = 4;
const FRAME_COUNT_SHIFT: u32 = 25;
const FRAME_COUNT_MASK: u32 = 0b111;

pub struct XQueryLexer<'src> {
    range: CodepointRange<'src>,
    kind: Option<SyntaxKind>,
    token_state: LexerState,
    state: u8,
    stack: Vec<u8>,
}

impl<'src> XQueryLexer<'src> {
    pub fn new() -> Self {
        Self {
            range: CodepointRange::new(),
            kind: None,
            token_state: 0,
            state: state::DEFAULT,
            stack: Vec::new(),
        }
    }

    /// Packs the current state and the innermost saved frames.
    fn pack(&self) -> LexerState {
        let frames = self.stack.len().min(MAX_SAVED_FRAMES);
        let mut packed = u32::from(self.state);
        for (i, &frame) in self.stack.iter().rev().take(frames).enumerate() {
            packed |= u32::from(frame) << (STATE_BITS * (i as u32 + 1));
        }
        packed | ((frames as u32) << FRAME_COUNT_SHIFT)
    }

    fn unpack(&mut self, packed: LexerState) {
        self.state = valid_state(packed & STATE_MASK);
        let frames = ((packed >> FRAME_COUNT_SHIFT) & FRAME_COUNT_MASK).min(MAX_SAVED_FRAMES as u32);
        self.stack.clear();
        for i in (0..frames).rev() {
            self.stack
                .push(valid_state((packed >> (STATE_BITS * (i + 1))) & STATE_MASK));
        }
    }

    fn push_state(&mut self, next: u8) {
        self.stack.push(self.state);
        self.state = next;
    }

    fn pop_state(&mut self) {
        self.state = self.stack.pop().unwrap_or(state::DEFAULT);
    }

    fn codepoint(&self) -> u32 {
        self.range.codepoint()
    }

    fn class(&self) -> CharClass {
        char_class(self.range.codepoint())
    }

    fn at(&self, c: char) -> bool {
        self.range.codepoint() == c as u32
    }

    fn bump(&mut self) {
        self.range.advance();
    }

    fn next_token(&mut self) -> Option<SyntaxKind> {
        match self.state {
            state::STRING_LITERAL_QUOTE => Some(self.lex_string_literal('"')),
            state::STRING_LITERAL_APOS => Some(self.lex_string_literal('\'')),
            state::XQUERY_COMMENT => Some(self.lex_comment(CommentContents)),
            state::XQDOC_COMMENT => Some(self.lex_comment(XQDocComment)),
            state::XML_COMMENT => Some(self.lex_delimited("-->", XmlCommentContents, XmlCommentEnd)),
            state::CDATA_SECTION => {
                Some(self.lex_delimited("]]>", CDataSectionContents, CDataSectionEnd))
            }
            state::PROCESSING_INSTRUCTION => Some(self.lex_processing_instruction()),
            state::PROCESSING_INSTRUCTION_CONTENTS => Some(self.lex_delimited(
                "?>",
                ProcessingInstructionContents,
                ProcessingInstructionEnd,
            )),
            state::PRAGMA => Some(self.lex_pragma()),
            state::PRAGMA_CONTENTS => Some(self.lex_pragma_contents()),
            state::BRACED_URI_LITERAL => Some(self.lex_braced_uri_literal()),
            state::DIR_ELEM_CONSTRUCTOR => self.lex_start_tag(),
            state::DIR_ELEM_CONSTRUCTOR_CLOSING => self.lex_end_tag(),
            state::DIR_ATTRIBUTE_VALUE_QUOTE => self.lex_attribute_value('"'),
            state::DIR_ATTRIBUTE_VALUE_APOS => self.lex_attribute_value('\''),
            state::DIR_ELEM_CONTENT => self.lex_element_content(),
            state::DOUBLE_EXPONENT => self.lex_double_exponent(),
            _ => self.lex_default(),
        }
    }

    fn lex_default(&mut self) -> Option<SyntaxKind> {
        let kind = match self.class() {
            CharClass::EndOfBuffer => return None,
            CharClass::Whitespace => {
                self.skip_whitespace();
                Whitespace
            }
            CharClass::Digit => self.lex_number(),
            CharClass::Dot => {
                if self.range.eat_ascii("..") {
                    ParentSelector
                } else if char_class(self.range.peek(1)) == CharClass::Digit {
                    self.lex_number()
                } else {
                    self.bump();
                    Dot
                }
            }
            CharClass::NameStartChar => self.lex_name(),
            CharClass::Quote => {
                self.bump();
                self.push_state(state::STRING_LITERAL_QUOTE);
                StringLiteralStart
            }
            CharClass::Apostrophe => {
                self.bump();
                self.push_state(state::STRING_LITERAL_APOS);
                StringLiteralStart
            }
            CharClass::ParenthesisOpen => self.lex_paren_open(),
            CharClass::ParenthesisClose => self.single(ParenClose),
            CharClass::Colon => {
                if self.range.eat_ascii("::") {
                    AxisSeparator
                } else if self.range.eat_ascii(":=") {
                    Assign
                } else if self.range.eat_ascii(":)") {
                    UnmatchedCommentEnd
                } else {
                    self.single(QNameSeparator)
                }
            }
            CharClass::Hash => {
                if self.range.eat_ascii("#)") {
                    PragmaEnd
                } else {
                    self.single(FunctionRefHash)
                }
            }
            CharClass::LessThan => self.lex_less_than(),
            CharClass::GreaterThan => {
                if self.range.eat_ascii(">=") {
                    GreaterThanOrEqual
                } else if self.range.eat_ascii(">>") {
                    NodeAfter
                } else {
                    self.single(GreaterThan)
                }
            }
            CharClass::ForwardSlash => {
                if self.range.eat_ascii("//") {
                    DoubleSlash
                } else {
                    self.single(Slash)
                }
            }
            CharClass::VerticalBar => {
                if self.range.eat_ascii("||") {
                    Concatenation
                } else {
                    self.single(Union)
                }
            }
            CharClass::ExclamationMark => {
                if self.range.eat_ascii("!=") {
                    NotEqual
                } else {
                    self.single(Bang)
                }
            }
            CharClass::CurlyBraceOpen => {
                self.bump();
                self.push_state(state::DEFAULT);
                BlockOpen
            }
            CharClass::CurlyBraceClose => {
                self.bump();
                self.pop_state();
                BlockClose
            }
            CharClass::Equal => self.single(Equal),
            CharClass::Semicolon => self.single(Separator),
            CharClass::Comma => self.single(Comma),
            CharClass::SquareBraceOpen => self.single(SquareOpen),
            CharClass::SquareBraceClose => self.single(SquareClose),
            CharClass::Dollar => self.single(VariableIndicator),
            CharClass::AtSign => self.single(AttributeSelector),
            CharClass::Plus => self.single(Plus),
            CharClass::Minus => self.single(Minus),
            CharClass::Asterisk => self.single(Star),
            CharClass::QuestionMark => self.single(QuestionMark),
            CharClass::Percent => self.single(AnnotationIndicator),
            CharClass::Ampersand
            | CharClass::Char
            | CharClass::NameChar
            | CharClass::Invalid => {
                while matches!(
                    self.class(),
                    CharClass::Ampersand | CharClass::Char | CharClass::NameChar | CharClass::Invalid
                ) {
                    self.bump();
                }
                BadCharacter
            }
        };
        Some(kind)
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.bump();
        kind
    }

    fn skip_whitespace(&mut self) {
        while self.class() == CharClass::Whitespace {
            self.bump();
        }
    }

    fn skip_digits(&mut self) {
        while self.class() == CharClass::Digit {
            self.bump();
        }
    }

    fn lex_number(&mut self) -> SyntaxKind {
        let mut kind = IntegerLiteral;
        self.skip_digits();
        if self.at('.') && !self.range.at_ascii("..") {
            self.bump();
            self.skip_digits();
            kind = DecimalLiteral;
        }
        if self.at('e') || self.at('E') {
            self.range.save();
            self.bump();
            if self.at('+') || self.at('-') {
                self.bump();
            }
            if self.class() == CharClass::Digit {
                self.skip_digits();
                return DoubleLiteral;
            }
            self.range.restore();
            self.push_state(state::DOUBLE_EXPONENT);
        }
        kind
    }

    fn lex_double_exponent(&mut self) -> Option<SyntaxKind> {
        self.pop_state();
        if !(self.at('e') || self.at('E')) {
            return self.next_token();
        }
        self.bump();
        if self.at('+') || self.at('-') {
            self.bump();
        }
        Some(PartialDoubleLiteralExponent)
    }

    fn lex_name(&mut self) -> SyntaxKind {
        let start = self.range.end_offset();
        self.bump();
        if self.at('{') && self.range.ascii_at(start, "Q") {
            self.bump();
            self.push_state(state::BRACED_URI_LITERAL);
            return BracedUriLiteralStart;
        }
        skip_name_chars(&mut self.range);
        NCName
    }

    fn lex_paren_open(&mut self) -> SyntaxKind {
        if self.range.at_ascii("(:~") {
            self.range.eat_ascii("(:");
            self.push_state(state::XQDOC_COMMENT);
            CommentStart
        } else if self.range.eat_ascii("(:") {
            self.push_state(state::XQUERY_COMMENT);
            CommentStart
        } else if self.range.eat_ascii("(#") {
            self.push_state(state::PRAGMA);
            PragmaBegin
        } else {
            self.single(ParenOpen)
        }
    }

    fn lex_less_than(&mut self) -> SyntaxKind {
        if self.range.eat_ascii("<=") {
            return LessThanOrEqual;
        }
        if self.range.eat_ascii("<<") {
            return NodeBefore;
        }
        if self.range.eat_ascii("<!--") {
            self.push_state(state::XML_COMMENT);
            return XmlCommentStart;
        }
        if self.range.eat_ascii("<![CDATA[") {
            self.push_state(state::CDATA_SECTION);
            return CDataSectionStart;
        }
        if self.range.at_ascii("<?") && char_class(self.range.peek(2)).is_name_start() {
            self.range.eat_ascii("<?");
            self.push_state(state::PROCESSING_INSTRUCTION);
            return ProcessingInstructionBegin;
        }
        if at_direct_element(&self.range) {
            self.bump();
            self.push_state(state::DIR_ELEM_CONSTRUCTOR);
            return XmlTagOpen;
        }
        self.single(LessThan)
    }

    fn lex_string_literal(&mut self, quote: char) -> SyntaxKind {
        let quote = quote as u32;
        let c = self.codepoint();
        if c == END_OF_BUFFER {
            self.pop_state();
            return IncompleteStringLiteral;
        }
        if c == quote {
            self.bump();
            if self.codepoint() == quote {
                self.bump();
                return EscapedCharacter;
            }
            self.pop_state();
            return StringLiteralEnd;
        }
        if self.at('&') {
            return reference_kind(scan_reference(&mut self.range));
        }
        loop {
            let c = self.codepoint();
            if c == quote || c == '&' as u32 || c == END_OF_BUFFER {
                return StringLiteralContents;
            }
            self.bump();
        }
    }

    /// Comment body with nesting, or the closing `:)`.
    fn lex_comment(&mut self, body: SyntaxKind) -> SyntaxKind {
        if self.range.is_at_end() {
            self.pop_state();
            return IncompleteComment;
        }
        if self.range.eat_ascii(":)") {
            self.pop_state();
            return CommentEnd;
        }
        let mut depth = 0u32;
        while !self.range.is_at_end() {
            if self.range.eat_ascii("(:") {
                depth += 1;
            } else if self.range.at_ascii(":)") {
                if depth == 0 {
                    break;
                }
                self.range.eat_ascii(":)");
                depth -= 1;
            } else {
                self.bump();
            }
        }
        body
    }

    /// Contents up to `end`, or `end` itself.
    fn lex_delimited(&mut self, end: &str, contents: SyntaxKind, end_kind: SyntaxKind) -> SyntaxKind {
        if self.range.is_at_end() {
            self.pop_state();
            return IncompleteMarkup;
        }
        if self.range.eat_ascii(end) {
            self.pop_state();
            return end_kind;
        }
        while !self.range.is_at_end() && !self.range.at_ascii(end) {
            self.bump();
        }
        contents
    }

    fn lex_processing_instruction(&mut self) -> SyntaxKind {
        if self.range.is_at_end() {
            self.pop_state();
            return IncompleteMarkup;
        }
        if self.range.eat_ascii("?>") {
            self.pop_state();
            return ProcessingInstructionEnd;
        }
        match self.class() {
            CharClass::Whitespace => {
                self.skip_whitespace();
                self.state = state::PROCESSING_INSTRUCTION_CONTENTS;
                Whitespace
            }
            CharClass::NameStartChar => {
                skip_name_chars(&mut self.range);
                NCName
            }
            _ => self.single(BadCharacter),
        }
    }

    fn lex_pragma(&mut self) -> SyntaxKind {
        if self.range.is_at_end() {
            self.pop_state();
            return IncompleteMarkup;
        }
        if self.range.eat_ascii("#)") {
            self.pop_state();
            return PragmaEnd;
        }
        match self.class() {
            CharClass::Whitespace => {
                self.skip_whitespace();
                Whitespace
            }
            CharClass::Colon => self.single(QNameSeparator),
            CharClass::NameStartChar => {
                skip_name_chars(&mut self.range);
                let prefixed = self.at(':') && char_class(self.range.peek(1)).is_name_start();
                if !prefixed {
                    self.state = state::PRAGMA_CONTENTS;
                }
                NCName
            }
            _ => self.single(BadCharacter),
        }
    }

    fn lex_pragma_contents(&mut self) -> SyntaxKind {
        if self.class() == CharClass::Whitespace {
            self.skip_whitespace();
            return Whitespace;
        }
        self.lex_delimited("#)", PragmaContents, PragmaEnd)
    }

    fn lex_braced_uri_literal(&mut self) -> SyntaxKind {
        if self.range.is_at_end() {
            self.pop_state();
            return IncompleteMarkup;
        }
        if self.at('}') {
            self.bump();
            self.pop_state();
            return BracedUriLiteralEnd;
        }
        if self.at('&') {
            return reference_kind(scan_reference(&mut self.range));
        }
        while !(self.range.is_at_end() || self.at('}') || self.at('&')) {
            self.bump();
        }
        StringLiteralContents
    }

    fn lex_tag_name_part(&mut self) -> Option<SyntaxKind> {
        let kind = match self.class() {
            CharClass::EndOfBuffer => return None,
            CharClass::Whitespace => {
                self.skip_whitespace();
                Whitespace
            }
            CharClass::NameStartChar => {
                skip_name_chars(&mut self.range);
                NCName
            }
            CharClass::Colon => self.single(QNameSeparator),
            _ => return None,
        };
        Some(kind)
    }

    fn lex_start_tag(&mut self) -> Option<SyntaxKind> {
        if let Some(kind) = self.lex_tag_name_part() {
            return Some(kind);
        }
        let kind = match self.class() {
            CharClass::EndOfBuffer => return None,
            CharClass::Equal => self.single(Equal),
            CharClass::Quote => {
                self.bump();
                self.push_state(state::DIR_ATTRIBUTE_VALUE_QUOTE);
                XmlAttributeValueStart
            }
            CharClass::Apostrophe => {
                self.bump();
                self.push_state(state::DIR_ATTRIBUTE_VALUE_APOS);
                XmlAttributeValueStart
            }
            CharClass::GreaterThan => {
                self.bump();
                self.state = state::DIR_ELEM_CONTENT;
                XmlTagEnd
            }
            CharClass::ForwardSlash if self.range.at_ascii("/>") => {
                self.range.eat_ascii("/>");
                self.pop_state();
                XmlSelfClose
            }
            _ => self.single(BadCharacter),
        };
        Some(kind)
    }

    fn lex_end_tag(&mut self) -> Option<SyntaxKind> {
        if let Some(kind) = self.lex_tag_name_part() {
            return Some(kind);
        }
        let kind = match self.class() {
            CharClass::EndOfBuffer => return None,
            CharClass::GreaterThan => {
                self.bump();
                self.pop_state();
                XmlTagEnd
            }
            _ => self.single(BadCharacter),
        };
        Some(kind)
    }

    /// `{{`, `}}`, `{` and a stray `}` inside attribute values and element content.
    fn lex_brace_in_markup(&mut self) -> Option<SyntaxKind> {
        if self.range.eat_ascii("{{") || self.range.eat_ascii("}}") {
            return Some(EscapedCharacter);
        }
        if self.at('{') {
            self.bump();
            self.push_state(state::DEFAULT);
            return Some(BlockOpen);
        }
        if self.at('}') {
            return Some(self.single(BadCharacter));
        }
        None
    }

    fn lex_attribute_value(&mut self, quote: char) -> Option<SyntaxKind> {
        if self.range.is_at_end() {
            return None;
        }
        if self.at(quote) {
            self.bump();
            if self.at(quote) {
                self.bump();
                return Some(EscapedCharacter);
            }
            self.pop_state();
            return Some(XmlAttributeValueEnd);
        }
        if let Some(kind) = self.lex_brace_in_markup() {
            return Some(kind);
        }
        if self.at('&') {
            return Some(reference_kind(scan_reference(&mut self.range)));
        }
        if self.at('<') {
            return Some(self.single(BadCharacter));
        }
        while !(self.range.is_at_end()
            || self.at(quote)
            || self.at('{')
            || self.at('}')
            || self.at('&')
            || self.at('<'))
        {
            self.bump();
        }
        Some(XmlAttributeValueContents)
    }

    fn lex_element_content(&mut self) -> Option<SyntaxKind> {
        if self.range.is_at_end() {
            return None;
        }
        if self.range.eat_ascii("</") {
            self.state = state::DIR_ELEM_CONSTRUCTOR_CLOSING;
            return Some(XmlCloseTagOpen);
        }
        if self.range.eat_ascii("<!--") {
            self.push_state(state::XML_COMMENT);
            return Some(XmlCommentStart);
        }
        if self.range.eat_ascii("<![CDATA[") {
            self.push_state(state::CDATA_SECTION);
            return Some(CDataSectionStart);
        }
        if self.range.eat_ascii("<?") {
            self.push_state(state::PROCESSING_INSTRUCTION);
            return Some(ProcessingInstructionBegin);
        }
        if self.at('<') {
            self.bump();
            self.push_state(state::DIR_ELEM_CONSTRUCTOR);
            return Some(XmlTagOpen);
        }
        if let Some(kind) = self.lex_brace_in_markup() {
            return Some(kind);
        }
        if self.at('&') {
            return Some(reference_kind(scan_reference(&mut self.range)));
        }
        while !(self.range.is_at_end()
            || self.at('<')
            || self.at('{')
            || self.at('}')
            || self.at('&'))
        {
            self.bump();
        }
        Some(XmlElementContents)
    }
}

impl Default for XQueryLexer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'src> Lexer<'src> for XQueryLexer<'src> {
    fn start(&mut self, buffer: &'src [u16], start: usize, end: usize, state: LexerState) {
        self.range.start(buffer, start, end);
        self.unpack(state);
        self.advance();
    }

    fn advance(&mut self) {
        self.token_state = self.pack();
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

fn valid_state(raw: u32) -> u8 {
    if raw < u32::from(state::COUNT) {
        raw as u8
    } else {
        state::DEFAULT
    }
}

fn reference_kind(reference: Reference) -> SyntaxKind {
    match reference {
        Reference::Predefined => PredefinedEntityReference,
        Reference::Entity => EntityReference,
        Reference::Character => CharacterReference,
        Reference::Empty => EmptyEntityReference,
        Reference::Partial => PartialEntityReference,
    }
}

/// Bounded look-ahead deciding whether `<` opens a direct element constructor:
/// `<` QName (S QName S? `=` S? quoted-value)* S? (`>` | `/>`).
///
/// Runs on a copy of the cursor and never changes lexer state. Input ending
/// before the tag closes leaves `<` as the less-than operator.
fn at_direct_element(range: &CodepointRange<'_>) -> bool {
    let mut scan = range.clone();
    scan.advance();
    if !scan_qname(&mut scan) {
        return false;
    }
    loop {
        let had_space = skip_xml_whitespace(&mut scan);
        match char_class(scan.codepoint()) {
            CharClass::GreaterThan => return true,
            CharClass::ForwardSlash => return scan.at_ascii("/>"),
            CharClass::NameStartChar if had_space => {
                scan_qname(&mut scan);
                skip_xml_whitespace(&mut scan);
                if !scan.eat_ascii("=") {
                    return false;
                }
                skip_xml_whitespace(&mut scan);
                let quote = scan.codepoint();
                if quote != '"' as u32 && quote != '\'' as u32 {
                    return false;
                }
                scan.advance();
                while !scan.is_at_end() && scan.codepoint() != quote {
                    scan.advance();
                }
                if scan.is_at_end() {
                    return false;
                }
                scan.advance();
            }
            _ => return false,
        }
    }
}

fn scan_qname(scan: &mut CodepointRange<'_>) -> bool {
    if !at_name_start(scan) {
        return false;
    }
    skip_name_chars(scan);
    if scan.at_ascii(":") && char_class(scan.peek(1)).is_name_start() {
        scan.advance();
        skip_name_chars(scan);
    }
    true
}

fn skip_xml_whitespace(scan: &mut CodepointRange<'_>) -> bool {
    let mut skipped = false;
    while char_class(scan.codepoint()) == CharClass::Whitespace {
        scan.advance();
        skipped = true;
    }
    skipped
}
