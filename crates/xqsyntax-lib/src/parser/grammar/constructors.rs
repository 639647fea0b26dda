//! Direct XML constructors and computed node constructors.

use text_size::TextRange;
use tracing::trace;

use crate::diagnostics::DiagnosticKind;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::cst::token_sets::CHARACTER_REFERENCES;
use crate::parser::event::ErrorInfo;
use crate::parser::{Parser, Profile};

impl Parser<'_> {
    pub(super) fn parse_direct_constructor(&mut self) -> bool {
        match self.current() {
            XmlTagOpen => self.parse_dir_elem_constructor(),
            XmlCommentStart => {
                self.parse_markup(DirCommentConstructor, &[XmlCommentContents], XmlCommentEnd, "`-->`")
            }
            ProcessingInstructionBegin => self.parse_markup(
                DirPiConstructor,
                &[NCName, ProcessingInstructionContents, BadCharacter],
                ProcessingInstructionEnd,
                "`?>`",
            ),
            CDataSectionStart => {
                self.parse_markup(CDataSection, &[CDataSectionContents], CDataSectionEnd, "`]]>`")
            }
            _ => false,
        }
    }

    /// Opening token, any number of `body` tokens, then `end` or the
    /// lexer's incomplete-markup marker.
    fn parse_markup(
        &mut self,
        kind: SyntaxKind,
        body: &[SyntaxKind],
        end: SyntaxKind,
        what: &str,
    ) -> bool {
        let m = self.start();
        self.bump();
        while body.contains(&self.current()) {
            self.bump();
        }
        if !self.eat(end) && !self.eat(IncompleteMarkup) {
            self.error_expected(what);
        }
        m.complete(self, kind);
        true
    }

    /// `"<" QName DirAttributeList ("/>" | (">" DirElemContent* "</" QName ">"))`
    fn parse_dir_elem_constructor(&mut self) -> bool {
        if !self.enter_recursion() {
            return true;
        }
        let m = self.start();
        self.bump();

        let name_start = self.pos;
        self.expect_eqname(QName, "element name");
        let name = self.text_of_tokens(name_start, self.pos);
        let name_range = self.range_of_tokens(name_start, self.pos);

        self.parse_dir_attribute_list();

        if self.eat(XmlSelfClose) {
            m.complete(self, DirElemConstructor);
            self.exit_recursion();
            return true;
        }
        if !self.eat(XmlTagEnd) {
            self.error_expected("`>`");
            m.complete(self, DirElemConstructor);
            self.exit_recursion();
            return true;
        }

        self.parse_dir_elem_content();

        if self.at(XmlCloseTagOpen) {
            self.bump();
            self.parse_closing_tag_name(&name, name_range);
            self.expect(XmlTagEnd, "`>`");
        } else {
            self.error_expected(&format!("`</{name}>`"));
        }
        m.complete(self, DirElemConstructor);
        self.exit_recursion();
        true
    }

    fn parse_closing_tag_name(&mut self, open: &str, open_range: Option<TextRange>) {
        let start = self.pos;
        let m = self.start();
        if !self.parse_eqname(QName) {
            m.drop(self);
            self.error_expected("closing tag name");
            return;
        }
        let close = self.text_of_tokens(start, self.pos);
        if close == open {
            m.drop(self);
        } else {
            trace!(open, close = close.as_str(), "mismatched closing tag");
            self.last_error_pos = Some(self.current_range().start());
            let mut error = ErrorInfo::new(DiagnosticKind::MismatchedClosingTag, Some(open.to_string()));
            if let Some(range) = open_range {
                error = error.related_to("opened here", range);
            }
            m.complete_with_error(self, error);
        }
    }

    fn parse_dir_attribute_list(&mut self) {
        let m = self.start();
        loop {
            match self.current() {
                NCName => self.parse_dir_attribute(),
                XmlAttributeValueStart => {
                    self.error_expected("attribute name");
                    self.parse_dir_attribute_value();
                }
                XmlTagEnd | XmlSelfClose | Eof => break,
                _ => self.recover_token(),
            }
        }
        if m.is_empty(self) {
            m.drop(self);
        } else {
            m.complete(self, DirAttributeList);
        }
    }

    /// `QName "=" DirAttributeValue`
    fn parse_dir_attribute(&mut self) {
        let m = self.start();
        self.parse_eqname(QName);
        self.expect(Equal, "`=`");
        if self.at(XmlAttributeValueStart) {
            self.parse_dir_attribute_value();
        } else {
            self.error_expected("attribute value");
        }
        m.complete(self, DirAttribute);
    }

    fn parse_dir_attribute_value(&mut self) {
        let m = self.start();
        self.bump();
        loop {
            let kind = self.current();
            if kind == XmlAttributeValueContents || kind == BadCharacter || CHARACTER_REFERENCES.contains(kind) {
                self.bump();
            } else if kind == BlockOpen {
                self.parse_enclosed_expr();
            } else {
                break;
            }
        }
        self.expect(XmlAttributeValueEnd, "closing quote");
        m.complete(self, DirAttributeValue);
    }

    /// Character data, references, enclosed expressions and nested markup
    /// up to the closing tag.
    fn parse_dir_elem_content(&mut self) {
        let m = self.start();
        loop {
            let kind = self.current();
            if kind == XmlElementContents || kind == BadCharacter || CHARACTER_REFERENCES.contains(kind) {
                self.bump();
            } else if kind == BlockOpen {
                self.parse_enclosed_expr();
            } else if kind == XmlCloseTagOpen || kind == Eof || self.has_fatal_error() {
                break;
            } else if !self.parse_direct_constructor() {
                self.recover_token();
            }
        }
        if m.is_empty(self) {
            m.drop(self);
        } else {
            m.complete(self, DirElemContent);
        }
    }

    pub(super) fn parse_computed_constructor(&mut self) -> bool {
        if !self.at(NCName) || self.raw_nth(1) == QNameSeparator {
            return false;
        }
        if self.nth(1) == BlockOpen {
            let kind = if self.at_keyword("document") {
                CompDocConstructor
            } else if self.at_keyword("text") {
                CompTextConstructor
            } else if self.at_keyword("comment") {
                CompCommentConstructor
            } else if self.at_keyword("binary") && self.profile == Profile::MarkLogic {
                CompBinaryConstructor
            } else {
                return self.parse_named_computed_constructor();
            };
            let m = self.start();
            self.bump_keyword();
            self.parse_enclosed_expr();
            m.complete(self, kind);
            return true;
        }
        self.parse_named_computed_constructor()
    }

    /// `keyword (EQName | "{" Expr "}") "{" Expr? "}"` for elements,
    /// attributes, namespaces and processing instructions.
    fn parse_named_computed_constructor(&mut self) -> bool {
        let kind = if self.at_keyword("element") {
            CompElemConstructor
        } else if self.at_keyword("attribute") {
            CompAttrConstructor
        } else if self.at_keyword("namespace") {
            CompNamespaceConstructor
        } else if self.at_keyword("processing-instruction") {
            CompPiConstructor
        } else {
            return false;
        };
        let named = self
            .eqname_end(1)
            .is_some_and(|end| self.nth(end) == BlockOpen);
        if !named && self.nth(1) != BlockOpen {
            return false;
        }

        let m = self.start();
        self.bump_keyword();
        if named {
            self.parse_eqname(QName);
        } else {
            self.parse_enclosed_expr();
        }
        self.expect_enclosed_expr();
        m.complete(self, kind);
        true
    }
}
