//! Sequence types, item types and kind tests.

use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::cst::token_sets::OCCURRENCE_INDICATORS;
use crate::parser::{Parser, Profile};

use super::KIND_TEST_NAMES;

impl Parser<'_> {
    pub(super) fn expect_sequence_type(&mut self) {
        if !self.parse_sequence_type() {
            self.error_expected("sequence type");
        }
    }

    /// `"empty-sequence" "(" ")" | ItemType OccurrenceIndicator?`
    ///
    /// Always produces a `SequenceType` node so type positions have a
    /// uniform shape.
    fn parse_sequence_type(&mut self) -> bool {
        if !self.enter_recursion() {
            return true;
        }
        let m = self.start();
        let parsed = if self.at_keyword("empty-sequence") && self.nth(1) == ParenOpen {
            self.parse_empty_parens(EmptySequenceType);
            true
        } else if self.parse_item_type() {
            if self.at_set(OCCURRENCE_INDICATORS) {
                let o = self.start();
                self.bump();
                o.complete(self, OccurrenceIndicator);
            }
            true
        } else {
            false
        };
        if parsed {
            m.complete(self, SequenceType);
        } else {
            m.drop(self);
        }
        self.exit_recursion();
        parsed
    }

    /// `EQName "?"?` as used by `cast as` and `castable as`.
    pub(super) fn expect_single_type(&mut self) {
        if !self.at_eqname() {
            self.error_expected("type name");
            return;
        }
        let m = self.start();
        self.parse_eqname(TypeName);
        self.eat(QuestionMark);
        m.complete(self, SingleType);
    }

    fn parse_item_type(&mut self) -> bool {
        if self.parse_kind_test() {
            return true;
        }
        if self.at_keyword("item") && self.nth(1) == ParenOpen {
            self.parse_empty_parens(AnyItemType);
            return true;
        }
        if self.at(AnnotationIndicator) || (self.at_keyword("function") && self.nth(1) == ParenOpen) {
            self.parse_function_test();
            return true;
        }
        if self.at(ParenOpen) {
            let m = self.start();
            self.bump();
            if !self.parse_item_type() {
                self.error_expected("item type");
            }
            self.expect(ParenClose, "`)`");
            m.complete(self, ParenthesizedItemType);
            return true;
        }
        self.parse_eqname(TypeName)
    }

    /// `Annotation* "function" "(" "*" ")"` or
    /// `Annotation* "function" "(" (SequenceType ("," SequenceType)*)? ")" "as" SequenceType`
    fn parse_function_test(&mut self) {
        let m = self.start();
        while self.at(AnnotationIndicator) {
            self.parse_annotation();
        }
        self.expect_keyword("function");
        self.expect(ParenOpen, "`(`");
        if self.eat(Star) {
            self.expect(ParenClose, "`)`");
            m.complete(self, AnyFunctionTest);
            return;
        }
        if !self.at(ParenClose) {
            loop {
                self.expect_sequence_type();
                if !self.eat(Comma) {
                    break;
                }
            }
        }
        self.expect(ParenClose, "`)`");
        self.expect_keyword("as");
        self.expect_sequence_type();
        m.complete(self, TypedFunctionTest);
    }

    pub(super) fn at_kind_test(&mut self) -> bool {
        if self.nth(1) != ParenOpen {
            return false;
        }
        self.at_any_keyword(KIND_TEST_NAMES)
            || (self.profile == Profile::MarkLogic && self.at_keyword("binary"))
    }

    pub(super) fn parse_kind_test(&mut self) -> bool {
        if !self.at_kind_test() {
            return false;
        }
        let name = self.nth_text(0);
        match name.as_str() {
            "node" => self.parse_empty_parens(AnyKindTest),
            "text" => self.parse_empty_parens(TextTest),
            "comment" => self.parse_empty_parens(CommentTest),
            "namespace-node" => self.parse_empty_parens(NamespaceNodeTest),
            "binary" => self.parse_empty_parens(BinaryTest),
            "document-node" => self.parse_document_test(),
            "processing-instruction" => self.parse_pi_test(),
            "attribute" => self.parse_attribute_or_element_test(AttributeTest),
            "element" => self.parse_attribute_or_element_test(ElementTest),
            "schema-attribute" => self.parse_schema_test(SchemaAttributeTest),
            _ => self.parse_schema_test(SchemaElementTest),
        }
        true
    }

    /// `keyword "(" ")"`
    fn parse_empty_parens(&mut self, kind: SyntaxKind) {
        let m = self.start();
        self.bump_keyword();
        self.expect(ParenOpen, "`(`");
        self.expect(ParenClose, "`)`");
        m.complete(self, kind);
    }

    /// `"document-node" "(" (ElementTest | SchemaElementTest)? ")"`
    fn parse_document_test(&mut self) {
        let m = self.start();
        self.bump_keyword();
        self.bump();
        if self.nth(1) == ParenOpen {
            if self.at_keyword("element") {
                self.parse_attribute_or_element_test(ElementTest);
            } else if self.at_keyword("schema-element") {
                self.parse_schema_test(SchemaElementTest);
            }
        }
        self.expect(ParenClose, "`)`");
        m.complete(self, DocumentTest);
    }

    /// `"processing-instruction" "(" (NCName | StringLiteral)? ")"`
    fn parse_pi_test(&mut self) {
        let m = self.start();
        self.bump_keyword();
        self.bump();
        if self.at(NCName) {
            self.bump();
        } else {
            self.parse_string_literal(StringLiteral);
        }
        self.expect(ParenClose, "`)`");
        m.complete(self, PiTest);
    }

    /// `("attribute" | "element") "(" ((EQName | "*") ("," TypeName "?"?)?)? ")"`
    fn parse_attribute_or_element_test(&mut self, kind: SyntaxKind) {
        let m = self.start();
        self.bump_keyword();
        self.bump();
        if !self.at(ParenClose) {
            if !self.eat(Star) {
                self.expect_eqname(QName, "name or `*`");
            }
            if self.eat(Comma) {
                self.expect_eqname(TypeName, "type name");
                if kind == ElementTest {
                    self.eat(QuestionMark);
                }
            }
        }
        self.expect(ParenClose, "`)`");
        m.complete(self, kind);
    }

    /// `("schema-attribute" | "schema-element") "(" EQName ")"`
    fn parse_schema_test(&mut self, kind: SyntaxKind) {
        let m = self.start();
        self.bump_keyword();
        self.bump();
        self.expect_eqname(QName, "declaration name");
        self.expect(ParenClose, "`)`");
        m.complete(self, kind);
    }
}
