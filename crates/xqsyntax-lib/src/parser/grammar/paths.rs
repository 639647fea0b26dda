//! Path expressions, axis steps and node tests.

use crate::parser::Parser;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::event::Marker;
use crate::parser::cst::token_sets::CHARACTER_REFERENCES;

use super::{FORWARD_AXES, REVERSE_AXES};

impl Parser<'_> {
    /// `"/" RelativePathExpr? | "//" RelativePathExpr | RelativePathExpr`
    pub(super) fn parse_path_expr(&mut self) -> bool {
        if self.at(Slash) {
            let m = self.start();
            self.bump();
            self.parse_relative_path_expr();
            m.complete(self, PathExpr);
            return true;
        }
        if self.at(DoubleSlash) {
            let m = self.start();
            self.bump();
            if !self.parse_relative_path_expr() {
                self.error_expected("relative path");
            }
            m.complete(self, PathExpr);
            return true;
        }
        self.parse_relative_path_expr()
    }

    /// `StepExpr (("/" | "//") StepExpr)*`
    fn parse_relative_path_expr(&mut self) -> bool {
        let m = self.start();
        if !self.parse_step_expr() {
            m.drop(self);
            return false;
        }
        let mut steps = 1;
        while self.at(Slash) || self.at(DoubleSlash) {
            self.bump();
            if !self.parse_step_expr() {
                self.error_expected("StepExpr");
            }
            steps += 1;
        }
        if steps > 1 {
            m.complete(self, RelativePathExpr);
        } else {
            m.drop(self);
        }
        true
    }

    /// `PostfixExpr | AxisStep`
    fn parse_step_expr(&mut self) -> bool {
        if self.at_axis(FORWARD_AXES) {
            return self.parse_axis_step(ForwardStep);
        }
        if self.at_axis(REVERSE_AXES) {
            return self.parse_axis_step(ReverseStep);
        }
        if self.at(AttributeSelector) || self.at(ParentSelector) || self.at_kind_test() {
            return self.parse_abbreviated_step();
        }
        if self.parse_postfix_expr() {
            return true;
        }
        let m = self.start();
        if !self.parse_name_test() {
            m.drop(self);
            return false;
        }
        self.finish_axis_step(m);
        true
    }

    fn at_axis(&mut self, axes: &[&str]) -> bool {
        self.at_any_keyword(axes) && self.nth(1) == AxisSeparator
    }

    /// `axis "::" NodeTest PredicateList`
    fn parse_axis_step(&mut self, kind: SyntaxKind) -> bool {
        let m = self.start();
        let step = self.start();
        self.bump_keyword();
        self.bump();
        self.expect_node_test();
        step.complete(self, kind);
        self.finish_axis_step(m);
        true
    }

    /// `"@" NodeTest`, `".."` or a bare kind test.
    fn parse_abbreviated_step(&mut self) -> bool {
        let m = self.start();
        if self.at(AttributeSelector) {
            let step = self.start();
            self.bump();
            self.expect_node_test();
            step.complete(self, AbbrevForwardStep);
        } else if self.at(ParentSelector) {
            let step = self.start();
            self.bump();
            step.complete(self, AbbrevReverseStep);
        } else {
            self.parse_kind_test();
        }
        self.finish_axis_step(m);
        true
    }

    /// Wraps the step in `AxisStep` only when predicates follow it.
    fn finish_axis_step(&mut self, m: Marker) {
        if self.at(SquareOpen) {
            let list = self.start();
            while self.at(SquareOpen) {
                self.parse_predicate();
            }
            list.complete(self, PredicateList);
            m.complete(self, AxisStep);
        } else {
            m.drop(self);
        }
    }

    /// `"[" Expr "]"`
    pub(super) fn parse_predicate(&mut self) {
        self.assert_current(SquareOpen);
        let m = self.start();
        self.bump();
        self.expect_expr(Expr);
        self.expect(SquareClose, "`]`");
        m.complete(self, Predicate);
    }

    fn expect_node_test(&mut self) {
        if !(self.parse_kind_test() || self.parse_name_test()) {
            self.error_expected("node test");
        }
    }

    /// `EQName | Wildcard`
    pub(super) fn parse_name_test(&mut self) -> bool {
        let m = self.start();
        if self.parse_wildcard() || self.parse_eqname(QName) {
            m.complete(self, NameTest);
            true
        } else {
            m.drop(self);
            false
        }
    }

    /// `"*" | NCName ":*" | "*:" NCName | BracedURILiteral "*"`
    fn parse_wildcard(&mut self) -> bool {
        let m = self.start();
        match self.current() {
            Star => {
                self.bump();
                if self.at_adjacent(QNameSeparator)
                    && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(NCName)
                {
                    self.bump();
                    self.bump();
                }
            }
            NCName if self.raw_nth(1) == QNameSeparator && self.raw_nth(2) == Star => {
                self.bump();
                self.bump();
                self.bump();
            }
            BracedUriLiteralStart if self.at_braced_wildcard() => {
                self.parse_braced_uri_literal();
                self.bump();
            }
            _ => {
                m.drop(self);
                return false;
            }
        }
        m.complete(self, Wildcard);
        true
    }

    fn at_braced_wildcard(&mut self) -> bool {
        let Some(mut i) = self.nth_index(0) else {
            return false;
        };
        i += 1;
        let kind_at = |i: usize| self.tokens.get(i).map(|t| t.kind);
        while kind_at(i).is_some_and(|k| k == StringLiteralContents || CHARACTER_REFERENCES.contains(k)) {
            i += 1;
        }
        kind_at(i) == Some(BracedUriLiteralEnd) && kind_at(i + 1) == Some(Star)
    }
}
