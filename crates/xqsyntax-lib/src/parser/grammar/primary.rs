//! Postfix and primary expressions.

use crate::parser::Parser;
use crate::parser::cst::SyntaxKind::{self, *};

use super::RESERVED_FUNCTION_NAMES;

impl Parser<'_> {
    /// `PrimaryExpr (Predicate | ArgumentList)*`
    pub(super) fn parse_postfix_expr(&mut self) -> bool {
        let m = self.start();
        if !self.parse_primary_expr() {
            m.drop(self);
            return false;
        }
        let mut postfix = false;
        loop {
            if self.at(SquareOpen) {
                self.parse_predicate();
            } else if self.at(ParenOpen) {
                self.parse_argument_list();
            } else {
                break;
            }
            postfix = true;
        }
        if postfix {
            m.complete(self, PostfixExpr);
        } else {
            m.drop(self);
        }
        true
    }

    fn parse_primary_expr(&mut self) -> bool {
        self.parse_literal()
            || self.parse_var_ref()
            || self.parse_parenthesized_expr()
            || self.parse_context_item_expr()
            || self.parse_direct_constructor()
            || self.parse_computed_constructor()
            || self.parse_ordered_expr()
            || self.parse_inline_function_expr()
            || self.parse_function_call()
            || self.parse_named_function_ref()
    }

    /// `"(" Expr? ")"`
    fn parse_parenthesized_expr(&mut self) -> bool {
        if !self.at(ParenOpen) {
            return false;
        }
        let m = self.start();
        self.bump();
        self.parse_expr(Expr);
        self.expect(ParenClose, "`)`");
        m.complete(self, ParenthesizedExpr);
        true
    }

    fn parse_context_item_expr(&mut self) -> bool {
        if !self.at(Dot) {
            return false;
        }
        let m = self.start();
        self.bump();
        m.complete(self, ContextItemExpr);
        true
    }

    /// `("ordered" | "unordered") "{" Expr "}"`
    fn parse_ordered_expr(&mut self) -> bool {
        let kind = if self.at_keyword("ordered") {
            OrderedExpr
        } else if self.at_keyword("unordered") {
            UnorderedExpr
        } else {
            return false;
        };
        if self.nth(1) != BlockOpen {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.parse_enclosed_expr();
        m.complete(self, kind);
        true
    }

    /// Whether an EQName at the cursor is followed by `next` and is usable
    /// as a function name.
    fn at_function_name_followed_by(&mut self, next: SyntaxKind) -> bool {
        let Some(end) = self.eqname_end(0) else {
            return false;
        };
        if self.nth(end) != next {
            return false;
        }
        !(self.at_unprefixed_name() && self.at_any_keyword(RESERVED_FUNCTION_NAMES))
    }

    /// `EQName ArgumentList`
    fn parse_function_call(&mut self) -> bool {
        if !self.at_function_name_followed_by(ParenOpen) {
            return false;
        }
        let m = self.start();
        self.parse_eqname(QName);
        self.parse_argument_list();
        m.complete(self, FunctionCall);
        true
    }

    /// `"(" (Argument ("," Argument)*)? ")"`, where an argument is an
    /// `ExprSingle` or the placeholder `?`.
    fn parse_argument_list(&mut self) {
        self.assert_current(ParenOpen);
        let m = self.start();
        self.bump();
        if !self.at(ParenClose) {
            loop {
                if self.at(QuestionMark) {
                    let p = self.start();
                    self.bump();
                    p.complete(self, ArgumentPlaceholder);
                } else {
                    self.expect_expr_single();
                }
                if !self.eat(Comma) {
                    break;
                }
            }
        }
        self.expect(ParenClose, "`)`");
        m.complete(self, ArgumentList);
    }

    /// `EQName "#" IntegerLiteral`
    fn parse_named_function_ref(&mut self) -> bool {
        if !self.at_function_name_followed_by(FunctionRefHash) {
            return false;
        }
        let m = self.start();
        self.parse_eqname(QName);
        self.bump();
        self.expect(IntegerLiteral, "arity");
        m.complete(self, NamedFunctionRef);
        true
    }

    /// `Annotation* "function" "(" ParamList? ")" ("as" SequenceType)? EnclosedExpr`
    fn parse_inline_function_expr(&mut self) -> bool {
        let annotated = self.at(AnnotationIndicator);
        if !annotated && !(self.at_keyword("function") && self.nth(1) == ParenOpen) {
            return false;
        }
        let m = self.start();
        while self.at(AnnotationIndicator) {
            self.parse_annotation();
        }
        self.expect_keyword("function");
        self.parse_param_list();
        self.parse_type_declaration();
        self.expect_enclosed_expr();
        m.complete(self, InlineFunctionExpr);
        true
    }
}
