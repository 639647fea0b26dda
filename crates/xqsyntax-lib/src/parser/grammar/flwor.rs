//! FLWOR expressions: for, let, window, where, group by, order by, count, return.

use tracing::trace;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind::*;
use crate::parser::cst::token_sets::NUMERIC_LITERALS;

impl Parser<'_> {
    pub(super) fn parse_flwor_expr(&mut self) -> bool {
        if self.at_return_without_flwor() {
            trace!(pos = self.pos, "return without FLWOR");
            let m = self.start();
            self.error(DiagnosticKind::ReturnWithoutFlwor, None);
            self.parse_return_clause();
            m.complete(self, FlworExpr);
            return true;
        }
        if !self.at_initial_clause() {
            return false;
        }

        let m = self.start();
        while self.parse_flwor_clause() {}
        if self.at_keyword("return") {
            self.parse_return_clause();
        } else {
            self.error_expected("`return`");
        }
        m.complete(self, FlworExpr);
        true
    }

    /// `return` that can only be the start of a return clause, never a name.
    fn at_return_without_flwor(&mut self) -> bool {
        if !self.at_keyword("return") {
            return false;
        }
        let next = self.nth(1);
        next == VariableIndicator
            || next == StringLiteralStart
            || next == NCName
            || next == XmlTagOpen
            || NUMERIC_LITERALS.contains(next)
    }

    fn at_for_clause(&mut self) -> bool {
        self.at_keyword("for")
            && (self.nth(1) == VariableIndicator
                || ((self.nth_at_keyword(1, "tumbling") || self.nth_at_keyword(1, "sliding"))
                    && self.nth_at_keyword(2, "window")))
    }

    fn at_let_clause(&mut self) -> bool {
        self.at_keyword("let")
            && (self.nth(1) == VariableIndicator
                || (self.nth_at_keyword(1, "score") && self.nth(2) == VariableIndicator))
    }

    fn at_initial_clause(&mut self) -> bool {
        self.at_for_clause() || self.at_let_clause()
    }

    fn parse_flwor_clause(&mut self) -> bool {
        if self.at_for_clause() {
            if self.nth(1) == VariableIndicator {
                self.parse_for_clause();
            } else {
                self.parse_window_clause();
            }
            return true;
        }
        if self.at_let_clause() {
            self.parse_let_clause();
            return true;
        }
        if self.at_keyword("where") {
            let m = self.start();
            self.bump_keyword();
            self.expect_expr_single();
            m.complete(self, WhereClause);
            return true;
        }
        if self.at_keyword("group") && self.nth_at_keyword(1, "by") {
            self.parse_group_by_clause();
            return true;
        }
        if (self.at_keyword("order") && self.nth_at_keyword(1, "by"))
            || (self.at_keyword("stable") && self.nth_at_keyword(1, "order"))
        {
            self.parse_order_by_clause();
            return true;
        }
        if self.at_keyword("count") && self.nth(1) == VariableIndicator {
            let m = self.start();
            self.bump_keyword();
            self.expect_var_binding();
            m.complete(self, CountClause);
            return true;
        }
        false
    }

    /// `"for" ForBinding ("," ForBinding)*`
    fn parse_for_clause(&mut self) {
        let m = self.start();
        self.bump_keyword();
        loop {
            self.parse_for_binding();
            if !self.eat(Comma) {
                break;
            }
        }
        m.complete(self, ForClause);
    }

    /// `"$" VarName TypeDeclaration? AllowingEmpty? PositionalVar? FTScoreVar? "in" ExprSingle`
    fn parse_for_binding(&mut self) {
        let m = self.start();
        self.expect_var_binding();
        self.parse_type_declaration();
        if self.at_keyword("allowing") {
            let a = self.start();
            self.bump_keyword();
            self.expect_keyword("empty");
            a.complete(self, AllowingEmpty);
        }
        self.parse_positional_var();
        self.parse_ft_score_var();
        self.expect_keyword("in");
        self.expect_expr_single();
        m.complete(self, ForBinding);
    }

    /// `"at" "$" VarName`
    fn parse_positional_var(&mut self) -> bool {
        if !(self.at_keyword("at") && self.nth(1) == VariableIndicator) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.expect_var_binding();
        m.complete(self, PositionalVar);
        true
    }

    /// `"score" "$" VarName`
    fn parse_ft_score_var(&mut self) -> bool {
        if !(self.at_keyword("score") && self.nth(1) == VariableIndicator) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.expect_var_binding();
        m.complete(self, FtScoreVar);
        true
    }

    /// `"let" LetBinding ("," LetBinding)*`
    fn parse_let_clause(&mut self) {
        let m = self.start();
        self.bump_keyword();
        loop {
            let b = self.start();
            if !self.parse_ft_score_var() {
                self.expect_var_binding();
                self.parse_type_declaration();
            }
            self.expect(Assign, "`:=`");
            self.expect_expr_single();
            b.complete(self, LetBinding);
            if !self.eat(Comma) {
                break;
            }
        }
        m.complete(self, LetClause);
    }

    /// `"for" ("tumbling" | "sliding") "window" "$" VarName TypeDeclaration? "in" ExprSingle
    ///  WindowStartCondition WindowEndCondition?`
    fn parse_window_clause(&mut self) {
        let m = self.start();
        self.bump_keyword();
        let sliding = self.at_keyword("sliding");
        let w = self.start();
        self.bump_keyword();
        self.bump_keyword();
        self.expect_var_binding();
        self.parse_type_declaration();
        self.expect_keyword("in");
        self.expect_expr_single();

        if self.at_keyword("start") {
            let s = self.start();
            self.bump_keyword();
            self.parse_window_vars();
            self.expect_keyword("when");
            self.expect_expr_single();
            s.complete(self, WindowStartCondition);
        } else {
            self.error_expected("`start`");
        }

        if self.at_keyword("end") || (self.at_keyword("only") && self.nth_at_keyword(1, "end")) {
            let e = self.start();
            self.eat_keyword("only");
            self.bump_keyword();
            self.parse_window_vars();
            self.expect_keyword("when");
            self.expect_expr_single();
            e.complete(self, WindowEndCondition);
        } else if sliding {
            self.error_expected("`end`");
        }

        w.complete(
            self,
            if sliding {
                SlidingWindowClause
            } else {
                TumblingWindowClause
            },
        );
        m.complete(self, WindowClause);
    }

    /// `("$" CurrentItem)? PositionalVar? ("previous" "$" PreviousItem)? ("next" "$" NextItem)?`
    fn parse_window_vars(&mut self) {
        let m = self.start();
        if self.at(VariableIndicator) {
            self.expect_var_binding();
        }
        self.parse_positional_var();
        for keyword in ["previous", "next"] {
            if self.at_keyword(keyword) && self.nth(1) == VariableIndicator {
                self.bump_keyword();
                self.expect_var_binding();
            }
        }
        if m.is_empty(self) {
            m.drop(self);
        } else {
            m.complete(self, WindowVars);
        }
    }

    /// `"group" "by" GroupingSpec ("," GroupingSpec)*`
    fn parse_group_by_clause(&mut self) {
        let m = self.start();
        self.bump_keyword();
        self.bump_keyword();
        loop {
            let s = self.start();
            self.expect_var_binding();
            let typed = self.parse_type_declaration();
            if self.eat(Assign) {
                self.expect_expr_single();
            } else if typed {
                self.error_expected("`:=`");
            }
            if self.eat_keyword("collation") {
                self.expect_uri_literal();
            }
            s.complete(self, GroupingSpec);
            if !self.eat(Comma) {
                break;
            }
        }
        m.complete(self, GroupByClause);
    }

    /// `"stable"? "order" "by" OrderSpec ("," OrderSpec)*`
    fn parse_order_by_clause(&mut self) {
        let m = self.start();
        self.eat_keyword("stable");
        self.expect_keyword("order");
        self.expect_keyword("by");
        loop {
            let s = self.start();
            self.expect_expr_single();
            self.parse_order_modifier();
            s.complete(self, OrderSpec);
            if !self.eat(Comma) {
                break;
            }
        }
        m.complete(self, OrderByClause);
    }

    /// `("ascending" | "descending")? ("empty" ("greatest" | "least"))? ("collation" URILiteral)?`
    fn parse_order_modifier(&mut self) {
        let m = self.start();
        if self.at_any_keyword(&["ascending", "descending"]) {
            self.bump_keyword();
        }
        if self.at_keyword("empty")
            && (self.nth_at_keyword(1, "greatest") || self.nth_at_keyword(1, "least"))
        {
            self.bump_keyword();
            self.bump_keyword();
        }
        if self.eat_keyword("collation") {
            self.expect_uri_literal();
        }
        if m.is_empty(self) {
            m.drop(self);
        } else {
            m.complete(self, OrderModifier);
        }
    }

    /// `"return" ExprSingle`
    fn parse_return_clause(&mut self) {
        let m = self.start();
        self.bump_keyword();
        self.expect_expr_single();
        m.complete(self, ReturnClause);
    }
}
