//! Expression entry points and the operator precedence ladder.
//!
//! Each binary level parses its operand, then loops on its operator set.
//! A node is only created when at least one operator was seen, so `1` is a
//! bare literal and `1 + 2 + 3` is one flat `AdditiveExpr`.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::cst::token_sets::{ADDITIVE_OPERATORS, COMPARISON_OPERATORS};

use super::VALUE_COMPARISONS;

impl Parser<'_> {
    /// `ExprSingle ("," ExprSingle)*`, wrapped in `kind`. With `kind == Expr`
    /// a lone operand is left unwrapped.
    pub(super) fn parse_expr(&mut self, kind: SyntaxKind) -> bool {
        let m = self.start();
        if !self.parse_expr_single() {
            m.drop(self);
            return false;
        }
        let mut sequence = false;
        while self.eat(Comma) {
            sequence = true;
            self.expect_expr_single();
        }
        if kind == Expr && !sequence {
            m.drop(self);
        } else {
            m.complete(self, kind);
        }
        true
    }

    pub(super) fn expect_expr(&mut self, kind: SyntaxKind) {
        if !self.parse_expr(kind) {
            self.error_expected("expression");
        }
    }

    pub(super) fn parse_expr_single(&mut self) -> bool {
        if !self.enter_recursion() {
            return true;
        }
        let parsed = self.parse_flwor_expr()
            || self.parse_quantified_expr()
            || self.parse_switch_expr()
            || self.parse_typeswitch_expr()
            || self.parse_if_expr()
            || self.parse_try_catch_expr()
            || self.parse_insert_expr()
            || self.parse_delete_expr()
            || self.parse_rename_expr()
            || self.parse_replace_expr()
            || self.parse_transform_expr()
            || self.parse_block_expr()
            || self.parse_assignment_expr()
            || self.parse_exit_expr()
            || self.parse_while_expr()
            || self.parse_or_expr();
        self.exit_recursion();
        parsed
    }

    pub(super) fn expect_expr_single(&mut self) {
        if !self.parse_expr_single() {
            self.error_expected("expression");
        }
    }

    /// `(` Expr `)` as used by `if`, `switch`, `typeswitch` and `while`.
    pub(super) fn parse_parenthesized_condition(&mut self) {
        self.expect(ParenOpen, "`(`");
        self.expect_expr(Expr);
        self.expect(ParenClose, "`)`");
    }

    /// `operand (op operand)*`, or at most one operator when not `repeat`.
    fn parse_binary(
        &mut self,
        kind: SyntaxKind,
        operand: fn(&mut Self) -> bool,
        operand_name: &str,
        at_operator: fn(&mut Self) -> bool,
        repeat: bool,
    ) -> bool {
        let m = self.start();
        if !operand(self) {
            m.drop(self);
            return false;
        }
        let mut operators = 0;
        while at_operator(self) {
            self.bump_operator();
            operators += 1;
            if !operand(self) {
                self.error_expected(operand_name);
            }
            if !repeat {
                break;
            }
        }
        if operators == 0 {
            m.drop(self);
        } else {
            m.complete(self, kind);
        }
        true
    }

    fn bump_operator(&mut self) {
        if self.at(NCName) {
            self.bump_keyword();
        } else {
            self.bump();
        }
    }

    pub(super) fn parse_or_expr(&mut self) -> bool {
        self.parse_binary(
            OrExpr,
            Self::parse_and_expr,
            "AndExpr",
            |p| p.at_keyword("or"),
            true,
        )
    }

    fn parse_and_expr(&mut self) -> bool {
        self.parse_binary(
            AndExpr,
            Self::parse_comparison_expr,
            "ComparisonExpr",
            |p| p.at_keyword("and"),
            true,
        )
    }

    fn parse_comparison_expr(&mut self) -> bool {
        self.parse_binary(
            ComparisonExpr,
            Self::parse_ft_contains_expr,
            "FTContainsExpr",
            |p| p.at_set(COMPARISON_OPERATORS) || p.at_any_keyword(VALUE_COMPARISONS),
            false,
        )
    }

    /// `StringConcatExpr ("contains" "text" FTSelection FTIgnoreOption?)?`
    fn parse_ft_contains_expr(&mut self) -> bool {
        let m = self.start();
        if !self.parse_string_concat_expr() {
            m.drop(self);
            return false;
        }
        if self.at_keyword("contains") && self.nth_at_keyword(1, "text") {
            self.bump_keyword();
            self.bump_keyword();
            self.expect_ft_selection();
            self.parse_ft_ignore_option();
            m.complete(self, FtContainsExpr);
        } else {
            m.drop(self);
        }
        true
    }

    fn parse_string_concat_expr(&mut self) -> bool {
        self.parse_binary(
            StringConcatExpr,
            Self::parse_range_expr,
            "RangeExpr",
            |p| p.at(Concatenation),
            true,
        )
    }

    fn parse_range_expr(&mut self) -> bool {
        self.parse_binary(
            RangeExpr,
            Self::parse_additive_expr,
            "AdditiveExpr",
            |p| p.at_keyword("to"),
            false,
        )
    }

    pub(super) fn parse_additive_expr(&mut self) -> bool {
        self.parse_binary(
            AdditiveExpr,
            Self::parse_multiplicative_expr,
            "MultiplicativeExpr",
            |p| p.at_set(ADDITIVE_OPERATORS),
            true,
        )
    }

    fn parse_multiplicative_expr(&mut self) -> bool {
        self.parse_binary(
            MultiplicativeExpr,
            Self::parse_union_expr,
            "UnionExpr",
            |p| p.at(Star) || p.at_any_keyword(&["div", "idiv", "mod"]),
            true,
        )
    }

    pub(super) fn parse_union_expr(&mut self) -> bool {
        self.parse_binary(
            UnionExpr,
            Self::parse_intersect_except_expr,
            "IntersectExceptExpr",
            |p| p.at(Union) || p.at_keyword("union"),
            true,
        )
    }

    fn parse_intersect_except_expr(&mut self) -> bool {
        self.parse_binary(
            IntersectExceptExpr,
            Self::parse_instanceof_expr,
            "InstanceofExpr",
            |p| p.at_any_keyword(&["intersect", "except"]),
            true,
        )
    }

    /// `TreatExpr ("instance" "of" SequenceType)?`
    ///
    /// A missing `of` is reported and the type is still parsed.
    fn parse_instanceof_expr(&mut self) -> bool {
        self.parse_type_operator(InstanceofExpr, Self::parse_treat_expr, "instance", "of", true)
    }

    fn parse_treat_expr(&mut self) -> bool {
        self.parse_type_operator(TreatExpr, Self::parse_castable_expr, "treat", "as", true)
    }

    fn parse_castable_expr(&mut self) -> bool {
        self.parse_type_operator(CastableExpr, Self::parse_cast_expr, "castable", "as", false)
    }

    fn parse_cast_expr(&mut self) -> bool {
        self.parse_type_operator(CastExpr, Self::parse_unary_expr, "cast", "as", false)
    }

    fn parse_type_operator(
        &mut self,
        kind: SyntaxKind,
        operand: fn(&mut Self) -> bool,
        keyword: &str,
        second: &str,
        sequence_type: bool,
    ) -> bool {
        let m = self.start();
        if !operand(self) {
            m.drop(self);
            return false;
        }
        if !self.at_keyword(keyword) {
            m.drop(self);
            return true;
        }
        self.bump_keyword();
        self.expect_keyword(second);
        if sequence_type {
            self.expect_sequence_type();
        } else {
            self.expect_single_type();
        }
        m.complete(self, kind);
        true
    }

    /// `("-" | "+")* ValueExpr`
    fn parse_unary_expr(&mut self) -> bool {
        if !self.at_set(ADDITIVE_OPERATORS) {
            return self.parse_value_expr();
        }
        let m = self.start();
        while self.at_set(ADDITIVE_OPERATORS) {
            self.bump();
        }
        if !self.parse_value_expr() {
            self.error_expected("ValueExpr");
        }
        m.complete(self, UnaryExpr);
        true
    }

    /// `ValidateExpr | ExtensionExpr | SimpleMapExpr`
    fn parse_value_expr(&mut self) -> bool {
        self.parse_validate_expr() || self.parse_extension_expr() || self.parse_simple_map_expr()
    }

    fn parse_simple_map_expr(&mut self) -> bool {
        self.parse_binary(
            SimpleMapExpr,
            Self::parse_path_expr,
            "PathExpr",
            |p| p.at(Bang),
            true,
        )
    }

    /// `"validate" (("lax" | "strict") | ("type" TypeName))? "{" Expr "}"`
    fn parse_validate_expr(&mut self) -> bool {
        if !self.at_keyword("validate") {
            return false;
        }
        let mode = self.nth_at_keyword(1, "lax") || self.nth_at_keyword(1, "strict");
        let typed = self.nth_at_keyword(1, "type") && self.eqname_end(2).is_some();
        let at_validate = self.nth(1) == BlockOpen || (mode && self.nth(2) == BlockOpen) || typed;
        if !at_validate {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        if mode {
            self.bump_keyword();
        } else if typed {
            self.bump_keyword();
            self.parse_eqname(TypeName);
        }
        self.expect_enclosed_expr();
        m.complete(self, ValidateExpr);
        true
    }

    /// `Pragma+ "{" Expr? "}"`
    fn parse_extension_expr(&mut self) -> bool {
        if !self.at(PragmaBegin) {
            return false;
        }
        let m = self.start();
        while self.at(PragmaBegin) {
            self.parse_pragma();
        }
        self.expect_enclosed_expr();
        m.complete(self, ExtensionExpr);
        true
    }

    /// `(#` EQName PragmaContents? `#)`
    pub(super) fn parse_pragma(&mut self) {
        self.assert_current(PragmaBegin);
        let m = self.start();
        self.bump();
        self.expect_eqname(QName, "pragma name");
        while self.at(PragmaContents) || self.at(BadCharacter) {
            self.bump();
        }
        if !self.eat(PragmaEnd) && !self.eat(IncompleteMarkup) {
            self.error_expected("`#)`");
        }
        m.complete(self, Pragma);
    }

    /// `"if" "(" Expr ")" "then" ExprSingle "else" ExprSingle`
    fn parse_if_expr(&mut self) -> bool {
        if !(self.at_keyword("if") && self.nth(1) == ParenOpen) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.parse_parenthesized_condition();
        self.expect_keyword("then");
        self.expect_expr_single();
        self.expect_keyword("else");
        self.expect_expr_single();
        m.complete(self, IfExpr);
        true
    }

    /// `("some" | "every") "$" VarName TypeDeclaration? "in" ExprSingle ("," ...)* "satisfies" ExprSingle`
    fn parse_quantified_expr(&mut self) -> bool {
        if !(self.at_any_keyword(&["some", "every"]) && self.nth(1) == VariableIndicator) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        loop {
            let b = self.start();
            self.expect_var_binding();
            self.parse_type_declaration();
            self.expect_keyword("in");
            self.expect_expr_single();
            b.complete(self, QuantifiedBinding);
            if !self.eat(Comma) {
                break;
            }
        }
        self.expect_keyword("satisfies");
        self.expect_expr_single();
        m.complete(self, QuantifiedExpr);
        true
    }

    /// `"switch" "(" Expr ")" SwitchCaseClause+ "default" "return" ExprSingle`
    fn parse_switch_expr(&mut self) -> bool {
        if !(self.at_keyword("switch") && self.nth(1) == ParenOpen) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.parse_parenthesized_condition();

        let mut cases = 0;
        while self.at_keyword("case") {
            let c = self.start();
            while self.eat_keyword("case") {
                self.expect_expr_single();
            }
            self.expect_keyword("return");
            self.expect_expr_single();
            c.complete(self, SwitchCaseClause);
            cases += 1;
        }
        if cases == 0 {
            self.error_expected("`case`");
        }

        if self.at_keyword("default") {
            let d = self.start();
            self.bump_keyword();
            self.expect_keyword("return");
            self.expect_expr_single();
            d.complete(self, SwitchDefaultClause);
        } else {
            self.error_expected("`default`");
        }
        m.complete(self, SwitchExpr);
        true
    }

    /// `"typeswitch" "(" Expr ")" CaseClause+ "default" ("$" VarName)? "return" ExprSingle`
    fn parse_typeswitch_expr(&mut self) -> bool {
        if !(self.at_keyword("typeswitch") && self.nth(1) == ParenOpen) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.parse_parenthesized_condition();

        let mut cases = 0;
        while self.at_keyword("case") {
            let c = self.start();
            self.bump_keyword();
            if self.at(VariableIndicator) {
                self.expect_var_binding();
                self.expect_keyword("as");
            }
            self.parse_sequence_type_union();
            self.expect_keyword("return");
            self.expect_expr_single();
            c.complete(self, CaseClause);
            cases += 1;
        }
        if cases == 0 {
            self.error_expected("`case`");
        }

        if self.at_keyword("default") {
            let d = self.start();
            self.bump_keyword();
            if self.at(VariableIndicator) {
                self.expect_var_binding();
            }
            self.expect_keyword("return");
            self.expect_expr_single();
            d.complete(self, DefaultCaseClause);
        } else {
            self.error_expected("`default`");
        }
        m.complete(self, TypeswitchExpr);
        true
    }

    /// `SequenceType ("|" SequenceType)*`
    fn parse_sequence_type_union(&mut self) {
        let m = self.start();
        self.expect_sequence_type();
        let mut union = false;
        while self.eat(Union) {
            union = true;
            self.expect_sequence_type();
        }
        if union {
            m.complete(self, SequenceTypeUnion);
        } else {
            m.drop(self);
        }
    }

    /// `TryClause CatchClause+`
    ///
    /// Catch clauses come as `catch NameTest ("|" NameTest)* {..}` or, in
    /// MarkLogic's dialect, `catch ($var) {..}`. Only the first parenthesized
    /// clause can ever run; later ones are flagged but still parsed.
    fn parse_try_catch_expr(&mut self) -> bool {
        if !(self.at_keyword("try") && self.nth(1) == BlockOpen) {
            return false;
        }
        let m = self.start();
        let t = self.start();
        self.bump_keyword();
        self.parse_enclosed_expr();
        t.complete(self, TryClause);

        let mut clauses = 0;
        let mut seen_parenthesized = false;
        while self.at_keyword("catch") {
            let parenthesized = self.nth(1) == ParenOpen;
            if parenthesized && seen_parenthesized {
                self.error(DiagnosticKind::MultipleParenthesizedCatch, None);
            }
            seen_parenthesized |= parenthesized;

            let c = self.start();
            self.bump_keyword();
            if parenthesized {
                self.bump();
                self.expect_var_binding();
                self.expect(ParenClose, "`)`");
            } else {
                self.parse_catch_error_list();
            }
            self.expect_enclosed_expr();
            c.complete(self, CatchClause);
            clauses += 1;
        }
        if clauses == 0 {
            self.error_expected("`catch`");
        }
        m.complete(self, TryCatchExpr);
        true
    }

    /// `NameTest ("|" NameTest)*`
    fn parse_catch_error_list(&mut self) {
        let m = self.start();
        if !self.parse_name_test() {
            self.error_expected("error name");
        }
        while self.eat(Union) {
            if !self.parse_name_test() {
                self.error_expected("error name");
            }
        }
        m.complete(self, CatchErrorList);
    }
}
