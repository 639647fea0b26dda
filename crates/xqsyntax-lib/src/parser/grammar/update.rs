//! XQuery Update Facility expressions.

use crate::parser::Parser;
use crate::parser::cst::SyntaxKind::{self, *};

impl Parser<'_> {
    fn at_node_keyword(&mut self, n: usize) -> bool {
        self.nth_at_keyword(n, "node") || self.nth_at_keyword(n, "nodes")
    }

    /// `ExprSingle` wrapped in `kind`.
    fn parse_wrapped_expr_single(&mut self, kind: SyntaxKind) {
        let m = self.start();
        self.expect_expr_single();
        m.complete(self, kind);
    }

    /// `"insert" ("node" | "nodes") SourceExpr InsertExprTargetChoice TargetExpr`
    pub(super) fn parse_insert_expr(&mut self) -> bool {
        if !(self.at_keyword("insert") && self.at_node_keyword(1)) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.bump_keyword();
        self.parse_wrapped_expr_single(SourceExpr);

        if self.eat_keyword("as") {
            if self.at_any_keyword(&["first", "last"]) {
                self.bump_keyword();
            } else {
                self.error_expected("`first` or `last`");
            }
            self.expect_keyword("into");
        } else if self.at_any_keyword(&["into", "after", "before"]) {
            self.bump_keyword();
        } else {
            self.error_expected("`into`, `after` or `before`");
        }

        self.parse_wrapped_expr_single(TargetExpr);
        m.complete(self, InsertExpr);
        true
    }

    /// `"delete" ("node" | "nodes") TargetExpr`
    pub(super) fn parse_delete_expr(&mut self) -> bool {
        if !(self.at_keyword("delete") && self.at_node_keyword(1)) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.bump_keyword();
        self.parse_wrapped_expr_single(TargetExpr);
        m.complete(self, DeleteExpr);
        true
    }

    /// `"replace" ("value" "of")? "node" TargetExpr "with" ExprSingle`
    pub(super) fn parse_replace_expr(&mut self) -> bool {
        if !self.at_keyword("replace") {
            return false;
        }
        let value_of = self.nth_at_keyword(1, "value") && self.nth_at_keyword(2, "of");
        if !(value_of || self.nth_at_keyword(1, "node")) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        if value_of {
            self.bump_keyword();
            self.bump_keyword();
        }
        self.expect_keyword("node");
        self.parse_wrapped_expr_single(TargetExpr);
        self.expect_keyword("with");
        self.expect_expr_single();
        m.complete(self, ReplaceExpr);
        true
    }

    /// `"rename" "node" TargetExpr "as" NewNameExpr`
    pub(super) fn parse_rename_expr(&mut self) -> bool {
        if !(self.at_keyword("rename") && self.nth_at_keyword(1, "node")) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.bump_keyword();
        self.parse_wrapped_expr_single(TargetExpr);
        self.expect_keyword("as");
        self.parse_wrapped_expr_single(NewNameExpr);
        m.complete(self, RenameExpr);
        true
    }

    /// `"copy" "$" VarName ":=" ExprSingle ("," ...)* "modify" ExprSingle "return" ExprSingle`
    pub(super) fn parse_transform_expr(&mut self) -> bool {
        if !(self.at_keyword("copy") && self.nth(1) == VariableIndicator) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        loop {
            let b = self.start();
            self.expect_var_binding();
            self.expect(Assign, "`:=`");
            self.expect_expr_single();
            b.complete(self, CopyBinding);
            if !self.eat(Comma) {
                break;
            }
        }
        self.expect_keyword("modify");
        self.expect_expr_single();
        self.expect_keyword("return");
        self.expect_expr_single();
        m.complete(self, TransformExpr);
        true
    }
}
