//! XQuery Scripting Extension: blocks, assignment, `exit returning` and `while`.

use tracing::trace;

use crate::parser::Parser;
use crate::parser::cst::SyntaxKind::{self, *};

impl Parser<'_> {
    /// `"block" Block`
    pub(super) fn parse_block_expr(&mut self) -> bool {
        if !(self.at_keyword("block") && self.nth(1) == BlockOpen) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.parse_block_body();
        m.complete(self, BlockExpr);
        true
    }

    /// `"{" BlockDecls Statement* "}"` wrapped in `kind`.
    pub(super) fn parse_block(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(BlockOpen) {
            return false;
        }
        let m = self.start();
        self.parse_block_body();
        m.complete(self, kind);
        true
    }

    fn parse_block_body(&mut self) {
        self.assert_current(BlockOpen);
        self.bump();
        self.parse_block_decls();
        self.parse_statements();
        self.expect(BlockClose, "`}`");
    }

    /// `("declare" "$" VarName TypeDeclaration? (":=" ExprSingle)? ("," ...)* ";")*`
    fn parse_block_decls(&mut self) {
        if !(self.at_keyword("declare") && self.nth(1) == VariableIndicator) {
            return;
        }
        let m = self.start();
        while self.at_keyword("declare") && self.nth(1) == VariableIndicator {
            let d = self.start();
            self.bump_keyword();
            loop {
                self.expect_var_binding();
                self.parse_type_declaration();
                if self.eat(Assign) {
                    self.expect_expr_single();
                }
                if !self.eat(Comma) {
                    break;
                }
            }
            self.expect(Separator, "`;`");
            d.complete(self, BlockVarDecl);
        }
        m.complete(self, BlockDecls);
    }

    /// Statements separated by `;`. The last one may omit its separator.
    fn parse_statements(&mut self) {
        loop {
            if self.at(BlockClose) || self.should_stop() {
                break;
            }
            if self.eat(Separator) {
                continue;
            }
            if self.parse_expr(Expr) {
                if !(self.at(Separator) || self.at(BlockClose)) {
                    self.error_expected("`;` or `}`");
                }
                continue;
            }
            self.recover_token();
        }
    }

    /// `"$" VarName ":=" ExprSingle`
    pub(super) fn parse_assignment_expr(&mut self) -> bool {
        if !self.at(VariableIndicator) {
            return false;
        }
        let assigns = self
            .eqname_end(1)
            .is_some_and(|end| self.nth(end) == Assign);
        if !assigns {
            return false;
        }
        let m = self.start();
        self.bump();
        self.parse_eqname(VarName);
        self.bump();
        self.expect_expr_single();
        m.complete(self, AssignmentExpr);
        true
    }

    /// `"exit" "returning" ExprSingle`
    pub(super) fn parse_exit_expr(&mut self) -> bool {
        if !(self.at_keyword("exit") && self.nth_at_keyword(1, "returning")) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.bump_keyword();
        self.expect_expr_single();
        m.complete(self, ExitExpr);
        true
    }

    /// `"while" "(" Expr ")" Block`
    ///
    /// `while(...)` without a following block is a function call, so the
    /// condition is parsed speculatively.
    pub(super) fn parse_while_expr(&mut self) -> bool {
        if !(self.at_keyword("while") && self.nth(1) == ParenOpen) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.parse_parenthesized_condition();
        if !self.at(BlockOpen) {
            trace!(pos = self.pos, "`while` without block, reparsing as function call");
            m.rollback(self);
            return false;
        }
        let b = self.start();
        self.parse_block_body();
        b.complete(self, BlockExpr);
        m.complete(self, WhileExpr);
        true
    }
}
