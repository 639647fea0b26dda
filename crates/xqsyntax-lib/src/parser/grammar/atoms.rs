//! Names, literals and variable references.

use crate::parser::Parser;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::cst::token_sets::{CHARACTER_REFERENCES, NUMERIC_LITERALS};

impl Parser<'_> {
    /// Raw token index just past an EQName starting at raw index `start`.
    /// Prefix, separator and local part must be adjacent.
    fn eqname_end_at(&self, start: usize) -> Option<usize> {
        let kind_at = |i: usize| self.tokens.get(i).map(|t| t.kind);
        match kind_at(start)? {
            NCName => {
                if kind_at(start + 1) == Some(QNameSeparator) && kind_at(start + 2) == Some(NCName) {
                    Some(start + 3)
                } else {
                    Some(start + 1)
                }
            }
            BracedUriLiteralStart => {
                let mut i = start + 1;
                while kind_at(i).is_some_and(|k| k == StringLiteralContents || CHARACTER_REFERENCES.contains(k)) {
                    i += 1;
                }
                (kind_at(i) == Some(BracedUriLiteralEnd) && kind_at(i + 1) == Some(NCName))
                    .then_some(i + 2)
            }
            _ => None,
        }
    }

    /// Lookahead distance of the first non-trivia token after an EQName that
    /// starts `n` tokens ahead.
    pub(super) fn eqname_end(&mut self, n: usize) -> Option<usize> {
        let start = self.nth_index(n)?;
        let end = self.eqname_end_at(start)?;
        let skipped = self.tokens[start..end]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .count();
        Some(n + skipped)
    }

    pub(super) fn at_eqname(&mut self) -> bool {
        self.eqname_end(0).is_some()
    }

    /// Unprefixed name at the cursor, as a keyword would be written.
    pub(super) fn at_unprefixed_name(&mut self) -> bool {
        self.at(NCName) && self.raw_nth(1) != QNameSeparator
    }

    /// `NCName`, `prefix:local` or `Q{uri}local` as a node of `kind`.
    ///
    /// A braced name requested as `QName` becomes a `UriQualifiedName`.
    pub(super) fn parse_eqname(&mut self, kind: SyntaxKind) -> bool {
        match self.current() {
            NCName => {
                let m = self.start();
                let prefixed = self.raw_nth(1) == QNameSeparator && self.raw_nth(2) == NCName;
                self.bump();
                if prefixed {
                    self.bump();
                    self.bump();
                }
                m.complete(self, kind);
                true
            }
            BracedUriLiteralStart => {
                let m = self.start();
                self.parse_braced_uri_literal();
                if self.at_adjacent(NCName) {
                    self.bump();
                } else {
                    self.error_expected("local name");
                }
                let kind = if kind == QName { UriQualifiedName } else { kind };
                m.complete(self, kind);
                true
            }
            _ => false,
        }
    }

    pub(super) fn expect_eqname(&mut self, kind: SyntaxKind, what: &str) {
        if !self.parse_eqname(kind) {
            self.error_expected(what);
        }
    }

    /// `Q{` .. `}`
    pub(super) fn parse_braced_uri_literal(&mut self) {
        self.assert_current(BracedUriLiteralStart);
        let m = self.start();
        self.bump();
        while self.at(StringLiteralContents) || self.at_set(CHARACTER_REFERENCES) {
            self.bump();
        }
        if !self.eat(BracedUriLiteralEnd) && !self.eat(IncompleteMarkup) {
            self.error_expected("`}`");
        }
        m.complete(self, BracedUriLiteral);
    }

    /// Unprefixed `NCName` as a plain token, e.g. a namespace prefix.
    pub(super) fn expect_ncname(&mut self, what: &str) -> bool {
        if self.at(NCName) {
            self.bump();
            return true;
        }
        self.error_expected(what);
        false
    }

    pub(super) fn at_string_literal(&mut self) -> bool {
        self.at(StringLiteralStart)
    }

    /// Quoted literal as a node of `kind` (`StringLiteral` or `UriLiteral`).
    pub(super) fn parse_string_literal(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(StringLiteralStart) {
            return false;
        }
        let m = self.start();
        self.bump();
        while self.at(StringLiteralContents) || self.at_set(CHARACTER_REFERENCES) {
            self.bump();
        }
        if !self.eat(StringLiteralEnd) && !self.eat(IncompleteStringLiteral) {
            self.error_expected("closing quote");
        }
        m.complete(self, kind);
        true
    }

    pub(super) fn expect_string_literal(&mut self) {
        if !self.parse_string_literal(StringLiteral) {
            self.error_expected("string literal");
        }
    }

    pub(super) fn expect_uri_literal(&mut self) {
        if !self.parse_string_literal(UriLiteral) {
            self.error_expected("URI literal");
        }
    }

    /// Numeric literal, with a dangling exponent attached when present.
    pub(super) fn parse_numeric_literal(&mut self) -> bool {
        if !self.at_set(NUMERIC_LITERALS) {
            return false;
        }
        self.bump();
        if self.at_adjacent(PartialDoubleLiteralExponent) {
            self.bump();
        }
        true
    }

    /// String or numeric literal.
    pub(super) fn parse_literal(&mut self) -> bool {
        self.parse_numeric_literal() || self.parse_string_literal(StringLiteral)
    }

    /// `$` VarName
    pub(super) fn parse_var_ref(&mut self) -> bool {
        if !self.at(VariableIndicator) {
            return false;
        }
        let m = self.start();
        self.bump();
        self.expect_eqname(VarName, "variable name");
        m.complete(self, VarRef);
        true
    }

    /// `$` VarName inside a binding; no wrapper node.
    pub(super) fn expect_var_binding(&mut self) {
        if self.expect(VariableIndicator, "`$`") {
            self.expect_eqname(VarName, "variable name");
        } else {
            self.parse_eqname(VarName);
        }
    }

    /// `{` Expr? `}`
    pub(super) fn parse_enclosed_expr(&mut self) -> bool {
        if !self.at(BlockOpen) {
            return false;
        }
        let m = self.start();
        self.bump();
        self.parse_expr(Expr);
        self.expect(BlockClose, "`}`");
        m.complete(self, EnclosedExpr);
        true
    }

    pub(super) fn expect_enclosed_expr(&mut self) {
        if !self.parse_enclosed_expr() {
            self.error_expected("`{`");
        }
    }

    /// `as` SequenceType
    pub(super) fn parse_type_declaration(&mut self) -> bool {
        if !self.at_keyword("as") {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.expect_sequence_type();
        m.complete(self, TypeDeclaration);
        true
    }
}
