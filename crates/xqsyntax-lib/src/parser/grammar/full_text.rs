//! XQuery and XPath Full Text selections and match options.
//!
//! `FtSelection` is always produced. The boolean levels (`ftor`, `ftand`,
//! `not in`) follow the operator ladder: a node only appears when its
//! operator does.

use crate::parser::Parser;
use crate::parser::cst::SyntaxKind::{self, *};

impl Parser<'_> {
    pub(super) fn expect_ft_selection(&mut self) {
        if !self.parse_ft_selection() {
            self.error_expected("full-text selection");
        }
    }

    /// `FTOr FTPosFilter*`
    fn parse_ft_selection(&mut self) -> bool {
        if !self.enter_recursion() {
            return true;
        }
        let m = self.start();
        if !self.parse_ft_or() {
            m.drop(self);
            self.exit_recursion();
            return false;
        }
        while self.parse_ft_pos_filter() {}
        m.complete(self, FtSelection);
        self.exit_recursion();
        true
    }

    /// `FTAnd ("ftor" FTAnd)*`, and likewise for `ftand` and `not in`.
    fn parse_ft_boolean(
        &mut self,
        kind: SyntaxKind,
        operand: fn(&mut Self) -> bool,
        operator: &[&str],
    ) -> bool {
        let m = self.start();
        if !operand(self) {
            m.drop(self);
            return false;
        }
        let mut operators = 0;
        while self.at_ft_operator(operator) {
            for _ in operator {
                self.bump_keyword();
            }
            operators += 1;
            if !operand(self) {
                self.error_expected("full-text operand");
            }
        }
        if operators == 0 {
            m.drop(self);
        } else {
            m.complete(self, kind);
        }
        true
    }

    fn at_ft_operator(&mut self, operator: &[&str]) -> bool {
        operator
            .iter()
            .enumerate()
            .all(|(n, keyword)| self.nth_at_keyword(n, keyword))
    }

    fn parse_ft_or(&mut self) -> bool {
        self.parse_ft_boolean(FtOr, Self::parse_ft_and, &["ftor"])
    }

    fn parse_ft_and(&mut self) -> bool {
        self.parse_ft_boolean(FtAnd, Self::parse_ft_mild_not, &["ftand"])
    }

    fn parse_ft_mild_not(&mut self) -> bool {
        self.parse_ft_boolean(FtMildNot, Self::parse_ft_unary_not, &["not", "in"])
    }

    /// `"ftnot"? FTPrimaryWithOptions`
    fn parse_ft_unary_not(&mut self) -> bool {
        if !self.at_keyword("ftnot") {
            return self.parse_ft_primary_with_options();
        }
        let m = self.start();
        self.bump_keyword();
        if !self.parse_ft_primary_with_options() {
            self.error_expected("full-text operand");
        }
        m.complete(self, FtUnaryNot);
        true
    }

    /// `FTPrimary FTMatchOptions? FTWeight?`
    fn parse_ft_primary_with_options(&mut self) -> bool {
        let m = self.start();
        if !self.parse_ft_primary() {
            m.drop(self);
            return false;
        }
        let options = self.parse_ft_match_options();
        let weight = self.parse_ft_weight();
        if options || weight {
            m.complete(self, FtPrimaryWithOptions);
        } else {
            m.drop(self);
        }
        true
    }

    /// `(FTWords FTTimes?) | ("(" FTSelection ")") | FTExtensionSelection`
    fn parse_ft_primary(&mut self) -> bool {
        if self.at(ParenOpen) {
            self.bump();
            self.expect_ft_selection();
            self.expect(ParenClose, "`)`");
            return true;
        }
        if self.at(PragmaBegin) {
            let m = self.start();
            while self.at(PragmaBegin) {
                self.parse_pragma();
            }
            self.expect(BlockOpen, "`{`");
            self.parse_ft_selection();
            self.expect(BlockClose, "`}`");
            m.complete(self, FtExtensionSelection);
            return true;
        }
        if !(self.at_string_literal() || self.at(BlockOpen)) {
            return false;
        }

        let m = self.start();
        if !self.parse_string_literal(StringLiteral) {
            self.parse_enclosed_expr();
        }
        self.parse_ft_anyall_option();
        m.complete(self, FtWords);

        if self.at_keyword("occurs") {
            let t = self.start();
            self.bump_keyword();
            self.expect_ft_range(Self::parse_additive_expr);
            self.expect_keyword("times");
            t.complete(self, FtTimes);
        }
        true
    }

    /// `("any" "word"?) | ("all" "words"?) | "phrase"`
    fn parse_ft_anyall_option(&mut self) {
        let m = self.start();
        if self.eat_keyword("any") {
            self.eat_keyword("word");
        } else if self.eat_keyword("all") {
            self.eat_keyword("words");
        } else if !self.eat_keyword("phrase") {
            m.drop(self);
            return;
        }
        m.complete(self, FtAnyallOption);
    }

    /// `("exactly" N) | ("at" "least" N) | ("at" "most" N) | ("from" N "to" N)`
    fn expect_ft_range(&mut self, bound: fn(&mut Self) -> bool) {
        let m = self.start();
        if self.eat_keyword("exactly") {
            self.expect_range_bound(bound);
        } else if self.at_keyword("at")
            && (self.nth_at_keyword(1, "least") || self.nth_at_keyword(1, "most"))
        {
            self.bump_keyword();
            self.bump_keyword();
            self.expect_range_bound(bound);
        } else if self.eat_keyword("from") {
            self.expect_range_bound(bound);
            self.expect_keyword("to");
            self.expect_range_bound(bound);
        } else {
            m.drop(self);
            self.error_expected("`exactly`, `at least`, `at most` or `from`");
            return;
        }
        m.complete(self, FtRange);
    }

    fn expect_range_bound(&mut self, bound: fn(&mut Self) -> bool) {
        if !bound(self) {
            self.error_expected("range bound");
        }
    }

    fn parse_integer_bound(&mut self) -> bool {
        self.eat(IntegerLiteral)
    }

    fn parse_ft_pos_filter(&mut self) -> bool {
        if self.at_keyword("ordered") {
            let m = self.start();
            self.bump_keyword();
            m.complete(self, FtOrder);
            return true;
        }
        if self.at_keyword("window") {
            let m = self.start();
            self.bump_keyword();
            if !self.parse_additive_expr() {
                self.error_expected("window size");
            }
            self.expect_ft_unit(&["words", "sentences", "paragraphs"]);
            m.complete(self, FtWindow);
            return true;
        }
        if self.at_keyword("distance") {
            let m = self.start();
            self.bump_keyword();
            self.expect_ft_range(Self::parse_additive_expr);
            self.expect_ft_unit(&["words", "sentences", "paragraphs"]);
            m.complete(self, FtDistance);
            return true;
        }
        if self.at_keyword("same") || self.at_keyword("different") {
            let m = self.start();
            self.bump_keyword();
            self.expect_ft_unit(&["sentence", "paragraph"]);
            m.complete(self, FtScope);
            return true;
        }
        let at_boundary =
            self.at_keyword("at") && (self.nth_at_keyword(1, "start") || self.nth_at_keyword(1, "end"));
        if at_boundary || (self.at_keyword("entire") && self.nth_at_keyword(1, "content")) {
            let m = self.start();
            self.bump_keyword();
            self.bump_keyword();
            m.complete(self, FtContent);
            return true;
        }
        false
    }

    fn expect_ft_unit(&mut self, units: &[&str]) {
        if self.at_any_keyword(units) {
            self.bump_keyword();
        } else {
            self.error_expected("full-text unit");
        }
    }

    /// `"weight" "{" Expr "}"`
    fn parse_ft_weight(&mut self) -> bool {
        if !(self.at_keyword("weight") && self.nth(1) == BlockOpen) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.parse_enclosed_expr();
        m.complete(self, FtWeight);
        true
    }

    /// `("using" FTMatchOption)+`
    pub(super) fn parse_ft_match_options(&mut self) -> bool {
        if !self.at_keyword("using") {
            return false;
        }
        let m = self.start();
        while self.eat_keyword("using") {
            if !self.parse_ft_match_option() {
                self.error_expected("match option");
            }
        }
        m.complete(self, FtMatchOptions);
        true
    }

    fn parse_ft_match_option(&mut self) -> bool {
        let m = self.start();
        let kind = if self.at_keyword("case") {
            self.bump_keyword();
            if self.at_any_keyword(&["insensitive", "sensitive"]) {
                self.bump_keyword();
            } else {
                self.error_expected("`sensitive` or `insensitive`");
            }
            FtCaseOption
        } else if self.at_any_keyword(&["lowercase", "uppercase"]) {
            self.bump_keyword();
            FtCaseOption
        } else if self.at_keyword("diacritics") {
            self.bump_keyword();
            if self.at_any_keyword(&["insensitive", "sensitive"]) {
                self.bump_keyword();
            } else {
                self.error_expected("`sensitive` or `insensitive`");
            }
            FtDiacriticsOption
        } else if self.at_keyword("stemming") || (self.at_keyword("no") && self.nth_at_keyword(1, "stemming")) {
            self.eat_keyword("no");
            self.bump_keyword();
            FtStemOption
        } else if self.at_keyword("language") {
            self.bump_keyword();
            self.expect_string_literal();
            FtLanguageOption
        } else if self.at_keyword("wildcards") || (self.at_keyword("no") && self.nth_at_keyword(1, "wildcards")) {
            self.eat_keyword("no");
            self.bump_keyword();
            FtWildCardOption
        } else if self.at_keyword("thesaurus") || (self.at_keyword("no") && self.nth_at_keyword(1, "thesaurus")) {
            self.parse_ft_thesaurus_option();
            FtThesaurusOption
        } else if self.at_keyword("stop") || (self.at_keyword("no") && self.nth_at_keyword(1, "stop")) {
            self.parse_ft_stop_word_option();
            FtStopWordOption
        } else if self.at_keyword("option") {
            self.bump_keyword();
            self.expect_eqname(QName, "option name");
            self.expect_string_literal();
            FtExtensionOption
        } else {
            m.drop(self);
            return false;
        };
        m.complete(self, kind);
        true
    }

    /// `"thesaurus" (ThesaurusID | "default")`,
    /// `"thesaurus" "(" (ThesaurusID | "default") ("," ThesaurusID)* ")"` or
    /// `"no" "thesaurus"`
    fn parse_ft_thesaurus_option(&mut self) {
        if self.eat_keyword("no") {
            self.bump_keyword();
            return;
        }
        self.bump_keyword();
        if self.eat(ParenOpen) {
            loop {
                if !self.eat_keyword("default") {
                    self.expect_ft_thesaurus_id();
                }
                if !self.eat(Comma) {
                    break;
                }
            }
            self.expect(ParenClose, "`)`");
        } else if !self.eat_keyword("default") {
            self.expect_ft_thesaurus_id();
        }
    }

    /// `"at" URILiteral ("relationship" StringLiteral)? (FTLiteralRange "levels")?`
    fn expect_ft_thesaurus_id(&mut self) {
        if !self.at_keyword("at") {
            self.error_expected("`at`");
            return;
        }
        let m = self.start();
        self.bump_keyword();
        self.expect_uri_literal();
        if self.eat_keyword("relationship") {
            self.expect_string_literal();
        }
        if self.at_any_keyword(&["exactly", "at", "from"]) {
            self.expect_ft_range(Self::parse_integer_bound);
            self.expect_keyword("levels");
        }
        m.complete(self, FtThesaurusId);
    }

    /// `"stop" "words" (StopWords | "default") (("union" | "except") StopWords)*`
    /// or `"no" "stop" "words"`
    fn parse_ft_stop_word_option(&mut self) {
        if self.eat_keyword("no") {
            self.bump_keyword();
            self.expect_keyword("words");
            return;
        }
        self.bump_keyword();
        self.expect_keyword("words");
        if !self.eat_keyword("default") {
            self.expect_ft_stop_words();
        }
        while self.at_any_keyword(&["union", "except"]) {
            self.bump_keyword();
            self.expect_ft_stop_words();
        }
    }

    /// `("at" URILiteral) | ("(" StringLiteral ("," StringLiteral)* ")")`
    fn expect_ft_stop_words(&mut self) {
        if self.eat_keyword("at") {
            self.expect_uri_literal();
        } else if self.eat(ParenOpen) {
            loop {
                self.expect_string_literal();
                if !self.eat(Comma) {
                    break;
                }
            }
            self.expect(ParenClose, "`)`");
        } else {
            self.error_expected("stop words");
        }
    }

    /// `"without" "content" UnionExpr`
    pub(super) fn parse_ft_ignore_option(&mut self) -> bool {
        if !(self.at_keyword("without") && self.nth_at_keyword(1, "content")) {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        self.bump_keyword();
        if !self.parse_union_expr() {
            self.error_expected("UnionExpr");
        }
        m.complete(self, FtIgnoreOption);
        true
    }
}
