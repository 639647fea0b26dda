//! Test-only dump helpers for parse inspection.

use xqsyntax_core::SourceText;

use super::{Parse, Parser, Profile, SyntaxKind};

impl Parse {
    #[track_caller]
    pub fn expect(src: &str) -> Self {
        Parser::for_source(&SourceText::from(src)).parse().unwrap()
    }

    #[track_caller]
    pub fn expect_with_profile(src: &str, profile: Profile) -> Self {
        Parser::for_source(&SourceText::from(src))
            .with_profile(profile)
            .parse()
            .unwrap()
    }

    #[track_caller]
    pub fn expect_valid(src: &str) -> Self {
        let parse = Self::expect(src);
        if !parse.is_valid() {
            panic!(
                "Expected valid parse, got error:\n{}",
                parse.dump_diagnostic_lines()
            );
        }
        parse
    }

    #[track_caller]
    pub fn expect_valid_cst(src: &str) -> String {
        Self::expect_valid(src).dump_cst()
    }

    #[track_caller]
    pub fn expect_valid_cst_full(src: &str) -> String {
        Self::expect_valid(src).dump_cst_full()
    }

    /// Filtered diagnostics of an input that must not parse cleanly.
    #[track_caller]
    pub fn expect_invalid(src: &str) -> String {
        let parse = Self::expect(src);
        if parse.is_valid() {
            panic!("Expected invalid parse, got valid:\n{}", parse.dump_cst());
        }
        parse.dump_diagnostic_lines()
    }

    /// Tree of an input that must not parse cleanly.
    #[track_caller]
    pub fn expect_invalid_cst(src: &str) -> String {
        let parse = Self::expect(src);
        if parse.is_valid() {
            panic!("Expected invalid parse, got valid:\n{}", parse.dump_cst());
        }
        parse.dump_cst()
    }

    /// Whether any node of `kind` appears in the tree.
    pub fn contains_node(&self, kind: SyntaxKind) -> bool {
        self.root.descendants().iter().any(|n| n.kind() == kind)
    }

    /// Concatenated text of every leaf, trivia included.
    pub fn leaf_text(&self) -> String {
        self.root
            .tokens()
            .iter()
            .map(|t| t.text(&self.source))
            .collect()
    }

    pub fn dump_cst(&self) -> String {
        self.printer().dump()
    }

    pub fn dump_cst_full(&self) -> String {
        self.printer().with_trivia(true).dump()
    }

    pub fn dump_cst_spans(&self) -> String {
        self.printer().with_spans(true).dump()
    }

    pub fn dump_diagnostics(&self) -> String {
        self.diagnostics.render_filtered(&self.source)
    }

    pub fn dump_diagnostics_raw(&self) -> String {
        self.diagnostics.render(&self.source)
    }

    /// One line per filtered diagnostic, without source snippets.
    pub fn dump_diagnostic_lines(&self) -> String {
        self.diagnostics
            .filtered()
            .iter()
            .map(|d| format!("{d}\n"))
            .collect()
    }
}
