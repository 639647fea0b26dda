//! Modules, version declarations and the prolog.

use tracing::trace;

use crate::parser::Parser;
use crate::parser::event::Marker;
use crate::parser::cst::SyntaxKind::{self, *};

use super::COMPATIBILITY_ANNOTATIONS;

/// Keywords that may follow `declare` to start a prolog declaration.
const DECLARATION_KEYWORDS: &[&str] = &[
    "default",
    "boundary-space",
    "base-uri",
    "construction",
    "ordering",
    "copy-namespaces",
    "decimal-format",
    "revalidation",
    "ft-option",
    "namespace",
    "context",
    "option",
    "variable",
    "function",
];

impl Parser<'_> {
    /// `VersionDecl? (LibraryModule | MainModule) (";" VersionDecl? MainModule)*`
    ///
    /// Main modules separated by `;` are MarkLogic transactions. Anything
    /// left over is recovered one token at a time.
    pub(crate) fn parse_module(&mut self) {
        let m = self.start();
        if !self.eof() {
            self.parse_module_unit();
        }
        while !self.should_stop() {
            if self.at(Separator) {
                trace!(pos = self.pos, "transaction separator");
                self.bump();
                self.parse_module_unit();
            } else {
                self.recover_token();
            }
        }
        m.complete(self, Module);
    }

    fn parse_module_unit(&mut self) {
        self.parse_version_decl();
        if self.at_keyword("module") && self.nth_at_keyword(1, "namespace") {
            self.parse_library_module();
        } else {
            self.parse_main_module();
        }
    }

    /// `"xquery" (("encoding" StringLiteral) | ("version" StringLiteral ("encoding" StringLiteral)?)) ";"`
    fn parse_version_decl(&mut self) -> bool {
        if !(self.at_keyword("xquery")
            && (self.nth_at_keyword(1, "version") || self.nth_at_keyword(1, "encoding")))
        {
            return false;
        }
        let m = self.start();
        self.bump_keyword();
        if self.eat_keyword("version") {
            self.expect_string_literal();
        }
        if self.eat_keyword("encoding") {
            self.expect_string_literal();
        }
        self.expect(Separator, "`;`");
        m.complete(self, VersionDecl);
        true
    }

    /// `ModuleDecl Prolog`
    fn parse_library_module(&mut self) {
        let m = self.start();
        let d = self.start();
        self.bump_keyword();
        self.bump_keyword();
        self.expect_ncname("namespace prefix");
        self.expect(Equal, "`=`");
        self.expect_uri_literal();
        self.expect(Separator, "`;`");
        d.complete(self, ModuleDecl);
        self.parse_prolog();
        m.complete(self, LibraryModule);
    }

    /// `Prolog QueryBody`
    fn parse_main_module(&mut self) {
        let m = self.start();
        let prolog = self.parse_prolog();
        if !self.parse_expr(QueryBody) && prolog {
            self.error_expected("query body");
        }
        if m.is_empty(self) {
            m.drop(self);
        } else {
            m.complete(self, MainModule);
        }
    }

    fn parse_prolog(&mut self) -> bool {
        let m = self.start();
        while self.parse_prolog_decl() {}
        if m.is_empty(self) {
            m.drop(self);
            false
        } else {
            m.complete(self, Prolog);
            true
        }
    }

    fn at_declaration(&mut self) -> bool {
        if !self.at_keyword("declare") {
            return false;
        }
        if self.nth(1) == AnnotationIndicator {
            return true;
        }
        DECLARATION_KEYWORDS
            .iter()
            .chain(COMPATIBILITY_ANNOTATIONS)
            .any(|k| self.nth_at_keyword(1, k))
    }

    fn parse_prolog_decl(&mut self) -> bool {
        if self.at_keyword("import") {
            return self.parse_import();
        }
        if !self.at_declaration() {
            return false;
        }

        let m = self.start();
        self.bump_keyword();
        let keyword = self.nth_text(0);
        let kind = match keyword.as_str() {
            "default" => self.parse_default_decl(),
            "boundary-space" => self.parse_keyword_choice(BoundarySpaceDecl, &["preserve", "strip"]),
            "base-uri" => {
                self.bump_keyword();
                self.expect_uri_literal();
                BaseUriDecl
            }
            "construction" => self.parse_keyword_choice(ConstructionDecl, &["strip", "preserve"]),
            "ordering" => self.parse_keyword_choice(OrderingModeDecl, &["ordered", "unordered"]),
            "revalidation" => self.parse_keyword_choice(RevalidationDecl, &["strict", "lax", "skip"]),
            "copy-namespaces" => {
                self.parse_keyword_choice(CopyNamespacesDecl, &["preserve", "no-preserve"]);
                self.expect(Comma, "`,`");
                if self.at_any_keyword(&["inherit", "no-inherit"]) {
                    self.bump_keyword();
                } else {
                    self.error_expected("`inherit` or `no-inherit`");
                }
                CopyNamespacesDecl
            }
            "decimal-format" => {
                self.bump_keyword();
                self.expect_eqname(QName, "decimal format name");
                self.parse_decimal_format_properties();
                DecimalFormatDecl
            }
            "ft-option" => {
                self.bump_keyword();
                if !self.parse_ft_match_options() {
                    self.error_expected("`using`");
                }
                FtOptionDecl
            }
            "namespace" => {
                self.bump_keyword();
                self.expect_ncname("namespace prefix");
                self.expect(Equal, "`=`");
                self.expect_uri_literal();
                NamespaceDecl
            }
            "context" => {
                self.bump_keyword();
                self.expect_keyword("item");
                self.parse_type_declaration();
                self.parse_variable_value();
                ContextItemDecl
            }
            "option" => {
                self.bump_keyword();
                self.expect_eqname(QName, "option name");
                self.expect_string_literal();
                OptionDecl
            }
            _ => return self.parse_annotated_decl(m),
        };
        self.expect(Separator, "`;`");
        m.complete(self, kind);
        true
    }

    /// `keyword ("a" | "b" | ...)` for the single-choice setters.
    fn parse_keyword_choice(&mut self, kind: SyntaxKind, choices: &[&str]) -> SyntaxKind {
        self.bump_keyword();
        if self.at_any_keyword(choices) {
            self.bump_keyword();
        } else {
            let expected = choices
                .iter()
                .map(|c| format!("`{c}`"))
                .collect::<Vec<_>>()
                .join(" or ");
            self.error_expected(&expected);
        }
        kind
    }

    /// Declarations starting with `declare default`.
    fn parse_default_decl(&mut self) -> SyntaxKind {
        self.bump_keyword();
        if self.at_any_keyword(&["element", "function"]) {
            self.bump_keyword();
            self.expect_keyword("namespace");
            self.expect_uri_literal();
            return DefaultNamespaceDecl;
        }
        if self.eat_keyword("collation") {
            self.expect_uri_literal();
            return DefaultCollationDecl;
        }
        if self.eat_keyword("order") {
            self.expect_keyword("empty");
            if self.at_any_keyword(&["greatest", "least"]) {
                self.bump_keyword();
            } else {
                self.error_expected("`greatest` or `least`");
            }
            return EmptyOrderDecl;
        }
        if self.eat_keyword("decimal-format") {
            self.parse_decimal_format_properties();
            return DecimalFormatDecl;
        }
        self.error_expected("`element`, `function`, `collation`, `order` or `decimal-format`");
        DefaultNamespaceDecl
    }

    /// `(NCName "=" StringLiteral)*`
    fn parse_decimal_format_properties(&mut self) {
        while self.at(NCName) && self.nth(1) == Equal {
            let m = self.start();
            self.bump_keyword();
            self.bump();
            self.expect_string_literal();
            m.complete(self, DecimalFormatProperty);
        }
    }

    /// `Annotation* (VarDecl | FunctionDecl)` after `declare`.
    ///
    /// `AnnotatedDecl` only appears when there is at least one annotation;
    /// otherwise the variable or function declaration starts at `declare`.
    fn parse_annotated_decl(&mut self, m: Marker) -> bool {
        let mut annotated = false;
        loop {
            if self.at(AnnotationIndicator) {
                self.parse_annotation();
            } else if self.at_any_keyword(COMPATIBILITY_ANNOTATIONS) {
                let a = self.start();
                self.bump_keyword();
                a.complete(self, CompatibilityAnnotation);
            } else {
                break;
            }
            annotated = true;
        }

        if !annotated {
            let kind = self.parse_var_or_function_decl();
            self.expect(Separator, "`;`");
            m.complete(self, kind);
            return true;
        }
        let d = self.start();
        let kind = self.parse_var_or_function_decl();
        d.complete(self, kind);
        self.expect(Separator, "`;`");
        m.complete(self, AnnotatedDecl);
        true
    }

    fn parse_var_or_function_decl(&mut self) -> SyntaxKind {
        if self.eat_keyword("variable") {
            self.expect_var_binding();
            self.parse_type_declaration();
            self.parse_variable_value();
            return VarDecl;
        }
        if self.eat_keyword("function") {
            self.expect_eqname(QName, "function name");
            if self.at(ParenOpen) {
                self.parse_param_list();
            } else {
                self.error_expected("`(`");
            }
            self.parse_type_declaration();
            if !self.eat_keyword("external") && !self.parse_block(EnclosedExpr) {
                self.error_expected("function body");
            }
            return FunctionDecl;
        }
        self.error_expected("`variable` or `function`");
        VarDecl
    }

    /// `(":=" ExprSingle) | ("external" (":=" ExprSingle)?)`
    fn parse_variable_value(&mut self) {
        if self.eat(Assign) {
            self.expect_expr_single();
        } else if self.eat_keyword("external") {
            if self.eat(Assign) {
                self.expect_expr_single();
            }
        } else {
            self.error_expected("`:=` or `external`");
        }
    }

    /// `"%" EQName ("(" Literal ("," Literal)* ")")?`
    pub(super) fn parse_annotation(&mut self) {
        self.assert_current(AnnotationIndicator);
        let m = self.start();
        self.bump();
        self.expect_eqname(QName, "annotation name");
        if self.eat(ParenOpen) {
            loop {
                if !self.parse_literal() {
                    self.error_expected("literal");
                }
                if !self.eat(Comma) {
                    break;
                }
            }
            self.expect(ParenClose, "`)`");
        }
        m.complete(self, Annotation);
    }

    /// `"(" (Param ("," Param)*)? ")"`
    pub(super) fn parse_param_list(&mut self) {
        if !self.at(ParenOpen) {
            self.error_expected("`(`");
            return;
        }
        let m = self.start();
        self.bump();
        if self.at(VariableIndicator) {
            loop {
                let p = self.start();
                self.expect_var_binding();
                self.parse_type_declaration();
                p.complete(self, Param);
                if !self.eat(Comma) {
                    break;
                }
            }
        }
        self.expect(ParenClose, "`)`");
        m.complete(self, ParamList);
    }

    /// `import schema`, `import module` and MarkLogic's `import stylesheet`.
    fn parse_import(&mut self) -> bool {
        let kind = if self.nth_at_keyword(1, "schema") {
            SchemaImport
        } else if self.nth_at_keyword(1, "module") {
            ModuleImport
        } else if self.nth_at_keyword(1, "stylesheet") {
            StylesheetImport
        } else {
            return false;
        };
        let m = self.start();
        self.bump_keyword();
        self.bump_keyword();
        match kind {
            SchemaImport => {
                self.parse_schema_prefix();
                self.expect_uri_literal();
                self.parse_location_hints();
            }
            ModuleImport => {
                if self.eat_keyword("namespace") {
                    self.expect_ncname("namespace prefix");
                    self.expect(Equal, "`=`");
                }
                self.expect_uri_literal();
                self.parse_location_hints();
            }
            _ => {
                self.expect_keyword("at");
                self.expect_uri_literal();
            }
        }
        self.expect(Separator, "`;`");
        m.complete(self, kind);
        true
    }

    /// `("namespace" NCName "=") | ("default" "element" "namespace")`
    fn parse_schema_prefix(&mut self) {
        let m = self.start();
        if self.eat_keyword("namespace") {
            self.expect_ncname("namespace prefix");
            self.expect(Equal, "`=`");
        } else if self.at_keyword("default") && self.nth_at_keyword(1, "element") {
            self.bump_keyword();
            self.bump_keyword();
            self.expect_keyword("namespace");
        } else {
            m.drop(self);
            return;
        }
        m.complete(self, SchemaPrefix);
    }

    /// `("at" URILiteral ("," URILiteral)*)?`
    fn parse_location_hints(&mut self) {
        if !self.eat_keyword("at") {
            return;
        }
        loop {
            self.expect_uri_literal();
            if !self.eat(Comma) {
                break;
            }
        }
    }
}
