use indoc::indoc;

use crate::parser::{Parse, SyntaxKind};

#[test]
fn version_declaration() {
    let input = r#"xquery version "1.0"; 1 + 2"#;

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      VersionDecl
        Keyword "xquery"
        Keyword "version"
        StringLiteral
          StringLiteralStart "\""
          StringLiteralContents "1.0"
          StringLiteralEnd "\""
        Separator ";"
      MainModule
        QueryBody
          AdditiveExpr
            IntegerLiteral "1"
            Plus "+"
            IntegerLiteral "2"
    "#);
}

#[test]
fn version_with_encoding() {
    let input = r#"xquery version "3.0" encoding "utf-8"; ()"#;

    let parse = Parse::expect_valid(input);

    assert!(parse.contains_node(SyntaxKind::VersionDecl));
    assert!(parse.contains_node(SyntaxKind::ParenthesizedExpr));
}

#[test]
fn library_module() {
    let input = r#"module namespace m = "urn:m"; declare variable $m:x := 1;"#;

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      LibraryModule
        ModuleDecl
          Keyword "module"
          Keyword "namespace"
          NCName "m"
          Equal "="
          UriLiteral
            StringLiteralStart "\""
            StringLiteralContents "urn:m"
            StringLiteralEnd "\""
          Separator ";"
        Prolog
          VarDecl
            Keyword "declare"
            Keyword "variable"
            VariableIndicator "$"
            VarName
              NCName "m"
              QNameSeparator ":"
              NCName "x"
            Assign ":="
            IntegerLiteral "1"
            Separator ";"
    "#);
}

#[test]
fn function_declaration() {
    let input = indoc! {r#"
    declare function local:f($a as xs:int) as xs:int { $a };
    local:f(1)
    "#};

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        Prolog
          FunctionDecl
            Keyword "declare"
            Keyword "function"
            QName
              NCName "local"
              QNameSeparator ":"
              NCName "f"
            ParamList
              ParenOpen "("
              Param
                VariableIndicator "$"
                VarName
                  NCName "a"
                TypeDeclaration
                  Keyword "as"
                  SequenceType
                    TypeName
                      NCName "xs"
                      QNameSeparator ":"
                      NCName "int"
              ParenClose ")"
            TypeDeclaration
              Keyword "as"
              SequenceType
                TypeName
                  NCName "xs"
                  QNameSeparator ":"
                  NCName "int"
            EnclosedExpr
              BlockOpen "{"
              VarRef
                VariableIndicator "$"
                VarName
                  NCName "a"
              BlockClose "}"
            Separator ";"
        QueryBody
          FunctionCall
            QName
              NCName "local"
              QNameSeparator ":"
              NCName "f"
            ArgumentList
              ParenOpen "("
              IntegerLiteral "1"
              ParenClose ")"
    "#);
}

#[test]
fn annotated_variable() {
    let input = "declare %private variable $x := 1; $x";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        Prolog
          AnnotatedDecl
            Keyword "declare"
            Annotation
              AnnotationIndicator "%"
              QName
                NCName "private"
            VarDecl
              Keyword "variable"
              VariableIndicator "$"
              VarName
                NCName "x"
              Assign ":="
              IntegerLiteral "1"
            Separator ";"
        QueryBody
          VarRef
            VariableIndicator "$"
            VarName
              NCName "x"
    "#);
}

#[test]
fn annotation_with_literals() {
    let input = r#"declare %rest:path("/a", 2) function local:f() { () }; 1"#;

    let parse = Parse::expect_valid(input);

    assert!(parse.contains_node(SyntaxKind::AnnotatedDecl));
    assert!(parse.contains_node(SyntaxKind::Annotation));
    assert!(parse.contains_node(SyntaxKind::FunctionDecl));
}

#[test]
fn compatibility_annotations() {
    let input = "declare updating function local:f() external; declare sequential function local:g() { () }; 1";

    let parse = Parse::expect_valid(input);

    let annotations = parse
        .root()
        .descendants()
        .iter()
        .filter(|n| n.kind() == SyntaxKind::CompatibilityAnnotation)
        .count();
    assert_eq!(annotations, 2);
}

#[test]
fn external_variables() {
    let input = "declare variable $a external; declare variable $b as xs:int external := 1; $a + $b";

    let parse = Parse::expect_valid(input);

    let decls = parse
        .root()
        .descendants()
        .iter()
        .filter(|n| n.kind() == SyntaxKind::VarDecl)
        .count();
    assert_eq!(decls, 2);
}

#[test]
fn prolog_declarations() {
    let cases = [
        ("declare boundary-space preserve; 1", SyntaxKind::BoundarySpaceDecl),
        (r#"declare default collation "urn:c"; 1"#, SyntaxKind::DefaultCollationDecl),
        (r#"declare base-uri "urn:b"; 1"#, SyntaxKind::BaseUriDecl),
        ("declare construction strip; 1", SyntaxKind::ConstructionDecl),
        ("declare ordering unordered; 1", SyntaxKind::OrderingModeDecl),
        ("declare default order empty least; 1", SyntaxKind::EmptyOrderDecl),
        ("declare copy-namespaces preserve, no-inherit; 1", SyntaxKind::CopyNamespacesDecl),
        (r#"declare decimal-format d decimal-separator = ","; 1"#, SyntaxKind::DecimalFormatProperty),
        (r#"declare default decimal-format grouping-separator = "."; 1"#, SyntaxKind::DecimalFormatDecl),
        ("declare revalidation skip; 1", SyntaxKind::RevalidationDecl),
        (r#"declare namespace p = "urn:p"; 1"#, SyntaxKind::NamespaceDecl),
        (r#"declare default element namespace "urn:e"; 1"#, SyntaxKind::DefaultNamespaceDecl),
        (r#"declare default function namespace "urn:f"; 1"#, SyntaxKind::DefaultNamespaceDecl),
        ("declare context item as node() := .; 1", SyntaxKind::ContextItemDecl),
        (r#"declare option db:opt "v"; 1"#, SyntaxKind::OptionDecl),
        ("declare ft-option using stemming; 1", SyntaxKind::FtOptionDecl),
    ];

    for (input, kind) in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(kind), "{kind:?} missing in {input}");
        assert!(parse.contains_node(SyntaxKind::Prolog), "no prolog in {input}");
    }
}

#[test]
fn imports() {
    let cases = [
        (r#"import module namespace m = "urn:m" at "m.xq", "n.xq"; 1"#, SyntaxKind::ModuleImport),
        (r#"import module "urn:m"; 1"#, SyntaxKind::ModuleImport),
        (r#"import schema namespace s = "urn:s"; 1"#, SyntaxKind::SchemaPrefix),
        (r#"import schema default element namespace "urn:s" at "s.xsd"; 1"#, SyntaxKind::SchemaImport),
        (r#"import stylesheet at "s.xsl"; 1"#, SyntaxKind::StylesheetImport),
    ];

    for (input, kind) in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(kind), "{kind:?} missing in {input}");
    }
}

#[test]
fn transactions() {
    let input = "1; 2";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          IntegerLiteral "1"
      Separator ";"
      MainModule
        QueryBody
          IntegerLiteral "2"
    "#);
}

#[test]
fn transactions_with_version_declarations() {
    let input = indoc! {r#"
    xquery version "1.0-ml";
    1;
    xquery version "1.0-ml";
    declare namespace p = "urn:p";
    2
    "#};

    let parse = Parse::expect_valid(input);

    let versions = parse
        .root()
        .descendants()
        .iter()
        .filter(|n| n.kind() == SyntaxKind::VersionDecl)
        .count();
    assert_eq!(versions, 2);
    assert!(parse.contains_node(SyntaxKind::NamespaceDecl));
}

#[test]
fn trailing_separator() {
    let parse = Parse::expect_valid("1;");

    assert!(parse.contains_node(SyntaxKind::QueryBody));
}

#[test]
fn empty_input() {
    let res = Parse::expect_valid_cst("");

    insta::assert_snapshot!(res, @"Module");
}

#[test]
fn declare_as_path_step() {
    let parse = Parse::expect_valid("declare");

    assert!(!parse.contains_node(SyntaxKind::Prolog));
    assert!(parse.contains_node(SyntaxKind::NameTest));
}
