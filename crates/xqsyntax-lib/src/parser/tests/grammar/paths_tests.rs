use crate::parser::{Parse, SyntaxKind};

#[test]
fn root_only() {
    let res = Parse::expect_valid_cst("/");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          PathExpr
            Slash "/"
    "#);
}

#[test]
fn descendant_from_root() {
    let res = Parse::expect_valid_cst("//a");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          PathExpr
            DoubleSlash "//"
            NameTest
              QName
                NCName "a"
    "#);
}

#[test]
fn descendant_from_root_needs_a_step() {
    let res = Parse::expect_invalid("//");

    insta::assert_snapshot!(res, @"error at 2..2: expected relative path");
}

#[test]
fn relative_path() {
    let res = Parse::expect_valid_cst("a/b");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          RelativePathExpr
            NameTest
              QName
                NCName "a"
            Slash "/"
            NameTest
              QName
                NCName "b"
    "#);
}

#[test]
fn mixed_separators_stay_flat() {
    let parse = Parse::expect_valid("/a//b/c");

    let paths = parse
        .root()
        .descendants()
        .iter()
        .filter(|n| n.kind() == SyntaxKind::RelativePathExpr)
        .count();
    assert_eq!(paths, 1);
    assert!(parse.contains_node(SyntaxKind::PathExpr));
}

#[test]
fn forward_axis() {
    let res = Parse::expect_valid_cst("child::a");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          ForwardStep
            Keyword "child"
            AxisSeparator "::"
            NameTest
              QName
                NCName "a"
    "#);
}

#[test]
fn reverse_axis_with_kind_test() {
    let res = Parse::expect_valid_cst("parent::node()");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          ReverseStep
            Keyword "parent"
            AxisSeparator "::"
            AnyKindTest
              Keyword "node"
              ParenOpen "("
              ParenClose ")"
    "#);
}

#[test]
fn all_axes() {
    let forward = [
        "attribute::a",
        "child::a",
        "descendant::a",
        "descendant-or-self::a",
        "following::a",
        "following-sibling::a",
        "namespace::a",
        "property::a",
        "self::a",
    ];
    let reverse = [
        "ancestor::a",
        "ancestor-or-self::a",
        "parent::a",
        "preceding::a",
        "preceding-sibling::a",
    ];

    for input in forward {
        assert!(Parse::expect_valid(input).contains_node(SyntaxKind::ForwardStep), "{input}");
    }
    for input in reverse {
        assert!(Parse::expect_valid(input).contains_node(SyntaxKind::ReverseStep), "{input}");
    }
}

#[test]
fn abbreviated_attribute_step() {
    let res = Parse::expect_valid_cst("@id");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          AbbrevForwardStep
            AttributeSelector "@"
            NameTest
              QName
                NCName "id"
    "#);
}

#[test]
fn abbreviated_parent_step() {
    let res = Parse::expect_valid_cst("..");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          AbbrevReverseStep
            ParentSelector ".."
    "#);
}

#[test]
fn step_with_predicate() {
    let res = Parse::expect_valid_cst("a[1]");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          AxisStep
            NameTest
              QName
                NCName "a"
            PredicateList
              Predicate
                SquareOpen "["
                IntegerLiteral "1"
                SquareClose "]"
    "#);
}

#[test]
fn filter_expression() {
    let res = Parse::expect_valid_cst("$x[1]");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          PostfixExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "x"
            Predicate
              SquareOpen "["
              IntegerLiteral "1"
              SquareClose "]"
    "#);
}

#[test]
fn local_name_wildcard() {
    let res = Parse::expect_valid_cst("*:a");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          NameTest
            Wildcard
              Star "*"
              QNameSeparator ":"
              NCName "a"
    "#);
}

#[test]
fn prefix_wildcard() {
    let res = Parse::expect_valid_cst("p:*");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          NameTest
            Wildcard
              NCName "p"
              QNameSeparator ":"
              Star "*"
    "#);
}

#[test]
fn braced_uri_wildcard() {
    let res = Parse::expect_valid_cst("Q{urn}*");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          NameTest
            Wildcard
              BracedUriLiteral
                BracedUriLiteralStart "Q{"
                StringLiteralContents "urn"
                BracedUriLiteralEnd "}"
              Star "*"
    "#);
}

#[test]
fn kind_tests_as_steps() {
    let cases = [
        ("a/text()", SyntaxKind::TextTest),
        ("a/comment()", SyntaxKind::CommentTest),
        ("//element(a)", SyntaxKind::ElementTest),
        ("a/@attribute(*)", SyntaxKind::AttributeTest),
        ("a/namespace-node()", SyntaxKind::NamespaceNodeTest),
    ];

    for (input, kind) in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(kind), "{kind:?} missing in {input}");
    }
}

#[test]
fn context_item_in_path() {
    let parse = Parse::expect_valid("./a");

    assert!(parse.contains_node(SyntaxKind::ContextItemExpr));
    assert!(parse.contains_node(SyntaxKind::RelativePathExpr));
}

#[test]
fn union_of_paths() {
    let parse = Parse::expect_valid("a | b union c");

    assert!(parse.contains_node(SyntaxKind::UnionExpr));
}
