use crate::parser::{Parse, SyntaxKind};

#[test]
fn insert_into() {
    let input = "insert node <a/> into $doc";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          InsertExpr
            Keyword "insert"
            Keyword "node"
            SourceExpr
              DirElemConstructor
                XmlTagOpen "<"
                QName
                  NCName "a"
                XmlSelfClose "/>"
            Keyword "into"
            TargetExpr
              VarRef
                VariableIndicator "$"
                VarName
                  NCName "doc"
    "#);
}

#[test]
fn insert_positions() {
    let cases = [
        "insert nodes $n as first into $x",
        "insert node $n as last into $x",
        "insert node $n before $x",
        "insert node $n after $x",
    ];

    for input in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(SyntaxKind::InsertExpr), "{input}");
        assert!(parse.contains_node(SyntaxKind::TargetExpr), "{input}");
    }
}

#[test]
fn insert_without_position() {
    let res = Parse::expect_invalid("insert node 1 $x");

    insta::assert_snapshot!(res, @"error at 14..14: expected `into`, `after` or `before`");
}

#[test]
fn delete() {
    let res = Parse::expect_valid_cst("delete node $x");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          DeleteExpr
            Keyword "delete"
            Keyword "node"
            TargetExpr
              VarRef
                VariableIndicator "$"
                VarName
                  NCName "x"
    "#);
}

#[test]
fn replace() {
    let cases = [
        r#"replace value of node $x with "v""#,
        "replace node $x with <b/>",
    ];

    for input in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(SyntaxKind::ReplaceExpr), "{input}");
    }
}

#[test]
fn rename() {
    let parse = Parse::expect_valid(r#"rename node $x as "b""#);

    assert!(parse.contains_node(SyntaxKind::RenameExpr));
    assert!(parse.contains_node(SyntaxKind::NewNameExpr));
}

#[test]
fn copy_modify_return() {
    let parse = Parse::expect_valid("copy $c := $x, $d := $y modify delete node $c/a return $c");

    let bindings = parse
        .root()
        .descendants()
        .iter()
        .filter(|n| n.kind() == SyntaxKind::CopyBinding)
        .count();
    assert_eq!(bindings, 2);
    assert!(parse.contains_node(SyntaxKind::TransformExpr));
    assert!(parse.contains_node(SyntaxKind::DeleteExpr));
}

#[test]
fn update_keywords_as_names() {
    let parse = Parse::expect_valid("delete, insert, copy");

    assert!(!parse.contains_node(SyntaxKind::DeleteExpr));
    assert!(!parse.contains_node(SyntaxKind::InsertExpr));
    assert!(!parse.contains_node(SyntaxKind::TransformExpr));
}
