use indoc::indoc;

use crate::parser::{Parse, SyntaxKind};

#[test]
fn block_with_declaration_and_exit() {
    let input = "block { declare $x := 1; $x := 2; exit returning $x }";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          BlockExpr
            Keyword "block"
            BlockOpen "{"
            BlockDecls
              BlockVarDecl
                Keyword "declare"
                VariableIndicator "$"
                VarName
                  NCName "x"
                Assign ":="
                IntegerLiteral "1"
                Separator ";"
            AssignmentExpr
              VariableIndicator "$"
              VarName
                NCName "x"
              Assign ":="
              IntegerLiteral "2"
            Separator ";"
            ExitExpr
              Keyword "exit"
              Keyword "returning"
              VarRef
                VariableIndicator "$"
                VarName
                  NCName "x"
            BlockClose "}"
    "#);
}

#[test]
fn while_loop() {
    let input = "while ($i lt 3) { $i := $i + 1 }";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          WhileExpr
            Keyword "while"
            ParenOpen "("
            ComparisonExpr
              VarRef
                VariableIndicator "$"
                VarName
                  NCName "i"
              Keyword "lt"
              IntegerLiteral "3"
            ParenClose ")"
            BlockExpr
              BlockOpen "{"
              AssignmentExpr
                VariableIndicator "$"
                VarName
                  NCName "i"
                Assign ":="
                AdditiveExpr
                  VarRef
                    VariableIndicator "$"
                    VarName
                      NCName "i"
                  Plus "+"
                  IntegerLiteral "1"
              BlockClose "}"
    "#);
}

#[test]
fn while_without_block_is_function_call() {
    let res = Parse::expect_valid_cst("while(1)");

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          FunctionCall
            QName
              NCName "while"
            ArgumentList
              ParenOpen "("
              IntegerLiteral "1"
              ParenClose ")"
    "#);
}

#[test]
fn sequential_function_body() {
    let input = indoc! {r#"
    declare sequential function local:f() {
      declare $a := 1, $b as xs:int;
      $a := 2;
      $a
    };
    local:f()
    "#};

    let parse = Parse::expect_valid(input);

    for kind in [
        SyntaxKind::CompatibilityAnnotation,
        SyntaxKind::BlockDecls,
        SyntaxKind::BlockVarDecl,
        SyntaxKind::AssignmentExpr,
        SyntaxKind::FunctionCall,
    ] {
        assert!(parse.contains_node(kind), "{kind:?} missing");
    }
}

#[test]
fn statements_need_separators() {
    let res = Parse::expect_invalid("block { 1 2 }");

    insta::assert_snapshot!(res, @"error at 10..10: expected `;` or `}`");
}

#[test]
fn empty_statements_are_skipped() {
    let parse = Parse::expect_valid("block { ;; 1; }");

    assert!(parse.contains_node(SyntaxKind::BlockExpr));
}

#[test]
fn unclosed_block() {
    let res = Parse::expect_invalid("block { 1;");

    insta::assert_snapshot!(res, @"error at 10..10: expected `}`");
}

#[test]
fn assignment_needs_variable_and_operator() {
    let parse = Parse::expect_valid("$x = 1");

    assert!(!parse.contains_node(SyntaxKind::AssignmentExpr));
    assert!(parse.contains_node(SyntaxKind::ComparisonExpr));
}

#[test]
fn exit_as_name() {
    let parse = Parse::expect_valid("exit");

    assert!(!parse.contains_node(SyntaxKind::ExitExpr));
}
