use crate::parser::{Parse, SyntaxKind};

#[test]
fn precedence() {
    let input = "1 + 2 * 3";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          AdditiveExpr
            IntegerLiteral "1"
            Plus "+"
            MultiplicativeExpr
              IntegerLiteral "2"
              Star "*"
              IntegerLiteral "3"
    "#);
}

#[test]
fn same_level_operators_stay_flat() {
    let input = "1 - 2 - 3";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          AdditiveExpr
            IntegerLiteral "1"
            Minus "-"
            IntegerLiteral "2"
            Minus "-"
            IntegerLiteral "3"
    "#);
}

#[test]
fn logical_operators() {
    let input = "$a or $b and $c";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          OrExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "a"
            Keyword "or"
            AndExpr
              VarRef
                VariableIndicator "$"
                VarName
                  NCName "b"
              Keyword "and"
              VarRef
                VariableIndicator "$"
                VarName
                  NCName "c"
    "#);
}

#[test]
fn value_comparison() {
    let input = "$a eq 1";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          ComparisonExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "a"
            Keyword "eq"
            IntegerLiteral "1"
    "#);
}

#[test]
fn sequence_and_range() {
    let input = "1 to 3, 5";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          RangeExpr
            IntegerLiteral "1"
            Keyword "to"
            IntegerLiteral "3"
          Comma ","
          IntegerLiteral "5"
    "#);
}

#[test]
fn unary_minus() {
    let input = "--1";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          UnaryExpr
            Minus "-"
            Minus "-"
            IntegerLiteral "1"
    "#);
}

#[test]
fn string_concatenation_and_simple_map() {
    let input = r#"$a ! string() || "x""#;

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          StringConcatExpr
            SimpleMapExpr
              VarRef
                VariableIndicator "$"
                VarName
                  NCName "a"
              Bang "!"
              FunctionCall
                QName
                  NCName "string"
                ArgumentList
                  ParenOpen "("
                  ParenClose ")"
            Concatenation "||"
            StringLiteral
              StringLiteralStart "\""
              StringLiteralContents "x"
              StringLiteralEnd "\""
    "#);
}

#[test]
fn if_expression() {
    let input = "if ($a) then 1 else 2";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          IfExpr
            Keyword "if"
            ParenOpen "("
            VarRef
              VariableIndicator "$"
              VarName
                NCName "a"
            ParenClose ")"
            Keyword "then"
            IntegerLiteral "1"
            Keyword "else"
            IntegerLiteral "2"
    "#);
}

#[test]
fn quantified_expression() {
    let input = "some $x in (1, 2), $y in $x satisfies $x eq $y";

    let parse = Parse::expect_valid(input);

    let bindings = parse
        .root()
        .descendants()
        .iter()
        .filter(|n| n.kind() == SyntaxKind::QuantifiedBinding)
        .count();
    assert_eq!(bindings, 2);
    assert!(parse.contains_node(SyntaxKind::QuantifiedExpr));
}

#[test]
fn switch_expression() {
    let input = r#"switch ($a) case 1 case 2 return "low" case 3 return "mid" default return "high""#;

    let parse = Parse::expect_valid(input);

    let cases = parse
        .root()
        .descendants()
        .iter()
        .filter(|n| n.kind() == SyntaxKind::SwitchCaseClause)
        .count();
    assert_eq!(cases, 2);
    assert!(parse.contains_node(SyntaxKind::SwitchDefaultClause));
}

#[test]
fn typeswitch_expression() {
    let input = r#"typeswitch ($a) case $e as element() | text() return $e case xs:string return 1 default $d return $d"#;

    let parse = Parse::expect_valid(input);

    assert!(parse.contains_node(SyntaxKind::TypeswitchExpr));
    assert!(parse.contains_node(SyntaxKind::SequenceTypeUnion));
    assert!(parse.contains_node(SyntaxKind::DefaultCaseClause));
}

#[test]
fn try_catch() {
    let input = "try { 1 } catch * { 2 }";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          TryCatchExpr
            TryClause
              Keyword "try"
              EnclosedExpr
                BlockOpen "{"
                IntegerLiteral "1"
                BlockClose "}"
            CatchClause
              Keyword "catch"
              CatchErrorList
                NameTest
                  Wildcard
                    Star "*"
              EnclosedExpr
                BlockOpen "{"
                IntegerLiteral "2"
                BlockClose "}"
    "#);
}

#[test]
fn parenthesized_catch() {
    let parse = Parse::expect_valid("try { 1 } catch ($e) { $e }");

    assert!(parse.contains_node(SyntaxKind::CatchClause));
    assert!(!parse.contains_node(SyntaxKind::CatchErrorList));
    assert!(parse.diagnostics().is_empty());
}

#[test]
fn cast_expression() {
    let input = "$x cast as xs:int?";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          CastExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "x"
            Keyword "cast"
            Keyword "as"
            SingleType
              TypeName
                NCName "xs"
                QNameSeparator ":"
                NCName "int"
              QuestionMark "?"
    "#);
}

#[test]
fn type_operators() {
    let cases = [
        ("$x castable as xs:int", SyntaxKind::CastableExpr),
        ("$x treat as item()*", SyntaxKind::TreatExpr),
        ("$x instance of node()+", SyntaxKind::InstanceofExpr),
    ];

    for (input, kind) in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(kind), "{kind:?} missing in {input}");
    }
}

#[test]
fn validate_expression() {
    let cases = [
        "validate { <a/> }",
        "validate strict { <a/> }",
        "validate lax { <a/> }",
        "validate type xs:anyType { <a/> }",
    ];

    for input in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(SyntaxKind::ValidateExpr), "{input}");
    }
}

#[test]
fn extension_expression() {
    let input = "(# ext:p x #) { 1 }";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r##"
    Module
      MainModule
        QueryBody
          ExtensionExpr
            Pragma
              PragmaBegin "(#"
              QName
                NCName "ext"
                QNameSeparator ":"
                NCName "p"
              PragmaContents "x "
              PragmaEnd "#)"
            EnclosedExpr
              BlockOpen "{"
              IntegerLiteral "1"
              BlockClose "}"
    "##);
}

#[test]
fn ordered_and_unordered() {
    let parse = Parse::expect_valid("ordered { 1 }, unordered { 2 }");

    assert!(parse.contains_node(SyntaxKind::OrderedExpr));
    assert!(parse.contains_node(SyntaxKind::UnorderedExpr));
}

#[test]
fn named_function_reference() {
    let input = "fn:count#1";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r##"
    Module
      MainModule
        QueryBody
          NamedFunctionRef
            QName
              NCName "fn"
              QNameSeparator ":"
              NCName "count"
            FunctionRefHash "#"
            IntegerLiteral "1"
    "##);
}

#[test]
fn inline_function() {
    let input = "function($a) { $a }";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          InlineFunctionExpr
            Keyword "function"
            ParamList
              ParenOpen "("
              Param
                VariableIndicator "$"
                VarName
                  NCName "a"
              ParenClose ")"
            EnclosedExpr
              BlockOpen "{"
              VarRef
                VariableIndicator "$"
                VarName
                  NCName "a"
              BlockClose "}"
    "#);
}

#[test]
fn annotated_inline_function_with_return_type() {
    let parse = Parse::expect_valid("%private function($a as xs:int) as xs:int { $a + 1 }");

    assert!(parse.contains_node(SyntaxKind::InlineFunctionExpr));
    assert!(parse.contains_node(SyntaxKind::Annotation));
    assert!(parse.contains_node(SyntaxKind::TypeDeclaration));
}

#[test]
fn partial_application() {
    let parse = Parse::expect_valid("substring(?, 1)");

    assert!(parse.contains_node(SyntaxKind::ArgumentPlaceholder));
}

#[test]
fn dynamic_function_call() {
    let input = "$f(1)";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          PostfixExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "f"
            ArgumentList
              ParenOpen "("
              IntegerLiteral "1"
              ParenClose ")"
    "#);
}

#[test]
fn reserved_names_are_not_function_calls() {
    let parse = Parse::expect_valid("if (1) then 2 else 3");

    assert!(!parse.contains_node(SyntaxKind::FunctionCall));
}

#[test]
fn braced_uri_function_name() {
    let parse = Parse::expect_valid("Q{http://example.com}f(1)");

    assert!(parse.contains_node(SyntaxKind::FunctionCall));
    assert!(parse.contains_node(SyntaxKind::UriQualifiedName));
    assert!(parse.contains_node(SyntaxKind::BracedUriLiteral));
}

#[test]
fn numeric_literals() {
    let input = "1, 2.5, 1e3";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          IntegerLiteral "1"
          Comma ","
          DecimalLiteral "2.5"
          Comma ","
          DoubleLiteral "1e3"
    "#);
}

#[test]
fn string_literal_with_references() {
    let input = r#""a&lt;&#65;""b""#;

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          StringLiteral
            StringLiteralStart "\""
            StringLiteralContents "a"
            PredefinedEntityReference "&lt;"
            CharacterReference "&#65;"
            EscapedCharacter "\"\""
            StringLiteralContents "b"
            StringLiteralEnd "\""
    "#);
}
