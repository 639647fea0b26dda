use crate::diagnostics::{DiagnosticKind, Severity};
use crate::parser::{Parse, SyntaxKind};

#[test]
fn stray_token_after_query_body() {
    let input = "1 )";

    let res = Parse::expect_invalid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          IntegerLiteral "1"
      Error: unexpected `)`
        ParenClose ")"
    "#);
}

#[test]
fn consecutive_stray_tokens_each_wrapped() {
    let input = "1 ) ]";

    let res = Parse::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error at 2..3: unexpected `)`
    error at 4..5: unexpected `]`
    ");
}

#[test]
fn only_garbage() {
    let input = "^^ ~";

    let parse = Parse::expect(input);

    assert!(!parse.is_valid());
    assert_eq!(parse.leaf_text(), input);
    let kinds: Vec<_> = parse.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::BadCharacter, DiagnosticKind::BadCharacter]);
}

#[test]
fn bad_character_inside_expression() {
    let input = "1 ^^ 2";

    let res = Parse::expect_invalid(input);

    insta::assert_snapshot!(res, @r"
    error at 2..4: invalid character
    error at 5..6: unexpected `2`
    ");
}

#[test]
fn return_without_flwor() {
    let input = "return 1";

    let res = Parse::expect_invalid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          FlworExpr
            Error: return without FLWOR
            ReturnClause
              Keyword "return"
              IntegerLiteral "1"
    "#);
}

#[test]
fn return_without_flwor_hint() {
    let input = "return $x";

    let res = Parse::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 0..0: return without FLWOR (hint: start the expression with a `for` or `let` clause)");
}

#[test]
fn return_before_paren_or_minus_keeps_its_valid_reading() {
    // `return` is not a reserved function name, so these are a call and a subtraction.
    let call = Parse::expect_valid("return (1, 2)");
    let subtraction = Parse::expect_valid("return -1");

    assert!(call.contains_node(SyntaxKind::FunctionCall));
    assert!(!call.contains_node(SyntaxKind::FlworExpr));
    assert!(subtraction.contains_node(SyntaxKind::AdditiveExpr));
    assert!(!subtraction.contains_node(SyntaxKind::FlworExpr));
}

#[test]
fn return_as_element_name_is_a_path() {
    let input = "return";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          NameTest
            QName
              NCName "return"
    "#);
}

#[test]
fn mismatched_closing_tag() {
    let input = "<a></b>";

    let res = Parse::expect_invalid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          DirElemConstructor
            XmlTagOpen "<"
            QName
              NCName "a"
            XmlTagEnd ">"
            XmlCloseTagOpen "</"
            Error: closing tag does not match `a`
              QName
                NCName "b"
            XmlTagEnd ">"
    "#);
}

#[test]
fn mismatched_prefixed_closing_tag() {
    let input = "<p:a></q:a>";

    let res = Parse::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 7..10: closing tag does not match `p:a` (related: opened here at 1..4)");
}

#[test]
fn mismatched_closing_tag_points_at_opening_tag() {
    let parse = Parse::expect("<a>\n</b>");

    let res = parse.dump_diagnostics();

    assert!(res.contains("closing tag does not match `a`"), "{res}");
    assert!(res.contains("opened here"), "{res}");
}

#[test]
fn second_parenthesized_catch_is_a_warning() {
    let input = "try { 1 } catch ($e) { 2 } catch ($f) { 3 }";

    let parse = Parse::expect(input);

    assert!(parse.is_valid());
    let diagnostics: Vec<_> = parse.diagnostics().iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind(), DiagnosticKind::MultipleParenthesizedCatch);
    assert_eq!(diagnostics[0].severity(), Severity::Warning);
    insta::assert_snapshot!(parse.dump_diagnostic_lines(), @"warning at 27..27: multiple catch clauses of that kind (hint: only the first `catch ($var)` clause can be reached)");
}

#[test]
fn name_test_catch_clauses_are_not_flagged() {
    let input = "try { 1 } catch err:a | err:b { 2 } catch * { 3 }";

    let parse = Parse::expect_valid(input);

    assert!(parse.diagnostics().is_empty());
    assert!(parse.contains_node(SyntaxKind::CatchErrorList));
}

#[test]
fn unknown_entity_reference() {
    let input = r#""a&foo;b""#;

    let res = Parse::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 2..7: unknown entity reference `&foo;` (hint: only `&lt;`, `&gt;`, `&amp;`, `&quot;` and `&apos;` are predefined)");
}

#[test]
fn unmatched_comment_end() {
    let input = "1 :) 2";

    let parse = Parse::expect(input);

    let kinds: Vec<_> = parse.diagnostics().iter().map(|d| d.kind()).collect();
    assert!(kinds.contains(&DiagnosticKind::UnmatchedCommentEnd));
    assert_eq!(parse.leaf_text(), input);
}

#[test]
fn missing_expression_in_else_branch() {
    let input = "if ($a) then 1 else";

    let res = Parse::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 19..19: expected expression");
}
