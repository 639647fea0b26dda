use xqsyntax_core::SourceText;

use crate::Error;
use crate::diagnostics::DiagnosticKind;
use crate::parser::{Parser, SyntaxKind};

fn nested_parens(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn nesting_limit_wraps_rest_in_one_error() {
    let source = SourceText::from("((1))");

    let parse = Parser::for_source(&source)
        .with_recursion_limit(2)
        .parse()
        .unwrap();

    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Module
      MainModule
        QueryBody
          ParenthesizedExpr
            ParenOpen "("
            ParenthesizedExpr
              ParenOpen "("
              Error: nesting too deep
                IntegerLiteral "1"
                ParenClose ")"
                ParenClose ")"
    "#);
}

#[test]
fn nesting_limit_reports_once() {
    let input = nested_parens(40);
    let source = SourceText::from(input.as_str());

    let parse = Parser::for_source(&source)
        .with_recursion_limit(16)
        .parse()
        .unwrap();

    let kinds: Vec<_> = parse.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(kinds, [DiagnosticKind::NestingTooDeep]);
    assert_eq!(parse.leaf_text(), input);
}

#[test]
fn default_limit_accepts_moderate_nesting() {
    let input = nested_parens(50);
    let source = SourceText::from(input.as_str());

    let parse = Parser::for_source(&source).parse().unwrap();

    assert!(parse.is_valid());
}

#[test]
fn exec_fuel_exhausted() {
    let source = SourceText::from("1 + 2 + 3");

    let result = Parser::for_source(&source).with_exec_fuel(Some(3)).parse();

    assert_eq!(result.err(), Some(Error::ExecFuelExhausted));
}

#[test]
fn exec_fuel_counts_consumed_tokens() {
    let source = SourceText::from("1 + 2 + 3");

    let parse = Parser::for_source(&source)
        .with_exec_fuel(Some(100))
        .parse()
        .unwrap();

    assert_eq!(parse.exec_fuel_consumed(), 5);
}

#[test]
fn no_fuel_limit_reports_zero() {
    let source = SourceText::from("1 + 2");

    let parse = Parser::for_source(&source).parse().unwrap();

    assert_eq!(parse.exec_fuel_consumed(), 0);
}

#[test]
fn completing_token_kind_is_internal_defect() {
    let source = SourceText::from("1");
    let mut parser = Parser::for_source(&source);

    let m = parser.start();
    m.complete(&mut parser, SyntaxKind::Plus);

    assert_eq!(
        parser.parse().err(),
        Some(Error::InvalidNodeKind(SyntaxKind::Plus))
    );
}
