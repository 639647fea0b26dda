use crate::parser::{Parse, SyntaxKind};

#[test]
fn contains_text_with_ftand() {
    let input = r#"$x contains text "a" ftand "b""#;

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          FtContainsExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "x"
            Keyword "contains"
            Keyword "text"
            FtSelection
              FtAnd
                FtWords
                  StringLiteral
                    StringLiteralStart "\""
                    StringLiteralContents "a"
                    StringLiteralEnd "\""
                Keyword "ftand"
                FtWords
                  StringLiteral
                    StringLiteralStart "\""
                    StringLiteralContents "b"
                    StringLiteralEnd "\""
    "#);
}

#[test]
fn single_words_selection() {
    let res = Parse::expect_valid_cst(r#"$x contains text "a""#);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          FtContainsExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "x"
            Keyword "contains"
            Keyword "text"
            FtSelection
              FtWords
                StringLiteral
                  StringLiteralStart "\""
                  StringLiteralContents "a"
                  StringLiteralEnd "\""
    "#);
}

#[test]
fn boolean_operators() {
    let cases = [
        (r#"$x contains text "a" ftor "b""#, SyntaxKind::FtOr),
        (r#"$x contains text ("a" ftor "b") not in "c""#, SyntaxKind::FtMildNot),
        (r#"$x contains text ftnot "a""#, SyntaxKind::FtUnaryNot),
    ];

    for (input, kind) in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(kind), "{kind:?} missing in {input}");
    }
}

#[test]
fn match_options_and_weight() {
    let input = r#"$x contains text "a" using stemming using case insensitive weight { 2 }"#;

    let parse = Parse::expect_valid(input);

    for kind in [
        SyntaxKind::FtPrimaryWithOptions,
        SyntaxKind::FtMatchOptions,
        SyntaxKind::FtStemOption,
        SyntaxKind::FtCaseOption,
        SyntaxKind::FtWeight,
    ] {
        assert!(parse.contains_node(kind), "{kind:?} missing");
    }
}

#[test]
fn plain_words_have_no_options_node() {
    let parse = Parse::expect_valid(r#"$x contains text "a""#);

    assert!(!parse.contains_node(SyntaxKind::FtPrimaryWithOptions));
}

#[test]
fn match_option_kinds() {
    let cases = [
        (r#"using language "en""#, SyntaxKind::FtLanguageOption),
        ("using wildcards", SyntaxKind::FtWildCardOption),
        ("using no wildcards", SyntaxKind::FtWildCardOption),
        ("using diacritics sensitive", SyntaxKind::FtDiacriticsOption),
        ("using lowercase", SyntaxKind::FtCaseOption),
        ("using no stemming", SyntaxKind::FtStemOption),
        (r#"using option x:y "v""#, SyntaxKind::FtExtensionOption),
        ("using no thesaurus", SyntaxKind::FtThesaurusOption),
        ("using thesaurus default", SyntaxKind::FtThesaurusOption),
        ("using no stop words", SyntaxKind::FtStopWordOption),
        ("using stop words default", SyntaxKind::FtStopWordOption),
    ];

    for (options, kind) in cases {
        let input = format!(r#"$x contains text "a" {options}"#);
        let parse = Parse::expect_valid(&input);
        assert!(parse.contains_node(kind), "{kind:?} missing in {input}");
    }
}

#[test]
fn thesaurus_with_relationship_and_levels() {
    let input = r#"$x contains text "a" using thesaurus at "urn:t" relationship "BT" exactly 2 levels"#;

    let parse = Parse::expect_valid(input);

    assert!(parse.contains_node(SyntaxKind::FtThesaurusId));
    assert!(parse.contains_node(SyntaxKind::FtRange));
}

#[test]
fn stop_words_lists() {
    let input = r#"$x contains text "a" using stop words ("a", "the") except at "urn:s""#;

    let parse = Parse::expect_valid(input);

    assert!(parse.contains_node(SyntaxKind::FtStopWordOption));
}

#[test]
fn anyall_and_positional_filters() {
    let input = r#"$x contains text "a b" all words window 5 words ordered"#;

    let parse = Parse::expect_valid(input);

    for kind in [
        SyntaxKind::FtAnyallOption,
        SyntaxKind::FtWindow,
        SyntaxKind::FtOrder,
    ] {
        assert!(parse.contains_node(kind), "{kind:?} missing");
    }
}

#[test]
fn positional_filter_kinds() {
    let cases = [
        ("distance at most 3 words", SyntaxKind::FtDistance),
        ("distance from 1 to 2 sentences", SyntaxKind::FtDistance),
        ("same sentence", SyntaxKind::FtScope),
        ("different paragraph", SyntaxKind::FtScope),
        ("at start", SyntaxKind::FtContent),
        ("entire content", SyntaxKind::FtContent),
    ];

    for (filter, kind) in cases {
        let input = format!(r#"$x contains text "a" {filter}"#);
        let parse = Parse::expect_valid(&input);
        assert!(parse.contains_node(kind), "{kind:?} missing in {input}");
    }
}

#[test]
fn occurrence_count() {
    let parse = Parse::expect_valid(r#"$x contains text "a" occurs at least 2 times"#);

    assert!(parse.contains_node(SyntaxKind::FtTimes));
    assert!(parse.contains_node(SyntaxKind::FtRange));
}

#[test]
fn enclosed_words() {
    let parse = Parse::expect_valid(r#"$x contains text { "a", "b" } any"#);

    assert!(parse.contains_node(SyntaxKind::FtWords));
    assert!(parse.contains_node(SyntaxKind::EnclosedExpr));
    assert!(parse.contains_node(SyntaxKind::FtAnyallOption));
}

#[test]
fn ignore_option() {
    let parse = Parse::expect_valid(r#"$x contains text "a" without content $y/b"#);

    assert!(parse.contains_node(SyntaxKind::FtIgnoreOption));
}

#[test]
fn extension_selection() {
    let parse = Parse::expect_valid(r#"$x contains text (# ext:ft #) { "a" }"#);

    assert!(parse.contains_node(SyntaxKind::FtExtensionSelection));
    assert!(parse.contains_node(SyntaxKind::Pragma));
}

#[test]
fn missing_selection() {
    let res = Parse::expect_invalid("$x contains text");

    insta::assert_snapshot!(res, @"error at 16..16: expected full-text selection");
}

#[test]
fn contains_without_text_is_a_name() {
    let parse = Parse::expect("$x contains");

    assert!(!parse.contains_node(SyntaxKind::FtContainsExpr));
}
