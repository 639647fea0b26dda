use proptest::prelude::*;
use xqsyntax_core::SourceText;

use crate::parser::{Parser, parse};

fn xquery_fragments() -> impl Strategy<Value = String> {
    let pieces = prop::sample::select(vec![
        "(", ")", "(:", ":)", "<a>", "</a>", "</b>", "<", "/>", "{", "}", "[", "]", "\"", "'",
        " ", "\n", "1", "2.5", "1e", "$x", "a:b", "Q{u}n", ";", ",", ":=", "+", "*", "/", "//",
        "@", "..", "for", "let", "in", "return", "where", "if", "then", "else", "declare",
        "function", "variable", "element", "contains text", "ftand", "insert node", "into",
        "block", "while", "try", "catch", "&lt;", "&bogus;", "(#", "#)", "<!--", "-->", "<?",
        "?>", "~", "\u{10000}",
    ]);
    prop::collection::vec(pieces, 0..40).prop_map(|v| v.concat())
}

fn utf16_noise() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(any::<u16>(), 0..64)
}

proptest! {
    #[test]
    fn never_fails(input in xquery_fragments()) {
        let source = SourceText::from(input.as_str());
        prop_assert!(parse(&source).is_ok());
    }

    #[test]
    fn leaves_reproduce_input(input in xquery_fragments()) {
        let source = SourceText::from(input.as_str());
        let parse = parse(&source).unwrap();
        prop_assert_eq!(parse.leaf_text(), input);
        prop_assert_eq!(parse.root().text_range(), source.full_range());
    }

    #[test]
    fn leaves_are_contiguous(input in xquery_fragments()) {
        let source = SourceText::from(input.as_str());
        let parse = parse(&source).unwrap();
        let mut offset = 0u32;
        for token in parse.root().tokens() {
            prop_assert_eq!(u32::from(token.text_range().start()), offset);
            offset = u32::from(token.text_range().end());
        }
        prop_assert_eq!(offset, u32::from(source.len()));
    }

    #[test]
    fn deterministic(input in xquery_fragments()) {
        let source = SourceText::from(input.as_str());
        let first = parse(&source).unwrap();
        let second = parse(&source).unwrap();
        prop_assert_eq!(first.dump_cst_spans(), second.dump_cst_spans());
        prop_assert_eq!(first.diagnostics(), second.diagnostics());
    }

    #[test]
    fn unpaired_surrogates_never_fail(units in utf16_noise()) {
        let source = SourceText::from(units);
        let parse = Parser::for_source(&source).parse().unwrap();
        prop_assert_eq!(parse.root().text_range(), source.full_range());
    }

    #[test]
    fn shallow_limit_never_fails(input in xquery_fragments()) {
        let source = SourceText::from(input.as_str());
        let parse = Parser::for_source(&source).with_recursion_limit(4).parse().unwrap();
        prop_assert_eq!(parse.leaf_text(), input);
    }
}
