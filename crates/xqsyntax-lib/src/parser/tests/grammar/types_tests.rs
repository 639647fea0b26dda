use crate::parser::{Parse, Profile, SyntaxKind};

#[test]
fn instance_of_with_occurrence() {
    let input = "$x instance of xs:integer+";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          InstanceofExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "x"
            Keyword "instance"
            Keyword "of"
            SequenceType
              TypeName
                NCName "xs"
                QNameSeparator ":"
                NCName "integer"
              OccurrenceIndicator
                Plus "+"
    "#);
}

#[test]
fn empty_sequence_type() {
    let input = "$x treat as empty-sequence()";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          TreatExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "x"
            Keyword "treat"
            Keyword "as"
            SequenceType
              EmptySequenceType
                Keyword "empty-sequence"
                ParenOpen "("
                ParenClose ")"
    "#);
}

#[test]
fn function_tests() {
    let cases = [
        ("$f instance of function(*)", SyntaxKind::AnyFunctionTest),
        ("$f instance of function(xs:int, item()*) as xs:int", SyntaxKind::TypedFunctionTest),
        ("$f instance of %private function(*)", SyntaxKind::AnyFunctionTest),
        ("$x instance of (node())*", SyntaxKind::ParenthesizedItemType),
        ("$x instance of item()?", SyntaxKind::AnyItemType),
    ];

    for (input, kind) in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(kind), "{kind:?} missing in {input}");
    }
}

#[test]
fn typed_function_test_requires_return_type() {
    let res = Parse::expect_invalid("$f instance of function(xs:int)");

    insta::assert_snapshot!(res, @"error at 31..31: expected `as`");
}

#[test]
fn kind_tests() {
    let cases = [
        ("$x instance of element()", SyntaxKind::ElementTest),
        ("$x instance of element(a, xs:anyType?)", SyntaxKind::ElementTest),
        ("$x instance of attribute(*, xs:string)", SyntaxKind::AttributeTest),
        ("$x instance of document-node(element(a))", SyntaxKind::DocumentTest),
        ("$x instance of document-node(schema-element(a))", SyntaxKind::SchemaElementTest),
        ("$x instance of processing-instruction(target)", SyntaxKind::PiTest),
        (r#"$x instance of processing-instruction("target")"#, SyntaxKind::PiTest),
        ("$x instance of schema-attribute(a)", SyntaxKind::SchemaAttributeTest),
        ("$x instance of namespace-node()", SyntaxKind::NamespaceNodeTest),
        ("$x instance of comment()", SyntaxKind::CommentTest),
        ("$x instance of text()", SyntaxKind::TextTest),
    ];

    for (input, kind) in cases {
        let parse = Parse::expect_valid(input);
        assert!(parse.contains_node(kind), "{kind:?} missing in {input}");
    }
}

#[test]
fn document_test_snapshot() {
    let input = "$x instance of document-node(element(a))";

    let res = Parse::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r#"
    Module
      MainModule
        QueryBody
          InstanceofExpr
            VarRef
              VariableIndicator "$"
              VarName
                NCName "x"
            Keyword "instance"
            Keyword "of"
            SequenceType
              DocumentTest
                Keyword "document-node"
                ParenOpen "("
                ElementTest
                  Keyword "element"
                  ParenOpen "("
                  QName
                    NCName "a"
                  ParenClose ")"
                ParenClose ")"
    "#);
}

#[test]
fn binary_test_under_marklogic() {
    let input = "$x instance of binary()";

    let parse = Parse::expect_with_profile(input, Profile::MarkLogic);

    assert!(parse.is_valid());
    assert!(parse.contains_node(SyntaxKind::BinaryTest));
}

#[test]
fn binary_is_a_type_name_under_w3c() {
    let parse = Parse::expect("$x instance of binary()");

    assert!(!parse.contains_node(SyntaxKind::BinaryTest));
    assert!(parse.contains_node(SyntaxKind::TypeName));
}

#[test]
fn missing_sequence_type() {
    let res = Parse::expect_invalid("$x instance of");

    insta::assert_snapshot!(res, @"error at 14..14: expected sequence type");
}
