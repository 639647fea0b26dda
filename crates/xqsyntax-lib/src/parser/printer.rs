//! Text and JSON renderings of the syntax tree.

use std::fmt::Write;

use serde::ser::{Serialize, SerializeMap, Serializer};
use xqsyntax_core::SourceText;

use super::cst::SyntaxKind;
use super::tree::{SyntaxElement, SyntaxNode, SyntaxToken};
use crate::diagnostics::serialize_range;

pub struct CstPrinter<'a> {
    root: &'a SyntaxNode,
    source: &'a SourceText,
    trivia: bool,
    spans: bool,
}

impl<'a> CstPrinter<'a> {
    pub fn new(root: &'a SyntaxNode, source: &'a SourceText) -> Self {
        Self {
            root,
            source,
            trivia: false,
            spans: false,
        }
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(self.root, 0, w)
    }

    fn format_node(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(node.text_range());

        match node.error_message() {
            Some(message) => writeln!(w, "{}{:?}{}: {}", prefix, node.kind(), span, message)?,
            None => writeln!(w, "{}{:?}{}", prefix, node.kind(), span)?,
        }

        for child in node.children() {
            match child {
                SyntaxElement::Node(n) => {
                    if self.trivia || n.kind() != SyntaxKind::Comment {
                        self.format_node(n, indent + 1, w)?;
                    }
                }
                SyntaxElement::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        self.format_token(t, indent + 1, w)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn format_token(&self, token: &SyntaxToken, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(token.text_range());
        writeln!(
            w,
            "{}{:?}{} {:?}",
            prefix,
            token.kind(),
            span,
            token.text(self.source)
        )
    }

    fn span_str(&self, range: text_size::TextRange) -> String {
        if self.spans {
            format!(" {}..{}", u32::from(range.start()), u32::from(range.end()))
        } else {
            String::new()
        }
    }
}

/// Serializable view of a tree: `kind`, `range`, `text` for tokens,
/// `children` and `message` for nodes.
pub struct CstJson<'a> {
    node: &'a SyntaxNode,
    source: &'a SourceText,
}

impl<'a> CstJson<'a> {
    pub fn new(node: &'a SyntaxNode, source: &'a SourceText) -> Self {
        Self { node, source }
    }
}

struct Range(text_size::TextRange);

impl Serialize for Range {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_range(&self.0, serializer)
    }
}

struct TokenJson<'a> {
    token: &'a SyntaxToken,
    source: &'a SourceText,
}

impl Serialize for TokenJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("kind", &self.token.kind())?;
        map.serialize_entry("range", &Range(self.token.text_range()))?;
        map.serialize_entry("text", &self.token.text(self.source))?;
        map.end()
    }
}

struct ChildrenJson<'a> {
    node: &'a SyntaxNode,
    source: &'a SourceText,
}

impl Serialize for ChildrenJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.node.children().iter().map(|child| match child {
            SyntaxElement::Node(node) => ElementJson::Node(CstJson::new(node, self.source)),
            SyntaxElement::Token(token) => ElementJson::Token(TokenJson {
                token,
                source: self.source,
            }),
        }))
    }
}

enum ElementJson<'a> {
    Node(CstJson<'a>),
    Token(TokenJson<'a>),
}

impl Serialize for ElementJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ElementJson::Node(node) => node.serialize(serializer),
            ElementJson::Token(token) => token.serialize(serializer),
        }
    }
}

impl Serialize for CstJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let message = self.node.error_message();
        let mut map = serializer.serialize_map(Some(if message.is_some() { 4 } else { 3 }))?;
        map.serialize_entry("kind", &self.node.kind())?;
        map.serialize_entry("range", &Range(self.node.text_range()))?;
        if let Some(message) = message {
            map.serialize_entry("message", message)?;
        }
        map.serialize_entry(
            "children",
            &ChildrenJson {
                node: self.node,
                source: self.source,
            },
        )?;
        map.end()
    }
}
