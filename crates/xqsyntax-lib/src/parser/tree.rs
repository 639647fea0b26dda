//! Owned concrete syntax tree.
//!
//! Every token of the input, trivia included, is a leaf somewhere in the
//! tree, so concatenating leaf texts in order reproduces the source.

use text_size::TextRange;
use xqsyntax_core::SourceText;

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyntaxToken {
    kind: SyntaxKind,
    range: TextRange,
}

impl SyntaxToken {
    pub(crate) fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text_range(&self) -> TextRange {
        self.range
    }

    pub fn text(&self, source: &SourceText) -> String {
        source.text(self.range)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        match self {
            SyntaxElement::Node(node) => node.text_range(),
            SyntaxElement::Token(token) => token.text_range(),
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxElement::Node(_) => None,
            SyntaxElement::Token(token) => Some(token),
        }
    }
}

/// Interior node. Error nodes carry the message of the diagnostic they produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    range: TextRange,
    children: Vec<SyntaxElement>,
    message: Option<String>,
}

impl SyntaxNode {
    pub(crate) fn new(
        kind: SyntaxKind,
        range: TextRange,
        children: Vec<SyntaxElement>,
        message: Option<String>,
    ) -> Self {
        Self {
            kind,
            range,
            children,
            message,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text_range(&self) -> TextRange {
        self.range
    }

    pub fn children(&self) -> &[SyntaxElement] {
        &self.children
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    pub fn first_child(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.child_nodes().find(|n| n.kind == kind)
    }

    /// Non-trivia tokens directly under this node.
    pub fn child_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.children
            .iter()
            .filter_map(SyntaxElement::as_token)
            .filter(|t| !t.kind.is_trivia())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// This node followed by all nodes below it, in document order.
    pub fn descendants(&self) -> Vec<&SyntaxNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.child_nodes().collect::<Vec<_>>().into_iter().rev());
        }
        out
    }

    /// All leaf tokens in document order, trivia included.
    pub fn tokens(&self) -> Vec<SyntaxToken> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens(&self, out: &mut Vec<SyntaxToken>) {
        for child in &self.children {
            match child {
                SyntaxElement::Node(node) => node.collect_tokens(out),
                SyntaxElement::Token(token) => out.push(*token),
            }
        }
    }

    pub fn text(&self, source: &SourceText) -> String {
        source.text(self.range)
    }
}
