//! Replays parser events into a [`SyntaxNode`] tree.
//!
//! The parser only records non-trivia tokens. The sink walks the full token
//! vector alongside the events and attaches everything else:
//!
//! - trivia before a child node or token goes to the current node
//! - `(:` .. `:)` runs are grouped into `Comment` nodes
//! - lexical error tokens are wrapped in `Error` nodes and diagnosed
//! - tokens left after the last event go to the root

use text_size::{TextRange, TextSize};
use xqsyntax_core::SourceText;

use super::cst::SyntaxKind;
use super::event::{ErrorInfo, Event};
use super::tree::{SyntaxElement, SyntaxNode, SyntaxToken};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lexer::Token;

struct NodeBuilder {
    kind: SyntaxKind,
    start: TextSize,
    children: Vec<SyntaxElement>,
    error: Option<Box<ErrorInfo>>,
}

pub(super) struct TreeSink<'a> {
    source: &'a SourceText,
    tokens: &'a [Token],
    pos: usize,
    stack: Vec<NodeBuilder>,
    diagnostics: Diagnostics,
}

impl<'a> TreeSink<'a> {
    pub(super) fn new(source: &'a SourceText, tokens: &'a [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            stack: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub(super) fn build(mut self, events: Vec<Event>) -> (SyntaxNode, Diagnostics) {
        let mut root = None;
        for event in events {
            match event {
                Event::Start { kind: None, .. } => {}
                Event::Start {
                    kind: Some(kind),
                    error,
                } => {
                    if !self.stack.is_empty() {
                        self.flush_trivia();
                    }
                    self.open(kind, error);
                }
                Event::Token { kind } => {
                    self.flush_trivia();
                    self.push_next(kind);
                }
                Event::Finish => {
                    if self.stack.len() == 1 {
                        self.flush_rest();
                    }
                    if let Some(node) = self.close() {
                        root = Some(node);
                    }
                }
            }
        }

        if self.stack.is_empty() && root.is_none() {
            self.open(SyntaxKind::Module, None);
        }
        while !self.stack.is_empty() {
            if self.stack.len() == 1 {
                self.flush_rest();
            }
            if let Some(node) = self.close() {
                root = Some(node);
            }
        }

        let root = root.unwrap_or_else(|| {
            SyntaxNode::new(SyntaxKind::Module, self.source.full_range(), Vec::new(), None)
        });
        (root, self.diagnostics)
    }

    fn next_offset(&self) -> TextSize {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len(), |t| t.span.start())
    }

    fn open(&mut self, kind: SyntaxKind, error: Option<Box<ErrorInfo>>) {
        let start = self.next_offset();
        self.stack.push(NodeBuilder {
            kind,
            start,
            children: Vec::new(),
            error,
        });
    }

    /// Pops the innermost node into its parent. Returns it when it was the root.
    fn close(&mut self) -> Option<SyntaxNode> {
        let builder = self.stack.pop()?;
        let end = builder
            .children
            .last()
            .map_or(builder.start, |c| c.text_range().end());
        let range = TextRange::new(builder.start, end.max(builder.start));

        let message = builder.error.map(|info| {
            let detail = info.detail.as_deref();
            let mut report = self.diagnostics.report(info.kind, range).detail(detail);
            if let Some(related) = info.related {
                report = report.related_to(related.message, related.range);
            }
            report.emit();
            info.kind.message(detail)
        });

        let node = SyntaxNode::new(builder.kind, range, builder.children, message);
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(SyntaxElement::Node(node));
                None
            }
            None => Some(node),
        }
    }

    fn peek_kind(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn flush_trivia(&mut self) {
        while let Some(kind) = self.peek_kind() {
            if !kind.is_trivia() {
                break;
            }
            self.push_trivia_or_token(kind);
        }
    }

    fn flush_rest(&mut self) {
        while let Some(kind) = self.peek_kind() {
            self.push_trivia_or_token(kind);
        }
    }

    fn push_trivia_or_token(&mut self, kind: SyntaxKind) {
        if kind == SyntaxKind::CommentStart {
            self.push_comment();
        } else {
            self.push_next(kind);
        }
    }

    /// Groups `(:` with its body and terminator.
    fn push_comment(&mut self) {
        self.open(SyntaxKind::Comment, None);
        self.push_next(SyntaxKind::CommentStart);
        while let Some(kind) = self.peek_kind() {
            if !kind.is_trivia() || kind == SyntaxKind::CommentStart {
                break;
            }
            self.push_next(kind);
            if matches!(kind, SyntaxKind::CommentEnd | SyntaxKind::IncompleteComment) {
                break;
            }
        }
        self.close();
    }

    /// Appends the next token, relabelled as `kind`, to the innermost node.
    fn push_next(&mut self, kind: SyntaxKind) {
        let Some(&token) = self.tokens.get(self.pos) else {
            return;
        };
        self.pos += 1;
        let leaf = SyntaxElement::Token(SyntaxToken::new(kind, token.span));

        let Some((parent_kind, parent_start)) = self.stack.last().map(|b| (b.kind, b.start)) else {
            return;
        };
        let diagnostic = lexical_diagnostic(token.kind).filter(|_| parent_kind != SyntaxKind::Error);
        let element = match diagnostic {
            Some(diagnostic) => {
                // Unterminated constructs are reported over the construct they cut off.
                let range = if diagnostic.is_structural_error() {
                    TextRange::new(parent_start, token.span.end())
                } else {
                    token.span
                };
                let detail = (diagnostic == DiagnosticKind::UnknownEntityReference)
                    .then(|| self.source.text(token.span));
                let message = diagnostic.message(detail.as_deref());
                self.diagnostics
                    .report(diagnostic, range)
                    .detail(detail.as_deref())
                    .emit();
                SyntaxElement::Node(SyntaxNode::new(
                    SyntaxKind::Error,
                    token.span,
                    vec![leaf],
                    Some(message),
                ))
            }
            None => leaf,
        };
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(element);
        }
    }
}

fn lexical_diagnostic(kind: SyntaxKind) -> Option<DiagnosticKind> {
    let diagnostic = match kind {
        SyntaxKind::BadCharacter => DiagnosticKind::BadCharacter,
        SyntaxKind::UnmatchedCommentEnd => DiagnosticKind::UnmatchedCommentEnd,
        SyntaxKind::IncompleteComment => DiagnosticKind::IncompleteComment,
        SyntaxKind::IncompleteStringLiteral => DiagnosticKind::IncompleteString,
        SyntaxKind::IncompleteMarkup => DiagnosticKind::IncompleteMarkup,
        SyntaxKind::PartialEntityReference => DiagnosticKind::PartialEntityReference,
        SyntaxKind::EmptyEntityReference => DiagnosticKind::EmptyEntityReference,
        SyntaxKind::EntityReference => DiagnosticKind::UnknownEntityReference,
        SyntaxKind::PartialDoubleLiteralExponent => DiagnosticKind::IncompleteDoubleExponent,
        _ => return None,
    };
    Some(diagnostic)
}
