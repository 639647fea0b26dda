//! xqsyntax: error-tolerant lexer and concrete syntax tree parser for XQuery.
//!
//! Covers XQuery 1.0/3.0 together with the Update Facility, Full Text and
//! Scripting extensions and MarkLogic's vendor syntax, all recognised by one
//! superset grammar.
//!
//! # Example
//!
//! ```
//! use xqsyntax_lib::{SourceText, parse};
//!
//! let source = SourceText::from("for $x in (1, 2) return $x");
//! let parse = parse(&source).expect("no fuel limit set");
//! assert!(parse.is_valid());
//! eprintln!("{}", parse.printer().dump());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod lexer;
pub mod parser;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use parser::{Parse, Parser, Profile, SyntaxKind, SyntaxNode, SyntaxToken, parse};
pub use xqsyntax_core::{SourceText, TextRange, TextSize};

/// Conditions that stop a parse. User-input problems never end up here; they
/// are reported as [`Diagnostics`] alongside a complete tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// The grammar asked for a node of a kind that is not a node kind.
    #[error("internal parser defect: {0:?} is not a node kind")]
    InvalidNodeKind(SyntaxKind),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, Error>;
