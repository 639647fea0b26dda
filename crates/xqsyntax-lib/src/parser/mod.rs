//! Parser infrastructure for XQuery and its dialects.
//!
//! # Architecture
//!
//! The grammar is a marker-based recursive descent over the token vector
//! produced by [`crate::lexer::lex`]. It never builds nodes directly:
//!
//! - Events: productions append start/token/finish events; a marker fills in
//!   its node kind once the production is known to match
//! - Rollback: speculative attempts truncate the event list and restore the
//!   token cursor, so probes leave no trace
//! - Tree sink: replays events against the full token vector, attaching
//!   trivia and comments and diagnosing lexical error tokens
//!
//! # Recovery Strategy
//!
//! The parser always produces a tree covering the whole input:
//!
//! 1. Missing constructs become zero-width `Error` nodes; nothing is consumed
//! 2. Tokens nobody wants are wrapped one at a time in `Error` nodes
//! 3. Lexical error tokens are wrapped and diagnosed by the sink
//! 4. On recursion limit, remaining input goes into a single `Error` node
//!
//! Execution fuel exhaustion, when a limit is set, returns an actual error.

pub mod cst;
pub mod tree;

mod core;
mod event;
mod grammar;
mod invariants;
mod printer;
mod sink;

#[cfg(test)]
mod dump;
#[cfg(test)]
mod tests;

use serde::Serialize;
use xqsyntax_core::SourceText;

pub use self::core::Parser;
pub use cst::{SyntaxKind, TokenSet};
pub use printer::{CstJson, CstPrinter};
pub use tree::{SyntaxElement, SyntaxNode, SyntaxToken};

use crate::Result;
use crate::diagnostics::Diagnostics;

/// Grammar profile consulted where dialects disagree about reserved names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// W3C XQuery with the Update, Full Text and Scripting extensions.
    #[default]
    W3c,
    /// Additionally reserves MarkLogic's `binary` node test.
    MarkLogic,
}

/// Parse result: the tree and the diagnostics found while building it.
///
/// The tree is always complete; error nodes mark recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    pub(crate) source: SourceText,
    pub(crate) root: SyntaxNode,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) exec_fuel_consumed: u32,
}

impl Parse {
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// No error-severity diagnostics. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn exec_fuel_consumed(&self) -> u32 {
        self.exec_fuel_consumed
    }

    pub fn printer(&self) -> CstPrinter<'_> {
        CstPrinter::new(&self.root, &self.source)
    }

    pub fn to_json(&self) -> CstJson<'_> {
        CstJson::new(&self.root, &self.source)
    }
}

/// Main entry point with the default profile. Returns Err only when a fuel
/// limit is exhausted or the grammar hits an internal defect.
pub fn parse(source: &SourceText) -> Result<Parse> {
    Parser::for_source(source).parse()
}

/// Parses with an explicit [`Profile`].
pub fn parse_with_profile(source: &SourceText, profile: Profile) -> Result<Parse> {
    Parser::for_source(source).with_profile(profile).parse()
}
