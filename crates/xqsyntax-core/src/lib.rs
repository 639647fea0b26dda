#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Text primitives shared by the xqsyntax lexers.
//!
//! Three layers, leaves first:
//! - **Source** (`SourceText`): immutable UTF-16 buffer, the unit every offset is measured in
//! - **Scanner** (`CodepointRange`): cursor that steps by codepoint, merging surrogate pairs
//! - **Classifier** (`char_class`): codepoint to lexical class, table-driven for ASCII
//!
//! Nothing here knows about tokens or grammar; the lexers in `xqsyntax-lib`
//! build on these pieces.

pub mod char_class;
pub mod codepoints;
pub mod source;

mod invariants;


pub use char_class::{CharClass, char_class};
pub use codepoints::{CodepointRange, END_OF_BUFFER, INVALID};
pub use source::SourceText;
pub use text_size::{TextRange, TextSize};
