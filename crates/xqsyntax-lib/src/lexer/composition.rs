//! Lexer composition: a primary lexer that hands selected tokens to secondary lexers.
//!
//! Each [`Composition`] names a trigger token kind. When the primary lexer
//! produces a trigger token, the matching secondary lexer re-scans that
//! token's range and its tokens replace the trigger in the output.
//!
//! The reported state of a secondary token combines three parts:
//!
//! | bits               | content                                        |
//! |--------------------|------------------------------------------------|
//! | `state_mask`       | secondary state                                |
//! | rest of 0-27       | primary state at the trigger token             |
//! | 28-31              | the composition's `merged_id`                  |
//!
//! The primary's bits under `state_mask` always equal `trigger_state` while
//! it sits on a trigger token. Resuming inside a
//! secondary region restarts the primary at the resume offset in the
//! restored state; it re-derives the rest of the trigger token and then
//! continues with its saved frames. This is exact as long as the trigger
//! token does not depend on text before the resume point. For xqDoc comments
//! that holds unless the comment contains a nested `(: :)` before the resume
//! point.

use tracing::trace;

use super::xquery::state as xquery_state;
use super::{Lexer, LexerState, XQDocLexer, XQueryLexer};
use crate::parser::cst::SyntaxKind;

const MERGED_ID_MASK: u32 = 0xF000_0000;

/// Merged state id of the xqDoc lexer.
pub const XQDOC_STATE_ID: u32 = 0x1000_0000;

/// Bits of the primary state holding the current state id.
const XQUERY_CURRENT_STATE_MASK: u32 = 0x1F;

pub struct Composition<'src> {
    pub trigger: SyntaxKind,
    pub lexer: Box<dyn Lexer<'src> + 'src>,
    /// Secondary state used when entering from a trigger token.
    pub enter_state: LexerState,
    /// Bits of the primary state the secondary state is stored in.
    pub state_mask: u32,
    /// Primary value of the `state_mask` bits on a trigger token.
    pub trigger_state: LexerState,
    pub merged_id: u32,
}

impl Composition<'_> {
    fn merge(&self, parent: LexerState, secondary: LexerState) -> LexerState {
        self.merged_id | (parent & !self.state_mask & !MERGED_ID_MASK) | (secondary & self.state_mask)
    }

    fn split(&self, state: LexerState) -> (LexerState, LexerState) {
        let parent = (state & !self.state_mask & !MERGED_ID_MASK) | self.trigger_state;
        (parent, state & self.state_mask)
    }
}

pub struct LexerComposition<'src> {
    buffer: &'src [u16],
    primary: Box<dyn Lexer<'src> + 'src>,
    secondaries: Vec<Composition<'src>>,
    active: Option<usize>,
    /// Primary state at the trigger token the active secondary is scanning.
    parent_state: LexerState,
}

impl<'src> LexerComposition<'src> {
    pub fn new(primary: Box<dyn Lexer<'src> + 'src>, secondaries: Vec<Composition<'src>>) -> Self {
        Self {
            buffer: &[],
            primary,
            secondaries,
            active: None,
            parent_state: 0,
        }
    }

    /// The XQuery lexer with xqDoc comments split by the xqDoc lexer.
    pub fn xquery() -> Self {
        Self::new(
            Box::new(XQueryLexer::new()),
            vec![Composition {
                trigger: SyntaxKind::XQDocComment,
                lexer: Box::new(XQDocLexer::new()),
                enter_state: 0,
                state_mask: XQUERY_CURRENT_STATE_MASK,
                trigger_state: u32::from(xquery_state::XQDOC_COMMENT),
                merged_id: XQDOC_STATE_ID,
            }],
        )
    }

    fn active_lexer(&self) -> &dyn Lexer<'src> {
        match self.active {
            Some(i) => self.secondaries[i].lexer.as_ref(),
            None => self.primary.as_ref(),
        }
    }

    fn composition_for_trigger(&self, kind: SyntaxKind) -> Option<usize> {
        self.secondaries.iter().position(|c| c.trigger == kind)
    }

    /// Runs the secondary lexer `index` over the primary's current token.
    /// Returns false if it produced nothing for that range.
    fn enter(&mut self, index: usize, state: LexerState) -> bool {
        let start = self.primary.token_start();
        let end = self.primary.token_end();
        self.parent_state = self.primary.state();
        let composition = &mut self.secondaries[index];
        trace!(trigger = ?composition.trigger, start, end, state, "entering secondary lexer");
        composition.lexer.start(self.buffer, start, end, state);
        if composition.lexer.token_kind().is_none() {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Hands the primary's current token to a secondary lexer if it is a trigger.
    /// A trigger the secondary produces nothing for stays a primary token.
    fn check_trigger(&mut self) {
        let Some(kind) = self.primary.token_kind() else {
            return;
        };
        if let Some(index) = self.composition_for_trigger(kind) {
            let enter_state = self.secondaries[index].enter_state;
            self.enter(index, enter_state);
        }
    }
}

impl<'src> Lexer<'src> for LexerComposition<'src> {
    fn start(&mut self, buffer: &'src [u16], start: usize, end: usize, state: LexerState) {
        self.buffer = buffer;
        self.active = None;

        let merged_id = state & MERGED_ID_MASK;
        let resumed = self
            .secondaries
            .iter()
            .position(|c| merged_id != 0 && c.merged_id == merged_id);
        let Some(index) = resumed else {
            self.primary.start(buffer, start, end, state);
            self.check_trigger();
            return;
        };

        let composition = &self.secondaries[index];
        let trigger = composition.trigger;
        let (parent, secondary) = composition.split(state);
        self.primary.start(buffer, start, end, parent);
        trace!(?trigger, start, state, "resuming inside secondary lexer");
        if self.primary.token_kind() == Some(trigger) && self.enter(index, secondary) {
            return;
        }
        self.check_trigger();
    }

    fn advance(&mut self) {
        if let Some(index) = self.active {
            let secondary = &mut self.secondaries[index].lexer;
            secondary.advance();
            if secondary.token_kind().is_some() {
                return;
            }
            trace!(end = self.primary.token_end(), "leaving secondary lexer");
            self.active = None;
        }
        self.primary.advance();
        self.check_trigger();
    }

    fn token_kind(&self) -> Option<SyntaxKind> {
        self.active_lexer().token_kind()
    }

    fn token_start(&self) -> usize {
        self.active_lexer().token_start()
    }

    fn token_end(&self) -> usize {
        self.active_lexer().token_end()
    }

    fn state(&self) -> LexerState {
        match self.active {
            Some(i) => {
                let composition = &self.secondaries[i];
                composition.merge(self.parent_state, composition.lexer.state())
            }
            None => self.primary.state(),
        }
    }
}
