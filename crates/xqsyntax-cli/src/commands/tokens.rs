use std::fmt::Write;

use xqsyntax_core::SourceText;
use xqsyntax_lib::lexer;

use super::input::load_or_exit;
use crate::cli::InputArgs;

pub struct TokensArgs {
    pub input: InputArgs,
    pub states: bool,
}

pub fn run(args: TokensArgs) {
    let input = load_or_exit(&args.input);
    print!("{}", render(&input.source, args.states));
}

/// One line per token: `Kind start..end "text"`, optionally followed by the
/// state to resume lexing from at that token.
pub fn render(source: &SourceText, states: bool) -> String {
    let mut out = String::new();
    for (token, state) in lexer::tokenize(source) {
        let text = lexer::token_text(source, &token);
        write!(
            out,
            "{:?} {}..{} {:?}",
            token.kind,
            u32::from(token.span.start()),
            u32::from(token.span.end()),
            text
        )
        .expect("String write never fails");
        if states {
            write!(out, " @{:#010x}", state).expect("String write never fails");
        }
        out.push('\n');
    }
    out
}
