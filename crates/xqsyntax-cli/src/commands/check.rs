use xqsyntax_lib::{Parse, Parser, Profile};

use super::input::{Input, load_or_exit};
use crate::cli::InputArgs;

pub struct CheckArgs {
    pub input: InputArgs,
    pub strict: bool,
    pub color: bool,
    pub profile: Profile,
}

pub fn run(args: CheckArgs) {
    let input = load_or_exit(&args.input);
    let parse = match Parser::for_source(&input.source)
        .with_profile(args.profile)
        .parse()
    {
        Ok(parse) => parse,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let report = render(&input, &parse, args.color);
    if !report.is_empty() {
        eprint!("{}", report);
    }
    if !passes(&parse, args.strict) {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

/// Whether the parse is acceptable: no errors, and with `strict` no warnings.
pub fn passes(parse: &Parse, strict: bool) -> bool {
    let diagnostics = parse.diagnostics();
    !diagnostics.has_errors() && !(strict && diagnostics.has_warnings())
}

/// Diagnostics with cascades suppressed, labelled with the input's name.
pub fn render(input: &Input, parse: &Parse, color: bool) -> String {
    parse
        .diagnostics()
        .filtered_printer(&input.source)
        .path(&input.name)
        .colored(color)
        .render()
}
