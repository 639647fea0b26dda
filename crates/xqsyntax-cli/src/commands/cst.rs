use xqsyntax_core::SourceText;
use xqsyntax_lib::{Parser, Profile};

use super::input::load_or_exit;
use crate::cli::{InputArgs, OutputFormat};

pub struct CstArgs {
    pub input: InputArgs,
    pub trivia: bool,
    pub spans: bool,
    pub format: OutputFormat,
    pub profile: Profile,
}

pub fn run(args: CstArgs) {
    let input = load_or_exit(&args.input);
    match render(&input.source, &args) {
        Ok(out) => print!("{}", out),
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

pub fn render(source: &SourceText, args: &CstArgs) -> Result<String, String> {
    let parse = Parser::for_source(source)
        .with_profile(args.profile)
        .parse()
        .map_err(|e| e.to_string())?;

    match args.format {
        OutputFormat::Text => Ok(parse
            .printer()
            .with_trivia(args.trivia)
            .with_spans(args.spans)
            .dump()),
        OutputFormat::Json => serde_json::to_string_pretty(&parse.to_json())
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
    }
}
