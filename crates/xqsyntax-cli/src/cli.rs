use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use xqsyntax_lib::Profile;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ProfileChoice {
    #[default]
    W3c,
    #[value(name = "marklogic")]
    MarkLogic,
}

impl From<ProfileChoice> for Profile {
    fn from(choice: ProfileChoice) -> Self {
        match choice {
            ProfileChoice::W3c => Profile::W3c,
            ProfileChoice::MarkLogic => Profile::MarkLogic,
        }
    }
}

#[derive(Parser)]
#[command(name = "xqsyntax", bin_name = "xqsyntax")]
#[command(about = "Inspect XQuery tokens, syntax trees and diagnostics")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the token stream
    #[command(after_help = r#"EXAMPLES:
  xqsyntax tokens query.xq
  xqsyntax tokens -e '<a>{1}</a>' --states
  cat query.xq | xqsyntax tokens -"#)]
    Tokens {
        #[command(flatten)]
        input: InputArgs,

        /// Show the resume state of each token
        #[arg(long)]
        states: bool,
    },

    /// Print the concrete syntax tree
    #[command(after_help = r#"EXAMPLES:
  xqsyntax cst query.xq
  xqsyntax cst -e 'for $x in 1 return $x' --spans
  xqsyntax cst query.xq --trivia --format json
  xqsyntax cst -e 'binary()' --profile marklogic"#)]
    Cst {
        #[command(flatten)]
        input: InputArgs,

        /// Include whitespace and comments
        #[arg(long)]
        trivia: bool,

        /// Show source ranges (UTF-16 offsets)
        #[arg(long)]
        spans: bool,

        /// Output format
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Report syntax errors
    #[command(after_help = r#"EXAMPLES:
  xqsyntax check query.xq
  xqsyntax check -e 'let $x := return 1'
  xqsyntax check query.xq --strict --color never"#)]
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Colorize diagnostics (auto-detected by default)
        #[arg(long, default_value = "auto", value_name = "WHEN")]
        color: ColorChoice,

        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Args)]
#[group(id = "input", multiple = false, required = true)]
pub struct InputArgs {
    /// Query file (use "-" for stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Query as inline text
    #[arg(short = 'e', long = "expr", value_name = "TEXT")]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Dialect used where dialects reserve different names
    #[arg(long, default_value = "w3c", value_name = "PROFILE")]
    pub profile: ProfileChoice,
}
