mod cli;
mod commands;


use clap::Parser;

use cli::{Cli, Command};
use commands::check::CheckArgs;
use commands::cst::CstArgs;
use commands::tokens::TokensArgs;

fn main() {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Tokens { input, states } => commands::tokens::run(TokensArgs { input, states }),
        Command::Cst {
            input,
            trivia,
            spans,
            format,
            profile,
        } => commands::cst::run(CstArgs {
            input,
            trivia,
            spans,
            format,
            profile: profile.profile.into(),
        }),
        Command::Check {
            input,
            strict,
            color,
            profile,
        } => commands::check::run(CheckArgs {
            input,
            strict,
            color: color.should_colorize(),
            profile: profile.profile.into(),
        }),
    }
}

/// Installs a stderr subscriber when `RUST_LOG` is set, e.g. `RUST_LOG=xqsyntax_lib=trace`.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_err() {
        return;
    }
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(EnvFilter::from_default_env())
        .init();
}
