//! `serpent-docs` — Documentation build configuration toolkit

use clap::Parser;

use serpent_docs::cli::args::Cli;
use serpent_docs::cli::commands;
use serpent_docs::error::ExitCode;
use serpent_docs::observability::{LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(LogFormat::Human, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
