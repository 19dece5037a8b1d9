//! lockdiff - compare lockfile dependencies between two versions
//!
//! Resolves two lockfiles of the same ecosystem (npm, pnpm, yarn, composer,
//! ruby or python) into a normalized dependency model, diffs them, and
//! renders the changes as text, markdown or HTML.

use clap::{CommandFactory, Parser};
use clap_complete::generate;

mod app;
mod cli;
mod diff;
mod error;
mod model;
mod reporters;
mod resolvers;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    // clap enforces the paths unless --completions was given
    let (Some(source), Some(target)) = (cli.source.clone(), cli.target.clone()) else {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "both SOURCE and TARGET lockfile paths are required",
            )
            .exit();
    };

    if let Err(e) = app::run(&cli, &source, &target) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
