//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// lockdiff - compare lockfile dependencies between two versions
#[derive(Parser, Debug)]
#[command(
    name = "lockdiff",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Compare lockfile dependencies between two versions",
    long_about = "lockdiff compares two snapshots of resolved dependency state (two lockfiles \
                  of the same ecosystem) and reports packages added, removed, upgraded or \
                  downgraded, with version moves classified as major, minor or patch.",
    after_help = "Examples:\n    \
                  lockdiff package-lock.json package-lock-new.json\n    \
                  lockdiff --format html --output report.html old.lock new.lock\n    \
                  lockdiff --resolver npm --format markdown old.lock new.lock\n    \
                  lockdiff -f markdown -o changes.md composer.lock composer-new.lock\n\n\
                  Supported lockfiles:\n    \
                  npm: package-lock.json\n    \
                  pnpm: pnpm-lock.yaml\n    \
                  yarn: yarn.lock\n    \
                  composer: composer.lock\n    \
                  ruby: Gemfile.lock\n    \
                  python: requirements*.txt, Pipfile.lock, poetry.lock, pdm.lock"
)]
pub struct Cli {
    /// Path to the source (before) lockfile
    #[arg(value_name = "SOURCE", required_unless_present = "completions")]
    pub source: Option<PathBuf>,

    /// Path to the target (after) lockfile
    #[arg(value_name = "TARGET", required_unless_present = "completions")]
    pub target: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Resolver to use for both files (npm, pnpm, yarn, composer, ruby, python);
    /// inferred from the filenames when omitted
    #[arg(long, short = 'r', value_name = "NAME")]
    pub resolver: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
    Markdown,
}
