//! Run pipeline: pick a resolver, resolve both lockfiles, diff, render

use std::fs;
use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::diff::diff_resolutions;
use crate::error::{LockdiffError, Result};
use crate::reporters::{HtmlReporter, MarkdownReporter, Reporter, TextReporter};
use crate::resolvers::ResolverRegistry;

pub fn run(cli: &Cli, source: &Path, target: &Path) -> Result<()> {
    let registry = ResolverRegistry::with_default_resolvers();
    let resolver = registry.select(source, target, cli.resolver.as_deref())?;

    let before = resolver.resolve(source)?;
    let after = resolver.resolve(target)?;
    let diff = diff_resolutions(&before, &after);

    let report = reporter_for(cli.format).report(&diff);

    match &cli.output {
        Some(path) => {
            fs::write(path, &report).map_err(|e| LockdiffError::ReportWriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{report}"),
    }

    Ok(())
}

fn reporter_for(format: OutputFormat) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Text => Box::new(TextReporter),
        OutputFormat::Html => Box::new(HtmlReporter),
        OutputFormat::Markdown => Box::new(MarkdownReporter),
    }
}
