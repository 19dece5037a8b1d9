//! Gemfile.lock resolver
//!
//! Scans the `GEM` section's `specs:` block for `  gemname (version)` lines
//! and stops at the first unindented line after it. Gemfile.lock carries no
//! dev/prod distinction, so everything lands in production dependencies.
//!
//! This is a best-effort line scanner with no strict grammar: content that
//! doesn't look like a Gemfile.lock yields an empty Resolution rather than
//! an error. Only a failed file read is fatal.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::model::{Package, Resolution};

use super::{Resolver, basename_lower, read_lockfile};

pub struct RubyResolver;

impl Resolver for RubyResolver {
    fn format(&self) -> &'static str {
        "ruby"
    }

    fn can_resolve(&self, path: &Path) -> bool {
        basename_lower(path) == "gemfile.lock"
    }

    fn resolve(&self, path: &Path) -> Result<Resolution> {
        let content = read_lockfile(path)?;
        Ok(Resolution {
            dependencies: parse_gems(&content),
            dev_dependencies: Vec::new(),
        })
    }
}

fn parse_gems(content: &str) -> Vec<Package> {
    // Literal pattern, cannot fail to compile.
    #[allow(clippy::unwrap_used)]
    static GEM_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\s+([^\s(]+)\s+\(([^)]+)\)").unwrap());

    let mut gems = Vec::new();
    let mut in_gem_section = false;
    let mut in_specs = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed == "GEM" {
            in_gem_section = true;
            continue;
        }

        if in_gem_section && trimmed == "specs:" {
            in_specs = true;
            continue;
        }

        // An unindented line after the GEM section opens the next section.
        if in_gem_section
            && !trimmed.is_empty()
            && !line.starts_with(' ')
            && !line.starts_with('\t')
        {
            break;
        }

        if in_gem_section && in_specs {
            if let Some(caps) = GEM_RE.captures(line) {
                gems.push(Package::new(&caps[1], &caps[2]));
            }
        }
    }

    gems
}
