//! pnpm-lock.yaml resolver
//!
//! The `packages` map is keyed by `name@version` (scoped names split on the
//! last `@`, plain names on the first) or, for workspace installs, by an
//! install path containing `node_modules`. A path with a single
//! `node_modules` segment is ambiguous between a workspace root and a nested
//! dependency; those entries are included so legitimate top-level packages
//! are never silently dropped. Only paths with multiple `node_modules`
//! segments are provably nested and skipped.

use std::path::Path;

use serde_yaml::Value;

use crate::error::{LockdiffError, Result};
use crate::model::{Package, Resolution};

use super::{Resolver, basename_lower, read_lockfile};

pub struct PnpmResolver;

impl Resolver for PnpmResolver {
    fn format(&self) -> &'static str {
        "pnpm"
    }

    fn can_resolve(&self, path: &Path) -> bool {
        basename_lower(path) == "pnpm-lock.yaml"
    }

    fn resolve(&self, path: &Path) -> Result<Resolution> {
        let content = read_lockfile(path)?;
        let doc: Value =
            serde_yaml::from_str(&content).map_err(|e| LockdiffError::ParseFailed {
                format: "pnpm",
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut resolution = Resolution::default();

        if let Some(packages) = doc.get("packages").and_then(Value::as_mapping) {
            for (key, entry) in packages {
                let Some(key) = key.as_str() else {
                    continue;
                };
                let Some((name, version_from_key)) = split_name_version(key) else {
                    continue;
                };

                // The entry's own version field wins over the key.
                let version = entry
                    .get("version")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or(version_from_key);
                let Some(version) = version else {
                    continue;
                };

                let package = Package::new(name, version);
                if entry.get("dev").and_then(Value::as_bool) == Some(true) {
                    resolution.dev_dependencies.push(package);
                } else {
                    resolution.dependencies.push(package);
                }
            }
        }

        Ok(resolution)
    }
}

/// Split a packages-map key into name and optional version
///
/// Returns `None` for keys that denote nested dependencies.
fn split_name_version(key: &str) -> Option<(String, Option<String>)> {
    let cleaned = clean_key(key)?;

    let at = if cleaned.starts_with('@') {
        // Scoped: the version separator is the last `@`, and index 0 is the
        // scope marker itself.
        match cleaned.rfind('@') {
            Some(0) => None,
            other => other,
        }
    } else {
        cleaned.find('@')
    };

    match at {
        Some(i) if !cleaned[i + 1..].is_empty() => {
            Some((cleaned[..i].to_string(), Some(cleaned[i + 1..].to_string())))
        }
        _ => Some((cleaned, None)),
    }
}

fn clean_key(key: &str) -> Option<String> {
    let parts: Vec<&str> = key.split('/').collect();

    if let Some(index) = parts.iter().position(|p| *p == "node_modules") {
        if parts.iter().filter(|p| **p == "node_modules").count() != 1 {
            return None;
        }
        // Ambiguous path depth: could be a workspace root rather than a
        // nested dependency, so include it.
        return Some(parts[index + 1..].join("/"));
    }

    // Multi-segment keys without node_modules are nested paths, unless the
    // segments are just a scope prefix.
    if parts.len() > 1 && !key.starts_with('@') {
        return None;
    }

    Some(key.to_string())
}
