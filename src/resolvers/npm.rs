//! npm package-lock.json resolver (lockfile versions 1, 2 and 3)
//!
//! Version 1 keeps top-level packages in root `dependencies` and
//! `devDependencies` trees; nested `dependencies` objects are transitive and
//! never read. Versions 2 and 3 keep a flat `packages` map keyed by install
//! path, with a `dev: true` flag on development entries, plus a legacy
//! `dependencies` tree kept for backwards compatibility.

use std::path::Path;

use serde_json::Value;

use crate::error::{LockdiffError, Result};
use crate::model::{Package, Resolution};

use super::{Resolver, basename_lower, read_lockfile};

pub struct NpmResolver;

impl Resolver for NpmResolver {
    fn format(&self) -> &'static str {
        "npm"
    }

    fn can_resolve(&self, path: &Path) -> bool {
        basename_lower(path) == "package-lock.json"
    }

    fn resolve(&self, path: &Path) -> Result<Resolution> {
        let content = read_lockfile(path)?;
        let doc: Value =
            serde_json::from_str(&content).map_err(|e| LockdiffError::ParseFailed {
                format: "npm",
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let lockfile_version = doc
            .get("lockfileVersion")
            .and_then(Value::as_u64)
            .unwrap_or(1);

        match lockfile_version {
            1 => Ok(resolve_v1(&doc)),
            2 | 3 => Ok(resolve_v2_or_v3(&doc)),
            other => Err(LockdiffError::UnsupportedLockfileVersion { version: other }),
        }
    }
}

fn resolve_v1(doc: &Value) -> Resolution {
    let mut resolution = Resolution::default();

    // Only the root level of each tree is read; nested `dependencies`
    // objects are transitive.
    if let Some(deps) = doc.get("dependencies").and_then(Value::as_object) {
        for (name, entry) in deps {
            push_entry(&mut resolution, name, entry, false);
        }
    }
    if let Some(deps) = doc.get("devDependencies").and_then(Value::as_object) {
        for (name, entry) in deps {
            push_entry(&mut resolution, name, entry, true);
        }
    }

    resolution
}

fn resolve_v2_or_v3(doc: &Value) -> Resolution {
    let mut resolution = Resolution::default();

    if let Some(packages) = doc.get("packages").and_then(Value::as_object) {
        for (key, entry) in packages {
            let Some(name) = package_name_from_path(key) else {
                continue;
            };
            push_entry(&mut resolution, &name, entry, false);
        }
    }

    // Legacy v1-style tree, kept by npm for backwards compatibility; keys
    // are package names directly.
    if let Some(deps) = doc.get("dependencies").and_then(Value::as_object) {
        for (name, entry) in deps {
            push_entry(&mut resolution, name, entry, false);
        }
    }

    resolution
}

/// Extract the package name from a v2/v3 `packages` map key
///
/// The key is an install path. Exactly one `node_modules` segment means a
/// top-level package and the name is everything after that segment (which
/// preserves `@scope/name`). Zero segments is the root package or a
/// workspace directory; more than one is a nested dependency. Both are
/// skipped.
fn package_name_from_path(key: &str) -> Option<String> {
    let parts: Vec<&str> = key.split('/').collect();
    if parts.iter().filter(|p| **p == "node_modules").count() != 1 {
        return None;
    }
    let index = parts.iter().position(|p| *p == "node_modules")?;
    Some(parts[index + 1..].join("/"))
}

fn push_entry(resolution: &mut Resolution, name: &str, entry: &Value, force_dev: bool) {
    let Some(version) = entry.get("version").and_then(Value::as_str) else {
        return;
    };

    let is_dev = force_dev || entry.get("dev").and_then(Value::as_bool) == Some(true);
    let list = if is_dev {
        &mut resolution.dev_dependencies
    } else {
        &mut resolution.dependencies
    };

    // The flat packages map and the legacy dependencies tree can describe
    // the same package; the first occurrence wins.
    if list.iter().any(|p| p.name == name) {
        return;
    }
    list.push(Package::new(name, version));
}
