//! yarn.lock resolver (classic v1 syntax)
//!
//! Includes a small line-oriented parser for the format: entries open with
//! an unindented `name@range[, name@range...]:` header, fields sit at two
//! spaces of indentation (`version "1.2.3"`), and nested blocks such as
//! `dependencies:` are indented further and irrelevant here. Syntax errors
//! and unresolved merge-conflict markers fail the whole file.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LockdiffError, Result};
use crate::model::{Package, Resolution};

use super::{Resolver, basename_lower, read_lockfile};

pub struct YarnResolver;

impl Resolver for YarnResolver {
    fn format(&self) -> &'static str {
        "yarn"
    }

    fn can_resolve(&self, path: &Path) -> bool {
        basename_lower(path) == "yarn.lock"
    }

    fn resolve(&self, path: &Path) -> Result<Resolution> {
        let content = read_lockfile(path)?;
        let entries = parse_entries(&content).map_err(|reason| LockdiffError::ParseFailed {
            format: "yarn",
            path: path.display().to_string(),
            reason,
        })?;

        let mut resolution = Resolution::default();

        for entry in &entries {
            let Some(package) = extract_package(entry) else {
                continue;
            };
            // yarn.lock carries no native dev marker; honor an explicit
            // devDependency flag when present, otherwise production.
            if entry.fields.get("devDependency").map(String::as_str) == Some("true") {
                resolution.dev_dependencies.push(package);
            } else {
                resolution.dependencies.push(package);
            }
        }

        Ok(resolution)
    }
}

struct YarnEntry {
    keys: Vec<String>,
    fields: HashMap<String, String>,
}

fn parse_entries(content: &str) -> std::result::Result<Vec<YarnEntry>, String> {
    let mut entries = Vec::new();
    let mut current: Option<YarnEntry> = None;

    for (index, raw) in content.lines().enumerate() {
        if raw.starts_with("<<<<<<<") || raw.starts_with("=======") || raw.starts_with(">>>>>>>") {
            return Err("unresolved merge conflict markers present".to_string());
        }

        let line = raw.trim_end();
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent == 0 {
            let Some(header) = line.strip_suffix(':') else {
                return Err(format!("expected entry header at line {}", index + 1));
            };
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            current = Some(YarnEntry {
                keys: header
                    .split(',')
                    .map(|k| k.trim().trim_matches('"').to_string())
                    .collect(),
                fields: HashMap::new(),
            });
        } else if indent == 2 {
            if line.ends_with(':') {
                // Nested block header (dependencies:, optionalDependencies:)
                continue;
            }
            let Some(entry) = current.as_mut() else {
                return Err(format!("field outside of any entry at line {}", index + 1));
            };
            let Some((key, value)) = line.trim_start().split_once(' ') else {
                return Err(format!("malformed field at line {}", index + 1));
            };
            entry.fields.insert(
                key.trim_matches('"').to_string(),
                value.trim().trim_matches('"').to_string(),
            );
        }
        // Deeper indentation belongs to nested blocks; skip.
    }

    if let Some(entry) = current.take() {
        entries.push(entry);
    }
    Ok(entries)
}

fn extract_package(entry: &YarnEntry) -> Option<Package> {
    let key = entry.keys.first()?;
    let at = key.rfind('@')?;
    let name = key[..at].trim();
    if name.is_empty() {
        return None;
    }

    // The resolved version field is authoritative; the key only carries the
    // requested range.
    let version = entry
        .fields
        .get("version")
        .cloned()
        .or_else(|| version_from_key(&key[at + 1..]))?;

    Some(Package::new(name, version))
}

/// Salvage a version from a key's range suffix
///
/// Strips protocol prefixes (`npm:`, `workspace:`) and leading range
/// operators by matching the first version-shaped token.
fn version_from_key(range: &str) -> Option<String> {
    // Literal pattern, cannot fail to compile.
    #[allow(clippy::unwrap_used)]
    static VERSION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+\S*)").unwrap());

    let range = range.trim();
    if range.is_empty() {
        return None;
    }

    let range = match range.find(':') {
        Some(i) => &range[i + 1..],
        None => range,
    };

    match VERSION_RE.captures(range) {
        Some(caps) => Some(caps[1].to_string()),
        None => Some(range.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn resolve_str(content: &str) -> Result<Resolution> {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("yarn.lock");
        fs::write(&path, content).unwrap();
        YarnResolver.resolve(&path)
    }

    #[test]
    fn test_can_resolve() {
        assert!(YarnResolver.can_resolve(Path::new("yarn.lock")));
        assert!(YarnResolver.can_resolve(Path::new("repo/Yarn.Lock")));
        assert!(!YarnResolver.can_resolve(Path::new("pnpm-lock.yaml")));
    }

    #[test]
    fn test_basic_entry() {
        let resolution = resolve_str(
            "# yarn lockfile v1\n\nexpress@^4.17.0:\n  version \"4.17.3\"\n  resolved \"https://registry.yarnpkg.com/express\"\n",
        )
        .unwrap();
        assert_eq!(resolution.dependencies, vec![Package::new("express", "4.17.3")]);
    }

    #[test]
    fn test_multiple_keys_use_first() {
        let resolution = resolve_str(
            "debug@^4.0.0, debug@^4.3.0:\n  version \"4.3.4\"\n",
        )
        .unwrap();
        assert_eq!(resolution.dependencies, vec![Package::new("debug", "4.3.4")]);
    }

    #[test]
    fn test_scoped_package_key() {
        let resolution = resolve_str(
            "\"@babel/core@^7.0.0\":\n  version \"7.21.0\"\n",
        )
        .unwrap();
        assert_eq!(
            resolution.dependencies,
            vec![Package::new("@babel/core", "7.21.0")]
        );
    }

    #[test]
    fn test_nested_dependency_blocks_are_ignored() {
        let resolution = resolve_str(
            "express@^4.17.0:\n  version \"4.17.3\"\n  dependencies:\n    debug \"^4.3.0\"\n",
        )
        .unwrap();
        assert_eq!(resolution.dependencies.len(), 1);
    }

    #[test]
    fn test_version_salvaged_from_key_with_protocol_prefix() {
        let resolution = resolve_str("pkg@npm:1.2.3:\n  resolved \"somewhere\"\n").unwrap();
        assert_eq!(resolution.dependencies, vec![Package::new("pkg", "1.2.3")]);
    }

    #[test]
    fn test_version_salvaged_from_range_operator() {
        let resolution = resolve_str("pkg@^2.0.1:\n  resolved \"somewhere\"\n").unwrap();
        assert_eq!(resolution.dependencies, vec![Package::new("pkg", "2.0.1")]);
    }

    #[test]
    fn test_dev_dependency_flag() {
        let resolution = resolve_str(
            "jest@^29.0.0:\n  version \"29.0.0\"\n  devDependency true\n",
        )
        .unwrap();
        assert!(resolution.dependencies.is_empty());
        assert_eq!(resolution.dev_dependencies, vec![Package::new("jest", "29.0.0")]);
    }

    #[test]
    fn test_merge_conflict_markers_fail() {
        let err = resolve_str(
            "<<<<<<< HEAD\nexpress@^4.17.0:\n  version \"4.17.3\"\n=======\n",
        )
        .unwrap_err();
        match err {
            LockdiffError::ParseFailed { format, reason, .. } => {
                assert_eq!(format, "yarn");
                assert!(reason.contains("merge conflict"));
            }
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_fails() {
        let err = resolve_str("this is not a yarn lockfile\n").unwrap_err();
        assert!(matches!(err, LockdiffError::ParseFailed { format: "yarn", .. }));
    }

    #[test]
    fn test_empty_file_yields_empty_resolution() {
        let resolution = resolve_str("# yarn lockfile v1\n").unwrap();
        assert_eq!(resolution, Resolution::default());
    }
}
