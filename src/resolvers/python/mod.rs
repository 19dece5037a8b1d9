//! Python lockfile resolver
//!
//! One resolver fronts four formats: requirements.txt, Pipfile.lock,
//! poetry.lock and pdm.lock. `can_resolve` claims all four basenames; the
//! actual format is decided by sniffing file content, since the shapes are
//! unambiguous while the filenames are frequently not (requirements-dev.txt,
//! renamed exports, and so on).
//!
//! Detection order: a valid non-empty JSON object with `_meta` is a
//! Pipfile.lock; one with a `package` array (or `metadata`/`content_hash`
//! without `_meta`) is a pdm.lock; valid non-empty TOML with a `package`
//! array is a poetry.lock; anything else is treated as requirements.txt.
//! Valid JSON or TOML matching none of the known shapes is a hard error,
//! never a silent fallback.

pub mod pdm;
pub mod pipfile;
pub mod poetry;
pub mod requirements;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LockdiffError, Result};
use crate::model::Resolution;

use super::{Resolver, basename_lower, read_lockfile};

pub struct PythonResolver;

impl Resolver for PythonResolver {
    fn format(&self) -> &'static str {
        "python"
    }

    fn can_resolve(&self, path: &Path) -> bool {
        let name = basename_lower(path);
        (name.starts_with("requirements") && name.ends_with(".txt"))
            || name == "pipfile.lock"
            || name == "poetry.lock"
            || name == "pdm.lock"
    }

    fn resolve(&self, path: &Path) -> Result<Resolution> {
        let content = read_lockfile(path)?;

        if let Some(doc) = try_parse_json_object(&content) {
            if !doc.is_empty() {
                if doc.contains_key("_meta") {
                    return Ok(pipfile::from_value(&doc));
                }
                if doc.get("package").is_some_and(serde_json::Value::is_array)
                    || doc.contains_key("metadata")
                    || doc.contains_key("content_hash")
                {
                    return Ok(pdm::from_value(&doc));
                }
                return Err(LockdiffError::PythonFormatMismatch {
                    path: path.display().to_string(),
                    detail: "valid JSON but not a Pipfile.lock or pdm.lock".to_string(),
                });
            }
        }

        if let Some(table) = try_parse_toml_table(&content) {
            if !table.is_empty() {
                if table.get("package").is_some_and(toml::Value::is_array) {
                    return Ok(poetry::from_table(&table));
                }
                return Err(LockdiffError::PythonFormatMismatch {
                    path: path.display().to_string(),
                    detail: "valid TOML but not a poetry.lock".to_string(),
                });
            }
        }

        Ok(requirements::parse(&content))
    }
}

fn try_parse_json_object(content: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn try_parse_toml_table(content: &str) -> Option<toml::Table> {
    content.parse::<toml::Table>().ok()
}

/// Pull the first version-shaped token out of a specifier string
///
/// Used for Pipfile version strings (`"==1.2.3"`) and non-exact
/// requirements.txt specifiers (`>=1.0.0,<2.0.0` takes `1.0.0`).
pub(crate) fn extract_version_token(spec: &str) -> Option<String> {
    // Literal patterns, cannot fail to compile.
    #[allow(clippy::unwrap_used)]
    static FULL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+[^\s,]*)").unwrap());
    #[allow(clippy::unwrap_used)]
    static LOOSE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(\d+\.\d+(?:\.\d+)?[a-zA-Z0-9.\-]*)").unwrap());

    let cleaned = spec.trim();
    if let Some(caps) = FULL_RE.captures(cleaned) {
        return Some(caps[1].to_string());
    }
    LOOSE_RE.captures(cleaned).map(|caps| caps[1].to_string())
}
