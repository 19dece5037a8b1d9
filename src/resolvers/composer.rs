//! composer.lock resolver
//!
//! PHP Composer records production packages in a `packages` array and
//! development packages in `packages-dev`; each entry is an object with
//! `name` and `version` fields. Entries missing either field are skipped.

use std::path::Path;

use serde_json::Value;

use crate::error::{LockdiffError, Result};
use crate::model::{Package, Resolution};

use super::{Resolver, basename_lower, read_lockfile};

pub struct ComposerResolver;

impl Resolver for ComposerResolver {
    fn format(&self) -> &'static str {
        "composer"
    }

    fn can_resolve(&self, path: &Path) -> bool {
        basename_lower(path) == "composer.lock"
    }

    fn resolve(&self, path: &Path) -> Result<Resolution> {
        let content = read_lockfile(path)?;
        let doc: Value =
            serde_json::from_str(&content).map_err(|e| LockdiffError::ParseFailed {
                format: "composer",
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Resolution {
            dependencies: extract_packages(doc.get("packages")),
            dev_dependencies: extract_packages(doc.get("packages-dev")),
        })
    }
}

fn extract_packages(value: Option<&Value>) -> Vec<Package> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name")?.as_str()?;
            let version = entry.get("version")?.as_str()?;
            Some(Package::new(name, version))
        })
        .collect()
}
