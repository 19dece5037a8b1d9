//! poetry.lock extraction
//!
//! TOML with a `[[package]]` array of `{name, version, category?}` tables.
//! A package is a development dependency exactly when `category == "dev"`;
//! `optional = true` marks an extra, not a dev dependency, and is ignored.

use toml::{Table, Value};

use crate::model::{Package, Resolution};

pub(crate) fn from_table(doc: &Table) -> Resolution {
    let mut resolution = Resolution::default();

    let Some(packages) = doc.get("package").and_then(Value::as_array) else {
        return resolution;
    };

    for entry in packages {
        let (Some(name), Some(version)) = (
            entry.get("name").and_then(Value::as_str),
            entry.get("version").and_then(Value::as_str),
        ) else {
            continue;
        };

        let package = Package::new(name, version);
        if entry.get("category").and_then(Value::as_str) == Some("dev") {
            resolution.dev_dependencies.push(package);
        } else {
            resolution.dependencies.push(package);
        }
    }

    resolution
}
