//! Pipfile.lock extraction
//!
//! JSON document with `_meta`, `default` (production) and `develop`
//! (development) sections. Version strings carry the pin operator
//! (`"==1.2.3"`), so the version token is regex-extracted; entries with a
//! missing or non-string version are skipped.

use serde_json::{Map, Value};

use crate::model::{Package, Resolution};

use super::extract_version_token;

pub(crate) fn from_value(doc: &Map<String, Value>) -> Resolution {
    Resolution {
        dependencies: extract_section(doc.get("default")),
        dev_dependencies: extract_section(doc.get("develop")),
    }
}

fn extract_section(section: Option<&Value>) -> Vec<Package> {
    let Some(entries) = section.and_then(Value::as_object) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|(name, entry)| {
            let spec = entry.get("version")?.as_str()?;
            let version = extract_version_token(spec)?;
            Some(Package::new(name, version))
        })
        .collect()
}
