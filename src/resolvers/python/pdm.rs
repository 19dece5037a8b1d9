//! pdm.lock extraction
//!
//! JSON document with a `package` array of `{name, version, groups?}`
//! entries. Development dependencies either list `"dev"` in `groups` or set
//! an explicit `dev: true`.

use serde_json::{Map, Value};

use crate::model::{Package, Resolution};

pub(crate) fn from_value(doc: &Map<String, Value>) -> Resolution {
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

        let in_dev_group = entry
            .get("groups")
            .and_then(Value::as_array)
            .is_some_and(|groups| groups.iter().any(|g| g.as_str() == Some("dev")));
        let dev_flag = entry.get("dev").and_then(Value::as_bool) == Some(true);

        let package = Package::new(name, version);
        if in_dev_group || dev_flag {
            resolution.dev_dependencies.push(package);
        } else {
            resolution.dependencies.push(package);
        }
    }

    resolution
}
