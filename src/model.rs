//! Normalized lockfile model shared by all resolvers and the diff engine

/// A single resolved package: ecosystem-native name plus the literal version
/// string recorded in the lockfile (a concrete version, never a range).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: String,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// One snapshot's fully-resolved, top-level package set, partitioned into
/// production and development groups.
///
/// Within each list names are unique and order is not significant. A
/// Resolution is created fresh by a single `resolve()` call and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub dependencies: Vec<Package>,
    pub dev_dependencies: Vec<Package>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_resolution() {
        let resolution = Resolution::default();
        assert!(resolution.dependencies.is_empty());
        assert!(resolution.dev_dependencies.is_empty());
    }

    #[test]
    fn test_package_new() {
        let pkg = Package::new("@scope/name", "1.2.3");
        assert_eq!(pkg.name, "@scope/name");
        assert_eq!(pkg.version, "1.2.3");
    }
}
