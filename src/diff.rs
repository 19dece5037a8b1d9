//! Semantic diff engine
//!
//! Compares two [`Resolution`]s and produces a classified change set:
//! packages added, removed, upgraded or downgraded, with upgrades and
//! downgrades bucketed as major, minor or patch.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use semver::Version;

use crate::model::{Package, Resolution};

/// What happened to a package between the two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Upgraded,
    Downgraded,
}

/// How far apart the two versions are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBucket {
    Major,
    Minor,
    Patch,
}

/// One classified per-package change
///
/// `bucket` is present only for Upgraded/Downgraded; `from_version` is absent
/// for Added and `to_version` absent for Removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageChange {
    pub name: String,
    pub kind: ChangeKind,
    pub bucket: Option<VersionBucket>,
    pub from_version: Option<String>,
    pub to_version: Option<String>,
}

/// Classified change sets for both dependency groups, mirroring [`Resolution`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionDiff {
    pub dependencies: Vec<PackageChange>,
    pub dev_dependencies: Vec<PackageChange>,
}

/// Compare two resolutions
///
/// The production and development lists are diffed independently; there is no
/// cross-talk between the two groups.
pub fn diff_resolutions(source: &Resolution, target: &Resolution) -> ResolutionDiff {
    ResolutionDiff {
        dependencies: diff_packages(&source.dependencies, &target.dependencies),
        dev_dependencies: diff_packages(&source.dev_dependencies, &target.dev_dependencies),
    }
}

fn diff_packages(source: &[Package], target: &[Package]) -> Vec<PackageChange> {
    // Last write wins on duplicate names, though resolvers should not
    // produce duplicates in one list.
    let source_map: HashMap<&str, &str> = source
        .iter()
        .map(|p| (p.name.as_str(), p.version.as_str()))
        .collect();
    let target_map: HashMap<&str, &str> = target
        .iter()
        .map(|p| (p.name.as_str(), p.version.as_str()))
        .collect();

    let mut changes = Vec::new();

    // Iterate the input lists rather than the maps so the output order is
    // deterministic for a given pair of resolutions.
    let mut seen = HashSet::new();
    for pkg in source {
        let name = pkg.name.as_str();
        if !seen.insert(name) {
            continue;
        }
        let from = source_map[name];
        match target_map.get(name) {
            None => changes.push(PackageChange {
                name: pkg.name.clone(),
                kind: ChangeKind::Removed,
                bucket: None,
                from_version: Some(from.to_string()),
                to_version: None,
            }),
            Some(&to) if to != from => {
                // Non-semver pairs and build-metadata-only differences
                // abstain: the package is excluded from the diff.
                if let Some((kind, bucket)) = classify_version_change(from, to) {
                    changes.push(PackageChange {
                        name: pkg.name.clone(),
                        kind,
                        bucket: Some(bucket),
                        from_version: Some(from.to_string()),
                        to_version: Some(to.to_string()),
                    });
                }
            }
            Some(_) => {}
        }
    }

    let mut seen = HashSet::new();
    for pkg in target {
        let name = pkg.name.as_str();
        if !seen.insert(name) {
            continue;
        }
        if !source_map.contains_key(name) {
            changes.push(PackageChange {
                name: pkg.name.clone(),
                kind: ChangeKind::Added,
                bucket: None,
                from_version: None,
                to_version: Some(target_map[name].to_string()),
            });
        }
    }

    changes
}

/// Classify a version transition, or abstain
///
/// Returns `None` when either string is not a valid semantic version, or when
/// the two versions have equal precedence (build metadata does not affect
/// ordering). Direction comes from semver precedence, so prerelease versions
/// order below their corresponding release. Any prerelease difference on an
/// otherwise-identical base version is bucketed as Patch.
fn classify_version_change(from: &str, to: &str) -> Option<(ChangeKind, VersionBucket)> {
    let from = Version::parse(from).ok()?;
    let to = Version::parse(to).ok()?;

    let kind = match from.cmp_precedence(&to) {
        Ordering::Equal => return None,
        Ordering::Less => ChangeKind::Upgraded,
        Ordering::Greater => ChangeKind::Downgraded,
    };

    let bucket = if from.major != to.major {
        VersionBucket::Major
    } else if from.minor != to.minor {
        VersionBucket::Minor
    } else {
        VersionBucket::Patch
    };

    Some((kind, bucket))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(deps: &[(&str, &str)], dev_deps: &[(&str, &str)]) -> Resolution {
        Resolution {
            dependencies: deps.iter().map(|(n, v)| Package::new(*n, *v)).collect(),
            dev_dependencies: dev_deps.iter().map(|(n, v)| Package::new(*n, *v)).collect(),
        }
    }

    #[test]
    fn test_identical_resolutions_yield_empty_diff() {
        let res = resolution(&[("express", "4.17.0")], &[("jest", "29.0.0")]);
        let diff = diff_resolutions(&res, &res.clone());
        assert!(diff.dependencies.is_empty());
        assert!(diff.dev_dependencies.is_empty());
    }

    #[test]
    fn test_added_package() {
        let source = resolution(&[], &[]);
        let target = resolution(&[("react", "18.2.0")], &[]);
        let diff = diff_resolutions(&source, &target);
        assert_eq!(diff.dependencies.len(), 1);
        let change = &diff.dependencies[0];
        assert_eq!(change.name, "react");
        assert_eq!(change.kind, ChangeKind::Added);
        assert_eq!(change.bucket, None);
        assert_eq!(change.from_version, None);
        assert_eq!(change.to_version.as_deref(), Some("18.2.0"));
    }

    #[test]
    fn test_removed_package() {
        let source = resolution(&[("left-pad", "1.3.0")], &[]);
        let target = resolution(&[], &[]);
        let diff = diff_resolutions(&source, &target);
        assert_eq!(diff.dependencies.len(), 1);
        let change = &diff.dependencies[0];
        assert_eq!(change.kind, ChangeKind::Removed);
        assert_eq!(change.from_version.as_deref(), Some("1.3.0"));
        assert_eq!(change.to_version, None);
    }

    #[test]
    fn test_major_upgrade() {
        let diff = diff_resolutions(
            &resolution(&[("axios", "1.0.0")], &[]),
            &resolution(&[("axios", "2.0.0")], &[]),
        );
        let change = &diff.dependencies[0];
        assert_eq!(change.kind, ChangeKind::Upgraded);
        assert_eq!(change.bucket, Some(VersionBucket::Major));
        assert_eq!(change.from_version.as_deref(), Some("1.0.0"));
        assert_eq!(change.to_version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_minor_upgrade() {
        let diff = diff_resolutions(
            &resolution(&[("axios", "1.0.0")], &[]),
            &resolution(&[("axios", "1.1.0")], &[]),
        );
        assert_eq!(diff.dependencies[0].kind, ChangeKind::Upgraded);
        assert_eq!(diff.dependencies[0].bucket, Some(VersionBucket::Minor));
    }

    #[test]
    fn test_patch_upgrade() {
        let diff = diff_resolutions(
            &resolution(&[("axios", "1.0.0")], &[]),
            &resolution(&[("axios", "1.0.1")], &[]),
        );
        assert_eq!(diff.dependencies[0].kind, ChangeKind::Upgraded);
        assert_eq!(diff.dependencies[0].bucket, Some(VersionBucket::Patch));
    }

    #[test]
    fn test_major_downgrade() {
        let diff = diff_resolutions(
            &resolution(&[("axios", "2.0.0")], &[]),
            &resolution(&[("axios", "1.0.0")], &[]),
        );
        assert_eq!(diff.dependencies[0].kind, ChangeKind::Downgraded);
        assert_eq!(diff.dependencies[0].bucket, Some(VersionBucket::Major));
    }

    #[test]
    fn test_prerelease_to_stable_is_patch_upgrade() {
        let diff = diff_resolutions(
            &resolution(&[("pkg", "1.0.0-alpha.1")], &[]),
            &resolution(&[("pkg", "1.0.0")], &[]),
        );
        assert_eq!(diff.dependencies[0].kind, ChangeKind::Upgraded);
        assert_eq!(diff.dependencies[0].bucket, Some(VersionBucket::Patch));
    }

    #[test]
    fn test_stable_to_prerelease_is_patch_downgrade() {
        let diff = diff_resolutions(
            &resolution(&[("pkg", "1.0.0")], &[]),
            &resolution(&[("pkg", "1.0.0-rc.1")], &[]),
        );
        assert_eq!(diff.dependencies[0].kind, ChangeKind::Downgraded);
        assert_eq!(diff.dependencies[0].bucket, Some(VersionBucket::Patch));
    }

    #[test]
    fn test_build_metadata_only_difference_abstains() {
        let diff = diff_resolutions(
            &resolution(&[("pkg", "1.0.0+build.1")], &[]),
            &resolution(&[("pkg", "1.0.0+build.2")], &[]),
        );
        assert!(diff.dependencies.is_empty());
    }

    #[test]
    fn test_non_semver_versions_abstain() {
        let diff = diff_resolutions(
            &resolution(&[("pkg", "invalid")], &[]),
            &resolution(&[("pkg", "also-invalid")], &[]),
        );
        assert!(diff.dependencies.is_empty());
    }

    #[test]
    fn test_prod_and_dev_lists_are_independent() {
        // Same name moving in prod and dev must produce one change in each
        // list, classified separately.
        let source = resolution(&[("shared", "1.0.0")], &[("shared", "2.0.0")]);
        let target = resolution(&[("shared", "1.0.1")], &[("shared", "2.1.0")]);
        let diff = diff_resolutions(&source, &target);
        assert_eq!(diff.dependencies[0].bucket, Some(VersionBucket::Patch));
        assert_eq!(diff.dev_dependencies[0].bucket, Some(VersionBucket::Minor));
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let source = Resolution {
            dependencies: vec![Package::new("dup", "1.0.0"), Package::new("dup", "1.5.0")],
            dev_dependencies: Vec::new(),
        };
        let target = resolution(&[("dup", "2.0.0")], &[]);
        let diff = diff_resolutions(&source, &target);
        assert_eq!(diff.dependencies.len(), 1);
        assert_eq!(diff.dependencies[0].from_version.as_deref(), Some("1.5.0"));
    }

    #[test]
    fn test_mixed_changes_in_one_list() {
        let source = resolution(
            &[("express", "4.17.0"), ("axios", "0.21.0"), ("gone", "1.0.0")],
            &[],
        );
        let target = resolution(
            &[
                ("express", "4.18.0"),
                ("axios", "1.0.0"),
                ("react", "18.2.0"),
            ],
            &[],
        );
        let diff = diff_resolutions(&source, &target);
        assert_eq!(diff.dependencies.len(), 4);

        let by_name = |name: &str| {
            diff.dependencies
                .iter()
                .find(|c| c.name == name)
                .expect("change present")
        };
        assert_eq!(by_name("express").bucket, Some(VersionBucket::Minor));
        assert_eq!(by_name("axios").bucket, Some(VersionBucket::Major));
        assert_eq!(by_name("gone").kind, ChangeKind::Removed);
        assert_eq!(by_name("react").kind, ChangeKind::Added);
    }

    #[test]
    fn test_diff_never_invents_names() {
        let source = resolution(&[("a", "1.0.0")], &[]);
        let target = resolution(&[("b", "1.0.0")], &[]);
        let diff = diff_resolutions(&source, &target);
        for change in &diff.dependencies {
            assert!(change.name == "a" || change.name == "b");
        }
    }
}
