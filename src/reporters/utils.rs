//! Shared change grouping for the renderers

use crate::diff::{ChangeKind, PackageChange, VersionBucket};

/// Changes bucketed the way every renderer presents them
#[derive(Default)]
pub(crate) struct GroupedChanges<'a> {
    pub major: Vec<&'a PackageChange>,
    pub minor: Vec<&'a PackageChange>,
    pub patch: Vec<&'a PackageChange>,
    pub added: Vec<&'a PackageChange>,
    pub removed: Vec<&'a PackageChange>,
    pub downgraded: Vec<&'a PackageChange>,
}

pub(crate) fn group_by_version_change(changes: &[PackageChange]) -> GroupedChanges<'_> {
    let mut grouped = GroupedChanges::default();

    for change in changes {
        match change.kind {
            ChangeKind::Upgraded => match change.bucket {
                Some(VersionBucket::Major) => grouped.major.push(change),
                Some(VersionBucket::Minor) => grouped.minor.push(change),
                Some(VersionBucket::Patch) => grouped.patch.push(change),
                None => {}
            },
            ChangeKind::Downgraded => grouped.downgraded.push(change),
            ChangeKind::Added => grouped.added.push(change),
            ChangeKind::Removed => grouped.removed.push(change),
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(name: &str, kind: ChangeKind, bucket: Option<VersionBucket>) -> PackageChange {
        PackageChange {
            name: name.to_string(),
            kind,
            bucket,
            from_version: None,
            to_version: None,
        }
    }

    #[test]
    fn test_grouping() {
        let changes = vec![
            change("a", ChangeKind::Upgraded, Some(VersionBucket::Major)),
            change("b", ChangeKind::Upgraded, Some(VersionBucket::Minor)),
            change("c", ChangeKind::Upgraded, Some(VersionBucket::Patch)),
            change("d", ChangeKind::Added, None),
            change("e", ChangeKind::Removed, None),
            change("f", ChangeKind::Downgraded, Some(VersionBucket::Major)),
        ];
        let grouped = group_by_version_change(&changes);
        assert_eq!(grouped.major.len(), 1);
        assert_eq!(grouped.minor.len(), 1);
        assert_eq!(grouped.patch.len(), 1);
        assert_eq!(grouped.added.len(), 1);
        assert_eq!(grouped.removed.len(), 1);
        assert_eq!(grouped.downgraded.len(), 1);
    }

    #[test]
    fn test_downgrades_group_together_regardless_of_bucket() {
        let changes = vec![
            change("a", ChangeKind::Downgraded, Some(VersionBucket::Patch)),
            change("b", ChangeKind::Downgraded, Some(VersionBucket::Major)),
        ];
        let grouped = group_by_version_change(&changes);
        assert_eq!(grouped.downgraded.len(), 2);
        assert!(grouped.major.is_empty());
    }
}
