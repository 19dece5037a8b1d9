//! Markdown renderer

use crate::diff::{ChangeKind, PackageChange, ResolutionDiff};

use super::Reporter;
use super::utils::group_by_version_change;

pub struct MarkdownReporter;

impl Reporter for MarkdownReporter {
    fn report(&self, diff: &ResolutionDiff) -> String {
        let mut parts = Vec::new();

        if !diff.dependencies.is_empty() {
            parts.push("## Dependencies".to_string());
            parts.push(format_changes(&diff.dependencies));
        }
        if !diff.dev_dependencies.is_empty() {
            parts.push("## Dev Dependencies".to_string());
            parts.push(format_changes(&diff.dev_dependencies));
        }

        parts.join("\n\n")
    }
}

fn format_changes(changes: &[PackageChange]) -> String {
    let grouped = group_by_version_change(changes);
    let mut lines = Vec::new();

    let sections = [
        ("### Major Updates", &grouped.major),
        ("### Minor Updates", &grouped.minor),
        ("### Patch Updates", &grouped.patch),
        ("### Added Packages", &grouped.added),
        ("### Removed Packages", &grouped.removed),
        ("### Downgraded Packages", &grouped.downgraded),
    ];

    for (heading, group) in sections {
        if group.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(heading.to_string());
        lines.extend(group.iter().map(|c| format!("- {}", format_change(c))));
    }

    lines.join("\n")
}

fn format_change(change: &PackageChange) -> String {
    let from = change.from_version.as_deref().unwrap_or_default();
    let to = change.to_version.as_deref().unwrap_or_default();
    match change.kind {
        ChangeKind::Added => format!("**{}**@`{}` (added)", change.name, to),
        ChangeKind::Removed => format!("**{}**@`{}` (removed)", change.name, from),
        ChangeKind::Upgraded => format!("**{}**: `{}` → `{}`", change.name, from, to),
        ChangeKind::Downgraded => {
            format!("**{}**: `{}` → `{}` (downgraded)", change.name, from, to)
        }
    }
}
