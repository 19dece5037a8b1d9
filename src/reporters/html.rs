//! HTML renderer
//!
//! Emits a self-contained document with an embedded stylesheet.

use crate::diff::{ChangeKind, PackageChange, ResolutionDiff};

use super::Reporter;
use super::utils::group_by_version_change;

pub struct HtmlReporter;

impl Reporter for HtmlReporter {
    fn report(&self, diff: &ResolutionDiff) -> String {
        let mut parts = vec![
            "<!DOCTYPE html>".to_string(),
            "<html>".to_string(),
            "<head>".to_string(),
            "<meta charset='utf-8'>".to_string(),
            "<title>Package Changes</title>".to_string(),
            "<style>".to_string(),
            STYLES.to_string(),
            "</style>".to_string(),
            "</head>".to_string(),
            "<body>".to_string(),
        ];

        if !diff.dependencies.is_empty() {
            parts.push("<h1>Dependencies</h1>".to_string());
            parts.push(format_changes(&diff.dependencies));
        }
        if !diff.dev_dependencies.is_empty() {
            parts.push("<h1>Dev Dependencies</h1>".to_string());
            parts.push(format_changes(&diff.dev_dependencies));
        }

        parts.push("</body>".to_string());
        parts.push("</html>".to_string());
        parts.join("\n")
    }
}

fn format_changes(changes: &[PackageChange]) -> String {
    let grouped = group_by_version_change(changes);
    let mut parts = Vec::new();

    let sections = [
        ("major", "Major Updates", &grouped.major),
        ("minor", "Minor Updates", &grouped.minor),
        ("patch", "Patch Updates", &grouped.patch),
        ("added", "Added Packages", &grouped.added),
        ("removed", "Removed Packages", &grouped.removed),
        ("downgraded", "Downgraded Packages", &grouped.downgraded),
    ];

    for (class, heading, group) in sections {
        if group.is_empty() {
            continue;
        }
        parts.push(format!("<h2 class='{class}'>{heading}</h2>"));
        parts.push("<ul>".to_string());
        parts.extend(group.iter().map(|c| format!("<li>{}</li>", format_change(c))));
        parts.push("</ul>".to_string());
    }

    parts.join("\n")
}

fn format_change(change: &PackageChange) -> String {
    let name = &change.name;
    let from = change.from_version.as_deref().unwrap_or_default();
    let to = change.to_version.as_deref().unwrap_or_default();
    match change.kind {
        ChangeKind::Added => format!("<span class='added'>+ {name}@{to}</span> (added)"),
        ChangeKind::Removed => format!("<span class='removed'>- {name}@{from}</span> (removed)"),
        ChangeKind::Upgraded => {
            format!("<span class='upgraded'>{name}</span>: <code>{from}</code> → <code>{to}</code>")
        }
        ChangeKind::Downgraded => format!(
            "<span class='downgraded'>{name}</span>: <code>{from}</code> → <code>{to}</code> (downgraded)"
        ),
    }
}

const STYLES: &str = "\
      body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
        max-width: 800px;
        margin: 0 auto;
        padding: 20px;
        line-height: 1.6;
      }
      h1 {
        color: #333;
        border-bottom: 2px solid #333;
        padding-bottom: 10px;
      }
      h2.major {
        color: #d32f2f;
      }
      h2.minor {
        color: #f57c00;
      }
      h2.patch {
        color: #388e3c;
      }
      ul {
        list-style-type: none;
        padding-left: 0;
      }
      li {
        margin: 5px 0;
        padding: 5px;
        background: #f5f5f5;
        border-radius: 3px;
      }
      code {
        background: #e0e0e0;
        padding: 2px 6px;
        border-radius: 3px;
        font-family: 'Courier New', monospace;
      }
      .added {
        color: #388e3c;
        font-weight: bold;
      }
      .removed {
        color: #d32f2f;
        font-weight: bold;
      }
      .upgraded {
        font-weight: bold;
      }";
