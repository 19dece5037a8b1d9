//! requirements.txt scanner
//!
//! Not a lockfile in the strict sense, so this is best-effort: lines that
//! carry no usable exact-ish version are skipped rather than failing the
//! file. Everything is production; pip has no dev concept inside one file.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Package, Resolution};

use super::extract_version_token;

pub(crate) fn parse(content: &str) -> Resolution {
    let mut dependencies = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        // Includes and editable installs reference other sources, not pinned
        // packages.
        if trimmed.starts_with("-r ")
            || trimmed.starts_with("--requirement ")
            || trimmed.starts_with("-e ")
            || trimmed.starts_with("--editable ")
        {
            continue;
        }
        if let Some(package) = parse_package_line(trimmed) {
            dependencies.push(package);
        }
    }

    Resolution {
        dependencies,
        dev_dependencies: Vec::new(),
    }
}

fn parse_package_line(line: &str) -> Option<Package> {
    // Literal patterns, cannot fail to compile.
    #[allow(clippy::unwrap_used)]
    static URL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(.+?)\s*@\s*(https?|git\+|file\+)").unwrap());
    #[allow(clippy::unwrap_used)]
    static EXTRAS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(.+?)\[.+\]\s*(.+)$").unwrap());
    #[allow(clippy::unwrap_used)]
    static SPEC_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(.+?)\s*(==|>=|<=|>|<|~=|!=)\s*(.+)$").unwrap());

    let clean = match line.find('#') {
        Some(i) => line[..i].trim(),
        None => line.trim(),
    };
    if clean.is_empty() {
        return None;
    }

    // URL-based installs have no comparable version.
    if URL_RE.is_match(clean) {
        return None;
    }

    // Extras syntax: name[extra]==1.0.0
    if let Some(caps) = EXTRAS_RE.captures(clean) {
        let name = caps[1].trim();
        if let Some(version) = extract_version_token(caps[2].trim()) {
            if !name.is_empty() {
                return Some(Package::new(name, version));
            }
        }
    }

    let caps = SPEC_RE.captures(clean)?;
    let name = caps[1].trim();
    if name.is_empty() {
        return None;
    }

    if &caps[2] == "==" {
        // Exact pin: take the version verbatim.
        let version = caps[3].split("==").next()?.trim();
        if version.is_empty() {
            return None;
        }
        return Some(Package::new(name, version));
    }

    // Range operators: take the first version-shaped token.
    extract_version_token(caps[3].trim()).map(|version| Package::new(name, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pins() {
        let resolution = parse("flask==2.3.0\nrequests==2.31.0\n");
        assert_eq!(
            resolution.dependencies,
            vec![
                Package::new("flask", "2.3.0"),
                Package::new("requests", "2.31.0")
            ]
        );
        assert!(resolution.dev_dependencies.is_empty());
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let resolution = parse("# header\n\nflask==2.3.0  # inline note\n");
        assert_eq!(resolution.dependencies, vec![Package::new("flask", "2.3.0")]);
    }

    #[test]
    fn test_includes_and_editable_installs_skipped() {
        let resolution = parse(
            "-r base.txt\n--requirement extra.txt\n-e ./local\n--editable ./other\nflask==2.3.0\n",
        );
        assert_eq!(resolution.dependencies.len(), 1);
    }

    #[test]
    fn test_url_installs_skipped() {
        let resolution = parse(
            "pkg @ https://example.com/pkg.whl\nother @ git+https://example.com/r.git\nflask==2.3.0\n",
        );
        assert_eq!(resolution.dependencies, vec![Package::new("flask", "2.3.0")]);
    }

    #[test]
    fn test_extras_are_stripped() {
        let resolution = parse("uvicorn[standard]==0.22.0\n");
        assert_eq!(
            resolution.dependencies,
            vec![Package::new("uvicorn", "0.22.0")]
        );
    }

    #[test]
    fn test_range_operator_takes_first_version_token() {
        let resolution = parse("requests>=2.28.0,<3.0.0\n");
        assert_eq!(
            resolution.dependencies,
            vec![Package::new("requests", "2.28.0")]
        );
    }

    #[test]
    fn test_unversioned_lines_skipped() {
        let resolution = parse("flask\nrequests\n");
        assert!(resolution.dependencies.is_empty());
    }

    #[test]
    fn test_compatible_release_operator() {
        let resolution = parse("django~=4.2.0\n");
        assert_eq!(resolution.dependencies, vec![Package::new("django", "4.2.0")]);
    }
}
