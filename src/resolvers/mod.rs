//! Format resolvers and the resolver registry
//!
//! Each supported lockfile format implements [`Resolver`]: a pure filename
//! test plus a parse of the file into a normalized [`Resolution`]. The
//! registry is a plain ordered list with name lookup; no dynamic loading.

pub mod composer;
pub mod npm;
pub mod pnpm;
pub mod python;
pub mod ruby;
pub mod yarn;

use std::fs;
use std::path::Path;

use crate::error::{LockdiffError, Result};
use crate::model::Resolution;

pub use composer::ComposerResolver;
pub use npm::NpmResolver;
pub use pnpm::PnpmResolver;
pub use python::PythonResolver;
pub use ruby::RubyResolver;
pub use yarn::YarnResolver;

/// Contract every lockfile format implements
pub trait Resolver {
    /// Short format name, also the `--resolver` flag value
    fn format(&self) -> &'static str;

    /// Pure filename test: does this resolver handle the file at `path`?
    ///
    /// Matches the case-insensitive basename against the format's canonical
    /// lockfile name. Must not read file content.
    fn can_resolve(&self, path: &Path) -> bool;

    /// Read and parse the lockfile into a [`Resolution`]
    fn resolve(&self, path: &Path) -> Result<Resolution>;
}

/// Read a lockfile to a string, surfacing the underlying I/O error
pub(crate) fn read_lockfile(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| LockdiffError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Case-insensitive basename of a path
pub(crate) fn basename_lower(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Registry of all supported resolvers
pub struct ResolverRegistry {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverRegistry {
    /// Create a registry with the given resolvers
    pub fn new(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    /// Create a registry with all built-in resolvers
    pub fn with_default_resolvers() -> Self {
        Self::new(vec![
            Box::new(NpmResolver),
            Box::new(PnpmResolver),
            Box::new(YarnResolver),
            Box::new(ComposerResolver),
            Box::new(RubyResolver),
            Box::new(PythonResolver),
        ])
    }

    /// Get a resolver by format name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Option<&dyn Resolver> {
        let name = name.to_lowercase();
        self.resolvers
            .iter()
            .find(|r| r.format() == name)
            .map(Box::as_ref)
    }

    /// Find the first resolver whose filename test matches `path`
    pub fn find_for_path(&self, path: &Path) -> Option<&dyn Resolver> {
        self.resolvers
            .iter()
            .find(|r| r.can_resolve(path))
            .map(Box::as_ref)
    }

    /// Select one resolver for the source/target pair
    ///
    /// An explicit name wins and is applied to both files regardless of
    /// their own filenames. Otherwise the source file's basename is tried
    /// first, then the target's; both failing is a hard error raised before
    /// any file is read.
    pub fn select(
        &self,
        source: &Path,
        target: &Path,
        name: Option<&str>,
    ) -> Result<&dyn Resolver> {
        if let Some(name) = name {
            return self
                .get_by_name(name)
                .ok_or_else(|| LockdiffError::UnknownResolver {
                    name: name.to_string(),
                });
        }

        self.find_for_path(source)
            .or_else(|| self.find_for_path(target))
            .ok_or_else(|| LockdiffError::NoResolverFound {
                source_path: source.display().to_string(),
                target_path: target.display().to_string(),
            })
    }

    /// All registered resolvers, in match order
    pub fn all(&self) -> &[Box<dyn Resolver>] {
        &self.resolvers
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::with_default_resolvers()
    }
}
