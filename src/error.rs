//! Error types and handling for lockdiff
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every failure in the core is fatal and propagates to the caller; there is
//! no recoverable-error path. The Ruby and requirements.txt resolvers are the
//! sole exception: they skip unparseable lines instead of failing the file.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for lockdiff operations
#[derive(Error, Diagnostic, Debug)]
pub enum LockdiffError {
    // File system errors
    #[error("Failed to read lockfile '{path}': {reason}")]
    #[diagnostic(code(lockdiff::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write report to '{path}': {reason}")]
    #[diagnostic(code(lockdiff::fs::write_failed))]
    ReportWriteFailed { path: String, reason: String },

    // Resolver errors
    #[error("Failed to parse {format} lockfile '{path}': {reason}")]
    #[diagnostic(code(lockdiff::resolver::parse_failed))]
    ParseFailed {
        format: &'static str,
        path: String,
        reason: String,
    },

    #[error("Unsupported lockfileVersion: {version}")]
    #[diagnostic(
        code(lockdiff::resolver::unsupported_lockfile_version),
        help("Only npm lockfile versions 1, 2 and 3 are supported")
    )]
    UnsupportedLockfileVersion { version: u64 },

    #[error("Unrecognized Python lockfile '{path}': {detail}")]
    #[diagnostic(
        code(lockdiff::resolver::python_format_mismatch),
        help("Supported Python formats: requirements.txt, Pipfile.lock, poetry.lock, pdm.lock")
    )]
    PythonFormatMismatch { path: String, detail: String },

    // Configuration errors, raised before any file is read
    #[error("Unknown resolver: {name}")]
    #[diagnostic(
        code(lockdiff::registry::unknown_resolver),
        help("Available resolvers: npm, pnpm, yarn, composer, ruby, python")
    )]
    UnknownResolver { name: String },

    // The field is named source_path rather than source so thiserror does
    // not treat it as the error's source() chain.
    #[error(
        "No resolver found for source or target files. Source: {source_path}, Target: {target_path}"
    )]
    #[diagnostic(
        code(lockdiff::registry::no_resolver_found),
        help("Use --resolver to specify the lockfile format explicitly")
    )]
    NoResolverFound {
        source_path: String,
        target_path: String,
    },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LockdiffError>;
