//! Error types for sourcescope

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or querying a source scope
#[derive(Error, Debug)]
pub enum SourceError {
    /// `Source::baseline()` was called on a source without a baseline
    #[error("no baseline configured")]
    NoBaseline,

    /// A baseline was supplied but it is the empty string
    #[error("baseline must not be an empty string")]
    EmptyBaseline,

    /// A deprecation trigger name is the empty string
    #[error("deprecation trigger {kind} name must not be empty")]
    EmptyDeprecationTrigger { kind: &'static str },

    /// Invalid glob pattern in a directory filter
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),
}
