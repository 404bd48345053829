//! Errors raised while assembling a parser.
//!
//! All of these point at a mistake in the application's configuration, not
//! at anything the end user typed. Errors in `argv` stay [`clap::Error`].

use thiserror::Error;

use crate::ValidationError;

/// Failure to assemble a parser from an application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No entry is marked as the subcommand selector.
    #[error("configuration error: no selector entry (no entry has subcommand_value set)")]
    MissingSelector,

    /// More than one entry is marked as the subcommand selector.
    #[error("configuration error: multiple selector entries: {}", .0.join(", "))]
    AmbiguousSelector(Vec<String>),

    /// An entry failed a precondition check.
    #[error("configuration error: {0}")]
    Invalid(#[from] ValidationError),
}

/// Convenience alias for results with [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;
