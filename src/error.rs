//! Errors returned while registering and removing routes.

use hyper::Method;
use thiserror::Error;

/// Represents errors that can occur when inserting a new route.
///
/// A failed insertion never changes the tree: the caller can retry with a
/// corrected pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// The pattern is empty or does not start with `/`.
    #[error("path must begin with '/' in path '{path}'")]
    MissingLeadingSlash { path: String },

    /// A `:` or `*` without a name.
    #[error("wildcards must be named with a non-empty name in path '{path}'")]
    EmptyWildcardName { path: String },

    /// More than one wildcard marker in a single path segment.
    #[error("only one wildcard per path segment is allowed, has: '{segment}' in path '{path}'")]
    TooManyWildcards { segment: String, path: String },

    /// A catch-all that is followed by more path segments.
    #[error("catch-all routes are only allowed at the end of the path in path '{path}'")]
    CatchAllNotAtEnd { path: String },

    /// A catch-all that does not start a path segment.
    #[error("no / before catch-all in path '{path}'")]
    MissingSlashBeforeCatchAll { path: String },

    /// A wildcard where literal children exist, or a literal segment where a
    /// wildcard child exists.
    #[error("'{path}' conflicts with an existing wildcard or static route at prefix '{prefix}'")]
    WildcardConflict { path: String, prefix: String },

    /// A parameter whose name differs from the one already registered at the
    /// same position.
    #[error("wildcard '{wildcard}' in path '{path}' conflicts with existing wildcard '{existing}' in existing prefix '{prefix}'")]
    WildcardNameConflict {
        wildcard: String,
        path: String,
        existing: String,
        prefix: String,
    },

    /// A pattern continuing past, or replacing the segment root of, a
    /// catch-all.
    #[error("'{path}' conflicts with the catch-all at prefix '{prefix}'")]
    CatchAllConflict { path: String, prefix: String },

    /// The exact pattern already has a value.
    #[error("path '{path}' has already been registered")]
    AlreadyRegistered { path: String },
}

/// The error type for router registration and removal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Insert(#[from] InsertError),

    #[error("method '{0}' is not supported")]
    UnsupportedMethod(Method),

    #[error("no route registered for {method} '{path}'")]
    NotRegistered { method: Method, path: String },
}
