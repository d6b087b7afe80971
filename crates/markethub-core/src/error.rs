//! Application-wide error type.
//!
//! MarketHub distinguishes deterministic failures (a missing notification,
//! an ownership mismatch, bad input) from infrastructure failures (storage,
//! cache, transport). The former surface to the caller unchanged and are
//! never retried; the latter are either propagated or, on best-effort side
//! paths, logged and swallowed. [`AppError`] carries enough structure for
//! both: a coarse [`ErrorKind`] for dispatch and an optional boxed cause
//! for diagnostics.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Coarse classification of an [`AppError`].
///
/// Handlers map these onto HTTP statuses; services match on them when a
/// failure changes control flow (everything else just bubbles up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// The token was missing, malformed, or expired.
    Authentication,
    /// The caller is not allowed to do this (wrong owner, wrong role,
    /// banned account).
    Authorization,
    /// The input failed validation.
    Validation,
    /// A uniqueness or concurrent-modification conflict.
    Conflict,
    /// Something unexpected broke.
    Internal,
    /// The relational store failed.
    Database,
    /// The cache backend failed.
    Cache,
    /// The configuration could not be loaded or parsed.
    Configuration,
    /// A value could not be serialized or deserialized.
    Serialization,
}

impl ErrorKind {
    /// Stable machine-readable code for logs and error payloads.
    pub fn code(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
            Self::Database => "database",
            Self::Cache => "cache",
            Self::Configuration => "configuration",
            Self::Serialization => "serialization",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The error type every MarketHub crate returns.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Failure classification.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// The underlying error, when one exists.
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Builds an error without an underlying cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error wrapping the failure that caused it.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A referenced entity does not exist.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// The caller could not be authenticated.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// The caller is not allowed to perform the action.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// The input failed validation.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Something unexpected broke.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// The configuration could not be loaded or parsed.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

// The boxed cause is not clonable; a clone keeps the kind and message and
// drops the chain, which is all the retry-free propagation paths need.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, format!("invalid JSON: {err}"), err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O failure: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("configuration rejected: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_code() {
        let err = AppError::not_found("notification gone");
        assert_eq!(err.to_string(), "not_found: notification gone");
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("disk on fire");
        let err = AppError::with_source(ErrorKind::Internal, "boom", io);
        assert!(err.source.is_some());

        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Internal);
        assert!(cloned.source.is_none());
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = AppError::from(parse_err);
        assert_eq!(err.kind, ErrorKind::Serialization);
    }
}
