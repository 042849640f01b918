//! Dispatch outcome — the uniform success/failure channel.
//!
//! Every handler returns a [`DispatchResult`]: `Ok` carries the payload
//! (or `()` for fire-and-report commands), `Err` carries a [`Failure`]
//! with a human-readable message and an [`ErrorKind`] so callers can
//! branch on category without string-matching the message. An adapter
//! layer would map `NotFound` to a 404-equivalent, `Conflict` to 409,
//! `ValidationFailed` and `InvalidOperation` to 400, and so on.
//!
//! Accessing the payload of a failed result is structurally loud:
//! `unwrap()` on an `Err` panics. There is no silent defaulting.

use std::fmt;

/// Categorizes a failed dispatch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic, uncategorized failure.
    None,
    /// The requested resource was not found.
    NotFound,
    /// The operation conflicts with the current state.
    Conflict,
    /// The operation is not valid for the current state.
    InvalidOperation,
    /// Input validation failed before the handler ran.
    ValidationFailed,
}

/// An expected, business-level failure returned by a handler or by the
/// validation pass. Infrastructure faults (panics) are never converted
/// into a `Failure` — the bus logs and rethrows those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
    kind: ErrorKind,
}

impl Failure {
    /// Create a generic failure (kind [`ErrorKind::None`]).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::None,
        }
    }

    /// Create a not-found failure.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::NotFound,
        }
    }

    /// Create a conflict failure.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Conflict,
        }
    }

    /// Create an invalid-operation failure.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::InvalidOperation,
        }
    }

    /// Create a validation failure.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::ValidationFailed,
        }
    }

    /// The human-readable error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Failure {}

/// Result of dispatching a command or query.
///
/// `DispatchResult` (no type argument) is the fire-and-report command
/// shape; `DispatchResult<T>` is the value-returning shape.
pub type DispatchResult<T = ()> = Result<T, Failure>;
