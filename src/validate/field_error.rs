//! Field-level validation errors and the per-call outcome.

use serde::{Deserialize, Serialize};

use crate::outcome::Failure;

/// A single field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field that failed validation.
    pub field: String,
    /// Human-readable message, e.g. `"Title is required."`.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The result of one validation pass: an ordered list of field errors.
///
/// An empty list means the request passed. Produced fresh per call,
/// never retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: Vec<FieldError>,
}

impl ValidationOutcome {
    /// A passing outcome with no errors.
    pub fn pass() -> Self {
        Self::default()
    }

    /// An outcome carrying the given errors.
    pub fn with_errors(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Append a field error, preserving insertion order.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Whether the validation passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The ordered field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Collapse the errors into a single classified failure.
    ///
    /// The message concatenates `"field: message"` pairs joined by `"; "`.
    pub fn into_failure(self) -> Failure {
        let message = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Failure::validation_failed(message)
    }
}
