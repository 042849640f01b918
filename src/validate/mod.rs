//! Validation pipeline — per-request-type optional validators.
//!
//! The bus looks up a [`Validator`] registered for a request's concrete
//! type before resolving its handler. If none is registered the step is
//! a no-op (pass). A non-empty [`ValidationOutcome`] is collapsed into a
//! single `ValidationFailed` [`Failure`](crate::Failure) and the handler
//! is never invoked.
//!
//! Validators may be async (storage-backed uniqueness checks and the
//! like), but they must be idempotent and safe to call repeatedly with
//! the same input.

mod field_error;
pub mod limits;
mod validator;

pub use field_error::{FieldError, ValidationOutcome};
pub use validator::Validator;
