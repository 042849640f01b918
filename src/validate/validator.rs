use async_trait::async_trait;

use super::ValidationOutcome;
use crate::bus::CancelToken;

/// Validates an instance of a request type before its handler runs.
///
/// Implementations must be idempotent: validating the same instance
/// twice yields the same outcome. Async validators may perform I/O
/// (e.g. a storage-backed uniqueness check), and should observe the
/// cancel token on long calls.
///
/// ## Example
///
/// ```ignore
/// struct RegisterStudyValidator;
///
/// #[async_trait]
/// impl Validator<RegisterStudy> for RegisterStudyValidator {
///     async fn validate(&self, cmd: &RegisterStudy, _cancel: CancelToken) -> ValidationOutcome {
///         let mut outcome = ValidationOutcome::pass();
///         if cmd.title.trim().is_empty() {
///             outcome.push("Title", "Title is required.");
///         }
///         outcome
///     }
/// }
/// ```
#[async_trait]
pub trait Validator<T>: Send + Sync {
    /// Validate the instance, returning an ordered list of field errors.
    async fn validate(&self, instance: &T, cancel: CancelToken) -> ValidationOutcome;
}
