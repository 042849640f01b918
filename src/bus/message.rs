//! Request marker traits.
//!
//! Commands and queries are both immutable value objects — the
//! distinction is intent: commands describe a mutation, queries a read.
//! A request is created for a single dispatch and consumed by its
//! handler.

/// A request describing an intended mutation.
///
/// `Output = ()` is the fire-and-report shape; any other output type is
/// the value-returning shape. Each command type is bound to exactly one
/// [`CommandHandler`](super::CommandHandler).
pub trait Command: Send + Sync + 'static {
    /// Payload carried on success.
    type Output: Send + 'static;
}

/// A request describing a read. Queries always return a payload, and by
/// convention never mutate shared state (the bus does not enforce this).
pub trait Query: Send + Sync + 'static {
    /// Payload carried on success.
    type Output: Send + 'static;
}
