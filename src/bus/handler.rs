use async_trait::async_trait;

use super::cancel::CancelToken;
use super::message::{Command, Query};
use crate::outcome::DispatchResult;

/// The single piece of logic bound to one command type.
///
/// Handlers return expected business failures as `Err(Failure)`; a
/// panic out of a handler is an infrastructure fault and is rethrown by
/// the bus, not converted into a result. Handlers should observe the
/// cancel token across long-running I/O.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    /// Execute the command.
    async fn handle(&self, command: C, cancel: CancelToken) -> DispatchResult<C::Output>;
}

/// The single piece of logic bound to one query type.
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    /// Execute the query.
    async fn handle(&self, query: Q, cancel: CancelToken) -> DispatchResult<Q::Output>;
}
