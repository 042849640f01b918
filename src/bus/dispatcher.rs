//! The bus — validates, resolves, invokes, times, and logs.

use std::any::TypeId;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;

use super::binding::{BindingCache, CommandBinding, QueryBinding};
use super::cancel::CancelToken;
use super::message::{Command, Query};
use super::registry::{short_type_name, BusBuilder, Registry};
use crate::outcome::DispatchResult;

/// Routes each command and query to the one handler bound to its type.
///
/// The bus holds no per-call state. The only shared mutable structure
/// is the binding cache, which is lazily populated on first dispatch of
/// each request type and read-only thereafter. Two concurrent
/// dispatches never order against each other; callers needing ordering
/// must serialize themselves.
///
/// Expected failures (validation, business outcomes) come back as
/// `Err(Failure)` and are logged at most at WARN. A panic out of a
/// handler is logged once at ERROR and rethrown — something is broken,
/// and an outer boundary decides the user-visible behavior.
pub struct Bus {
    registry: Registry,
    command_bindings: BindingCache,
    query_bindings: BindingCache,
}

impl Bus {
    /// Start building a bus. Registration happens exactly once, up
    /// front; the result is read-only.
    pub fn builder() -> BusBuilder {
        BusBuilder::new()
    }

    pub(crate) fn new(
        registry: Registry,
        command_bindings: BindingCache,
        query_bindings: BindingCache,
    ) -> Self {
        Self {
            registry,
            command_bindings,
            query_bindings,
        }
    }

    /// Dispatch a command to its handler.
    ///
    /// Runs the command's validator first if one is registered; a
    /// non-empty outcome short-circuits with a `ValidationFailed`
    /// failure and the handler is never invoked.
    ///
    /// # Panics
    ///
    /// Panics if no handler is registered for `C` (a startup wiring
    /// error, not a business failure), and rethrows any panic raised by
    /// the handler itself after logging it.
    pub async fn send<C: Command>(
        &self,
        command: C,
        cancel: CancelToken,
    ) -> DispatchResult<C::Output> {
        let name = short_type_name::<C>();
        let response = short_type_name::<C::Output>();
        tracing::debug!(command = name, response, "dispatching command");

        if let Some(failure) = self.validate(&command, cancel.clone()).await {
            return Err(failure);
        }

        let binding = self.command_binding::<C>();
        let handler = binding.resolve();

        let started = Instant::now();
        let result = AssertUnwindSafe(handler.handle(command, cancel))
            .catch_unwind()
            .await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(Ok(value)) => {
                tracing::debug!(command = name, elapsed_ms, "command succeeded");
                Ok(value)
            }
            Ok(Err(failure)) => {
                tracing::warn!(command = name, error = %failure, elapsed_ms, "command failed");
                Err(failure)
            }
            Err(panic) => {
                tracing::error!(command = name, elapsed_ms, "command handler panicked");
                std::panic::resume_unwind(panic)
            }
        }
    }

    /// Dispatch a query to its handler. Same pipeline as [`send`](Bus::send);
    /// queries differ only in intent and always carry a payload.
    ///
    /// # Panics
    ///
    /// Panics if no handler is registered for `Q`, and rethrows handler
    /// panics after logging them.
    pub async fn query<Q: Query>(
        &self,
        query: Q,
        cancel: CancelToken,
    ) -> DispatchResult<Q::Output> {
        let name = short_type_name::<Q>();
        let response = short_type_name::<Q::Output>();
        tracing::debug!(query = name, response, "dispatching query");

        if let Some(failure) = self.validate(&query, cancel.clone()).await {
            return Err(failure);
        }

        let binding = self.query_binding::<Q>();
        let handler = binding.resolve();

        let started = Instant::now();
        let result = AssertUnwindSafe(handler.handle(query, cancel))
            .catch_unwind()
            .await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(Ok(value)) => {
                tracing::debug!(query = name, elapsed_ms, "query succeeded");
                Ok(value)
            }
            Ok(Err(failure)) => {
                tracing::warn!(query = name, error = %failure, elapsed_ms, "query failed");
                Err(failure)
            }
            Err(panic) => {
                tracing::error!(query = name, elapsed_ms, "query handler panicked");
                std::panic::resume_unwind(panic)
            }
        }
    }

    /// Number of handler bindings resolved and cached so far.
    /// Diagnostic only; after warm-up this equals the number of
    /// distinct request types dispatched.
    pub fn cached_bindings(&self) -> usize {
        self.command_bindings.len() + self.query_bindings.len()
    }

    /// Run the validator registered for `T`, if any. `None` means the
    /// request may proceed; validators are resolved fresh per call,
    /// like handlers.
    async fn validate<T: Send + Sync + 'static>(
        &self,
        request: &T,
        cancel: CancelToken,
    ) -> Option<crate::outcome::Failure> {
        let registration = self.registry.validator::<T>()?;
        let validator = (registration.factory)();
        let outcome = validator.validate(request, cancel).await;
        if outcome.is_valid() {
            None
        } else {
            Some(outcome.into_failure())
        }
    }

    fn command_binding<C: Command>(&self) -> Arc<CommandBinding<C>> {
        let key = TypeId::of::<C>();
        if let Some(binding) = self.command_bindings.get::<CommandBinding<C>>(key) {
            return binding;
        }
        let registration = self.registry.command::<C>();
        self.command_bindings
            .install(key, Arc::new(CommandBinding::new(registration)))
    }

    fn query_binding<Q: Query>(&self) -> Arc<QueryBinding<Q>> {
        let key = TypeId::of::<Q>();
        if let Some(binding) = self.query_bindings.get::<QueryBinding<Q>>(key) {
            return binding;
        }
        let registration = self.registry.query::<Q>();
        self.query_bindings
            .install(key, Arc::new(QueryBinding::new(registration)))
    }
}
