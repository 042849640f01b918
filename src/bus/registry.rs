//! Startup-time handler registry.
//!
//! Runtime type scanning has no place here: each handler and validator
//! is registered through a generic-constrained builder method that
//! captures a typed factory in a `TypeId`-keyed table. Registration
//! happens exactly once at process start; the table is read-only for
//! the rest of the process lifetime. Registering two handlers for the
//! same request type is rejected at startup rather than silently
//! overwritten.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use super::binding::BindingCache;
use super::dispatcher::Bus;
use super::handler::{CommandHandler, QueryHandler};
use super::message::{Command, Query};
use crate::validate::Validator;

/// Short (unqualified) name of a type, for log events and panics.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

type Entry = Arc<dyn Any + Send + Sync>;

/// Typed registration for a command handler: the factory runs once per
/// dispatch, so handler instances are per-call.
pub(crate) struct CommandRegistration<C: Command> {
    pub(crate) factory: Box<dyn Fn() -> Box<dyn CommandHandler<C>> + Send + Sync>,
}

/// Typed registration for a query handler.
pub(crate) struct QueryRegistration<Q: Query> {
    pub(crate) factory: Box<dyn Fn() -> Box<dyn QueryHandler<Q>> + Send + Sync>,
}

/// Typed registration for a validator.
pub(crate) struct ValidatorRegistration<T> {
    pub(crate) factory: Box<dyn Fn() -> Box<dyn Validator<T>> + Send + Sync>,
}

/// Process-wide registration table, closed after [`BusBuilder::build`].
pub(crate) struct Registry {
    commands: HashMap<TypeId, Entry>,
    queries: HashMap<TypeId, Entry>,
    validators: HashMap<TypeId, Entry>,
}

impl Registry {
    /// Look up the command registration for `C`.
    ///
    /// Dispatching an unregistered request is a caller programming
    /// error, so a missing or wrong-shaped entry fails fast.
    pub(crate) fn command<C: Command>(&self) -> Arc<CommandRegistration<C>> {
        let entry = self
            .commands
            .get(&TypeId::of::<C>())
            .unwrap_or_else(|| {
                panic!(
                    "no command handler registered for {}",
                    short_type_name::<C>()
                )
            })
            .clone();
        entry.downcast::<CommandRegistration<C>>().unwrap_or_else(|_| {
            panic!(
                "command registration for {} has the wrong shape",
                short_type_name::<C>()
            )
        })
    }

    /// Look up the query registration for `Q`. Fails fast when absent.
    pub(crate) fn query<Q: Query>(&self) -> Arc<QueryRegistration<Q>> {
        let entry = self
            .queries
            .get(&TypeId::of::<Q>())
            .unwrap_or_else(|| {
                panic!("no query handler registered for {}", short_type_name::<Q>())
            })
            .clone();
        entry.downcast::<QueryRegistration<Q>>().unwrap_or_else(|_| {
            panic!(
                "query registration for {} has the wrong shape",
                short_type_name::<Q>()
            )
        })
    }

    /// Look up the validator registered for request type `T`, if any.
    /// Absence is not an error — validation is simply skipped.
    pub(crate) fn validator<T: 'static>(&self) -> Option<Arc<ValidatorRegistration<T>>> {
        self.validators.get(&TypeId::of::<T>()).map(|entry| {
            entry.clone().downcast::<ValidatorRegistration<T>>().unwrap_or_else(|_| {
                panic!(
                    "validator registration for {} has the wrong shape",
                    short_type_name::<T>()
                )
            })
        })
    }
}

/// Builder for a [`Bus`] — the one place handlers and validators are
/// wired up.
///
/// Factories are invoked once per dispatch; a handler that needs shared
/// state (a repository, a connection pool) captures it in the factory
/// closure and clones it into each instance.
#[derive(Default)]
pub struct BusBuilder {
    commands: HashMap<TypeId, Entry>,
    queries: HashMap<TypeId, Entry>,
    validators: HashMap<TypeId, Entry>,
}

impl BusBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for command type `C`.
    ///
    /// # Panics
    ///
    /// Panics if a handler for `C` is already registered — the binding
    /// cardinality is 1:1 and duplicates are a startup configuration
    /// error.
    pub fn command<C, H, F>(mut self, factory: F) -> Self
    where
        C: Command,
        H: CommandHandler<C> + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let registration = Arc::new(CommandRegistration::<C> {
            factory: Box::new(move || Box::new(factory())),
        });
        let previous = self.commands.insert(TypeId::of::<C>(), registration);
        assert!(
            previous.is_none(),
            "duplicate command handler registration for {}",
            short_type_name::<C>()
        );
        self
    }

    /// Register the handler for query type `Q`.
    ///
    /// # Panics
    ///
    /// Panics if a handler for `Q` is already registered.
    pub fn query<Q, H, F>(mut self, factory: F) -> Self
    where
        Q: Query,
        H: QueryHandler<Q> + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let registration = Arc::new(QueryRegistration::<Q> {
            factory: Box::new(move || Box::new(factory())),
        });
        let previous = self.queries.insert(TypeId::of::<Q>(), registration);
        assert!(
            previous.is_none(),
            "duplicate query handler registration for {}",
            short_type_name::<Q>()
        );
        self
    }

    /// Register the validator for request type `T` (a command or query
    /// type). At most one validator per request type.
    ///
    /// # Panics
    ///
    /// Panics if a validator for `T` is already registered.
    pub fn validator<T, V, F>(mut self, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        V: Validator<T> + 'static,
        F: Fn() -> V + Send + Sync + 'static,
    {
        let registration = Arc::new(ValidatorRegistration::<T> {
            factory: Box::new(move || Box::new(factory())),
        });
        let previous = self.validators.insert(TypeId::of::<T>(), registration);
        assert!(
            previous.is_none(),
            "duplicate validator registration for {}",
            short_type_name::<T>()
        );
        self
    }

    /// Close the registry and build the bus.
    pub fn build(self) -> Bus {
        Bus::new(
            Registry {
                commands: self.commands,
                queries: self.queries,
                validators: self.validators,
            },
            BindingCache::new(),
            BindingCache::new(),
        )
    }
}
