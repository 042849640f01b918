//! Cached handler bindings.
//!
//! A binding is the resolved, typed association between a request type
//! and its handler factory. It is computed on the first dispatch of a
//! request type and kept for the process lifetime; racing first-time
//! resolutions are deduplicated so at most one binding is ever
//! installed per type. After warm-up the cache is effectively read-only
//! and lookups take the read path.
//!
//! Bindings carry metadata only — handler *instances* are resolved from
//! the factory on every dispatch, so no handler state leaks across
//! requests.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::handler::{CommandHandler, QueryHandler};
use super::message::{Command, Query};
use super::registry::{short_type_name, CommandRegistration, QueryRegistration};

/// Resolved binding for a command type.
pub(crate) struct CommandBinding<C: Command> {
    registration: Arc<CommandRegistration<C>>,
}

impl<C: Command> CommandBinding<C> {
    pub(crate) fn new(registration: Arc<CommandRegistration<C>>) -> Self {
        Self { registration }
    }

    /// Resolve a fresh handler instance for one dispatch.
    pub(crate) fn resolve(&self) -> Box<dyn CommandHandler<C>> {
        (self.registration.factory)()
    }
}

/// Resolved binding for a query type.
pub(crate) struct QueryBinding<Q: Query> {
    registration: Arc<QueryRegistration<Q>>,
}

impl<Q: Query> QueryBinding<Q> {
    pub(crate) fn new(registration: Arc<QueryRegistration<Q>>) -> Self {
        Self { registration }
    }

    /// Resolve a fresh handler instance for one dispatch.
    pub(crate) fn resolve(&self) -> Box<dyn QueryHandler<Q>> {
        (self.registration.factory)()
    }
}

/// Read-mostly map of request `TypeId` to type-erased binding.
pub(crate) struct BindingCache {
    entries: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl BindingCache {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fast path: fetch an already-installed binding.
    pub(crate) fn get<B: Any + Send + Sync>(&self, key: TypeId) -> Option<Arc<B>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&key).map(|entry| {
            entry.clone().downcast::<B>().unwrap_or_else(|_| {
                panic!("binding cached for {} has the wrong shape", short_type_name::<B>())
            })
        })
    }

    /// Install a binding unless one is already present, returning the
    /// effective binding either way. First writer wins; a racing
    /// caller's freshly built binding is discarded, not an error.
    pub(crate) fn install<B: Any + Send + Sync>(&self, key: TypeId, binding: Arc<B>) -> Arc<B> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries
            .entry(key)
            .or_insert_with(|| binding as Arc<dyn Any + Send + Sync>);
        entry.clone().downcast::<B>().unwrap_or_else(|_| {
            panic!("binding cached for {} has the wrong shape", short_type_name::<B>())
        })
    }

    /// Number of bindings installed so far.
    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
