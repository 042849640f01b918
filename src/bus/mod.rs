//! Command/query bus — typed dispatch of requests to their handlers.
//!
//! Every mutation ("command") and every read ("query") is a plain value
//! object routed to exactly one handler. The bus wraps validation,
//! handler resolution, timing, and logging around each call and returns
//! a uniform [`DispatchResult`](crate::DispatchResult).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Bus                                 │
//! │  send(command, cancel) / query(query, cancel)               │
//! │  validate → resolve binding → resolve handler → time → log  │
//! └─────────────────────────────────────────────────────────────┘
//!          │                               │
//!          ▼                               ▼
//! ┌─────────────────────┐    ┌─────────────────────────────────┐
//! │      Registry        │    │          BindingCache           │
//! │  built once at start │    │  per-request-type binding, lazy │
//! │  TypeId → factory    │    │  first-write, read-only after   │
//! └─────────────────────┘    └─────────────────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │   CommandHandler<C> / QueryHandler<Q> / Validator<T>        │
//! │   fresh instance per dispatch, from the registered factory  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let bus = Bus::builder()
//!     .command::<RegisterStudy, _, _>(move || RegisterStudyHandler::new(store.clone()))
//!     .validator::<RegisterStudy, _, _>(|| RegisterStudyValidator)
//!     .query::<SearchStudies, _, _>(move || SearchStudiesHandler::new(store.clone()))
//!     .build();
//!
//! let result = bus.send(RegisterStudy { .. }, CancelToken::new()).await;
//! ```

mod binding;
mod cancel;
mod dispatcher;
mod handler;
mod message;
mod registry;

pub use cancel::CancelToken;
pub use dispatcher::Bus;
pub use handler::{CommandHandler, QueryHandler};
pub use message::{Command, Query};
pub use registry::BusBuilder;
