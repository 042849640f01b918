mod bus;
mod outcome;
mod spec;
mod validate;

pub use bus::{
    Bus, BusBuilder, CancelToken, Command, CommandHandler, Query, QueryHandler,
};
pub use outcome::{DispatchResult, ErrorKind, Failure};
pub use spec::{evaluator, Paged, Specification};
pub use validate::{limits, FieldError, ValidationOutcome, Validator};
