//! Specifications — declarative filter/sort/paging over an entity type.
//!
//! A [`Specification`] describes *what* subset of an entity set a
//! caller wants, independent of any storage engine or query language.
//! The [`evaluator`] turns a specification into an executed query over
//! an in-memory source: filter, then a stable sort, then skip/take.
//! Any backing store that supports predicates, a single-key sort, and
//! numeric skip/take can evaluate the same description.
//!
//! ## Usage
//!
//! ```ignore
//! let spec = Specification::new()
//!     .filter(|s: &StudyRecord| s.active)
//!     .filter(|s: &StudyRecord| s.research_area == "oncology")
//!     .order_by_descending(|s: &StudyRecord| s.enrolled)
//!     .page_number(2, 20);
//!
//! let page = evaluator::paged(&studies, &spec, 2, 20);
//! ```
//!
//! Filters AND together; there is no OR combinator. At most one sort is
//! active — a later `order_by` replaces an earlier one.

pub mod evaluator;
mod paged;
mod specification;

pub use paged::Paged;
pub use specification::Specification;
