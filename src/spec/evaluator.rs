//! Turns a [`Specification`] into an executed query over an in-memory
//! source.
//!
//! [`apply`] runs filter → sort → skip → take, in that order. [`count`]
//! runs the filter only — sort and paging are irrelevant to a count and
//! are skipped. Both are deterministic: the sort is stable, so the same
//! specification over an unchanged source yields the same sequence and
//! the same count every time.

use super::paged::Paged;
use super::specification::Specification;

/// Apply the specification: filter, stable sort, then the skip/take
/// window. Returns the ordered subsequence.
pub fn apply<T: Clone + 'static>(source: &[T], spec: &Specification<T>) -> Vec<T> {
    let mut items: Vec<T> = source
        .iter()
        .filter(|item| spec.matches(item))
        .cloned()
        .collect();

    if let Some(sort) = spec.sort() {
        items.sort_by(|a, b| (sort.compare)(a, b));
    }

    let skip = spec.skip().unwrap_or(0);
    if skip > 0 {
        items.drain(..skip.min(items.len()));
    }
    if let Some(take) = spec.take() {
        items.truncate(take);
    }

    items
}

/// Count the items matching the specification's filter. Paging on the
/// specification never changes the count.
pub fn count<T: 'static>(source: &[T], spec: &Specification<T>) -> usize {
    source.iter().filter(|item| spec.matches(item)).count()
}

/// Evaluate the specification and wrap the window in a [`Paged`]
/// envelope: items from [`apply`], total from [`count`] (unpaged).
/// `page`/`page_size` are echoed into the envelope and should describe
/// the same window the specification's skip/take was built from.
pub fn paged<T: Clone + 'static>(
    source: &[T],
    spec: &Specification<T>,
    page: usize,
    page_size: usize,
) -> Paged<T> {
    let total_count = count(source, spec);
    let items = apply(source, spec);
    Paged::new(items, total_count, page, page_size)
}
