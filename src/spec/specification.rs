use std::cmp::Ordering;

use crate::validate::limits;

/// A single active sort: comparator plus direction. The comparator is
/// captured with the direction already applied, so evaluation is one
/// stable sort either way.
pub(crate) struct Sort<T> {
    pub(crate) compare: Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
    pub(crate) descending: bool,
}

/// A composable description of filter, sort, and paging for entity
/// type `T`.
///
/// Built by chaining: [`filter`](Specification::filter) ANDs a
/// predicate with any existing filter, [`order_by`](Specification::order_by)
/// / [`order_by_descending`](Specification::order_by_descending) replace
/// any prior sort (last write wins), and [`page`](Specification::page)
/// sets the skip/take window. Predicates are ordinary closures over
/// `&T`, so combining them is plain function composition.
pub struct Specification<T: 'static> {
    filter: Option<Box<dyn Fn(&T) -> bool + Send + Sync>>,
    sort: Option<Sort<T>>,
    skip: Option<usize>,
    take: Option<usize>,
}

impl<T: 'static> Default for Specification<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Specification<T> {
    /// An empty specification: matches everything, no sort, no paging.
    pub fn new() -> Self {
        Self {
            filter: None,
            sort: None,
            skip: None,
            take: None,
        }
    }

    /// Add a filter predicate, ANDed with any existing filter. Filters
    /// never OR.
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(match self.filter.take() {
            None => Box::new(predicate),
            Some(previous) => Box::new(move |item: &T| previous(item) && predicate(item)),
        });
        self
    }

    /// Sort ascending by the given key. Replaces any prior sort.
    pub fn order_by<K, F>(mut self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.sort = Some(Sort {
            compare: Box::new(move |a, b| key(a).cmp(&key(b))),
            descending: false,
        });
        self
    }

    /// Sort descending by the given key. Replaces any prior sort.
    pub fn order_by_descending<K, F>(mut self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.sort = Some(Sort {
            compare: Box::new(move |a, b| key(b).cmp(&key(a))),
            descending: true,
        });
        self
    }

    /// Set the paging window. `take` is clamped to
    /// [`limits::MAX_PAGE_SIZE`].
    pub fn page(mut self, skip: usize, take: usize) -> Self {
        self.skip = Some(skip);
        self.take = Some(take.min(limits::MAX_PAGE_SIZE));
        self
    }

    /// Set the paging window from a 1-based page number, the shape
    /// search requests arrive in. `page` is clamped to
    /// [`limits::MIN_PAGE`] and `page_size` to
    /// [`limits::MAX_PAGE_SIZE`].
    pub fn page_number(self, page: usize, page_size: usize) -> Self {
        let page = page.max(limits::MIN_PAGE);
        let size = page_size.min(limits::MAX_PAGE_SIZE);
        self.page((page - 1) * size, size)
    }

    /// Whether the item satisfies every registered filter. A
    /// specification with no filter matches everything.
    pub fn matches(&self, item: &T) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(item))
    }

    /// Whether the active sort, if any, is descending.
    pub fn is_descending(&self) -> bool {
        self.sort.as_ref().map_or(false, |sort| sort.descending)
    }

    /// The number of records to skip, if paging is set.
    pub fn skip(&self) -> Option<usize> {
        self.skip
    }

    /// The number of records to take, if paging is set.
    pub fn take(&self) -> Option<usize> {
        self.take
    }

    pub(crate) fn sort(&self) -> Option<&Sort<T>> {
        self.sort.as_ref()
    }
}
