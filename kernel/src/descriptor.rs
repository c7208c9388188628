//! Storage-independent description of a list query.
//!
//! [`QueryDescriptor::build`] turns raw request parameters into a bounded
//! query: filters, sort order, projection and a skip/take window. Backends
//! translate the descriptor; nothing here touches storage.

mod builder;
mod field;
mod filter;
mod pagination;
mod projection;
mod sort;

pub use self::{builder::*, field::*, filter::*, pagination::*, projection::*, sort::*};

use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct QueryDescriptor {
    filters: Vec<FieldFilter>,
    sort: Vec<SortKey>,
    projection: Projection,
    pagination: Pagination,
}

impl QueryDescriptor {
    pub fn new(
        filters: Vec<FieldFilter>,
        sort: Vec<SortKey>,
        projection: Projection,
        pagination: Pagination,
    ) -> Self {
        let sort = if sort.is_empty() {
            vec![SortKey::newest_first()]
        } else {
            sort
        };
        Self {
            filters,
            sort,
            projection,
            pagination,
        }
    }

    pub fn skip(&self) -> u64 {
        self.pagination.skip()
    }

    pub fn take(&self) -> u64 {
        self.pagination.take()
    }

    pub fn matches(&self, document: &serde_json::Value) -> bool {
        self.filters.iter().all(|filter| filter.matches(document))
    }
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self::new(
            Vec::new(),
            Vec::new(),
            Projection::default(),
            Pagination::default(),
        )
    }
}
