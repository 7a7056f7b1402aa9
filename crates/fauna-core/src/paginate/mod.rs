//! Module: paginate
//! Responsibility: turning page-by-page `paginate` queries into one ordered,
//! lazily fetched stream.
//! Does not own: retries, prefetching, or caching of fetched pages.
//! Boundary: every fetch goes through a caller-supplied `QueryExecutor`.

mod direction;
mod iter;
mod pages;

#[cfg(test)]
mod tests;

pub use direction::Direction;
pub use iter::SetIter;
pub use pages::Pages;

use crate::{
    query::{PaginateOptions, QueryExecutor},
    types::SetRef,
};

impl SetRef {
    /// Start a fresh page-level traversal of this set.
    ///
    /// Nothing is fetched until the iterator is first advanced.
    pub fn pages<Q: QueryExecutor>(
        &self,
        executor: Q,
        options: impl Into<PaginateOptions>,
    ) -> Pages<'_, Q> {
        Pages::new(executor, self, options.into())
    }

    /// Start a fresh element-level traversal of this set.
    pub fn iter<Q: QueryExecutor>(
        &self,
        executor: Q,
        options: impl Into<PaginateOptions>,
    ) -> SetIter<'_, Q> {
        SetIter::new(self.pages(executor, options))
    }
}
