use crate::{
    error::Error,
    paginate::{Direction, Pages},
    query::QueryExecutor,
    value::Value,
};
use std::{iter::FusedIterator, vec};

///
/// SetIter
///
/// Element-level view over [`Pages`]: yields every element of every page
/// in server order, buffering only the current page. Empty pages that
/// still carry a cursor are skipped over.
///

pub struct SetIter<'a, Q> {
    pages: Pages<'a, Q>,
    buffer: vec::IntoIter<Value>,
}

impl<'a, Q: QueryExecutor> SetIter<'a, Q> {
    pub(crate) fn new(pages: Pages<'a, Q>) -> Self {
        Self {
            pages,
            buffer: Vec::new().into_iter(),
        }
    }

    /// Direction locked after the first page, if it has been fetched.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        self.pages.direction()
    }

    /// Number of pages fetched so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u64 {
        self.pages.pages_fetched()
    }
}

impl<Q: QueryExecutor> Iterator for SetIter<'_, Q> {
    type Item = Result<Value, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.buffer.next() {
                return Some(Ok(value));
            }

            match self.pages.next()? {
                Ok(page) => self.buffer = page.into_iter(),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<Q: QueryExecutor> FusedIterator for SetIter<'_, Q> {}
