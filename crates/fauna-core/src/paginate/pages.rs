use crate::{
    error::Error,
    obs::sink::{self, MetricsEvent},
    paginate::Direction,
    query::{self, PaginateOptions, QueryExecutor},
    types::{Page, SetRef},
    value::Value,
};
use std::{iter::FusedIterator, mem};
use tracing::{debug, debug_span, warn};

///
/// TraversalState
///

#[derive(Debug)]
enum TraversalState {
    Start,
    Next { direction: Direction, cursor: Value },
    Done,
    Failed,
}

///
/// Pages
///
/// Lazy page-level traversal of one set. Each `next` issues exactly one
/// query; a failed fetch is yielded once and the iterator then stays empty.
///

pub struct Pages<'a, Q> {
    executor: Q,
    set: &'a SetRef,
    options: PaginateOptions,
    state: TraversalState,
    direction: Option<Direction>,
    pages: u64,
    elements: u64,
}

impl<'a, Q: QueryExecutor> Pages<'a, Q> {
    pub(crate) const fn new(executor: Q, set: &'a SetRef, options: PaginateOptions) -> Self {
        Self {
            executor,
            set,
            options,
            state: TraversalState::Start,
            direction: None,
            pages: 0,
            elements: 0,
        }
    }

    /// Direction locked after the first page, if it has been fetched.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Number of pages fetched so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u64 {
        self.pages
    }

    /// True once the traversal has ended, normally or by failure.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, TraversalState::Done | TraversalState::Failed)
    }

    fn fetch(&self, cursor: Option<(Direction, &Value)>) -> Result<Page, Error> {
        let direction = cursor.map(|(direction, _)| direction);
        let span = debug_span!(
            "paginate_fetch",
            page = self.pages,
            size = ?self.options.size(),
            direction = ?direction
        );
        let _enter = span.enter();

        let expr = query::paginate(self.set, self.options, cursor)?;
        let resource = self.executor.query(&expr)?;

        Page::from_resource(resource)
    }

    // Fold one fetched page into the traversal state.
    fn advance(&mut self, direction: Direction, page: &Page, first: bool) {
        let len = page.len() as u64;
        self.pages = self.pages.saturating_add(1);
        self.elements = self.elements.saturating_add(len);
        sink::record(MetricsEvent::PageFetched {
            elements: len,
            has_before: page.before().is_some(),
            has_after: page.after().is_some(),
        });

        if !first && page.cursor(direction.opposite()).is_some() {
            debug!(
                locked = %direction,
                ignored = %direction.opposite(),
                "ignoring cursor outside the locked traversal direction"
            );
        }

        self.state = match page.cursor(direction) {
            Some(cursor) => TraversalState::Next {
                direction,
                cursor: cursor.clone(),
            },
            None => {
                sink::record(MetricsEvent::TraversalFinish {
                    pages: self.pages,
                    elements: self.elements,
                });
                debug!(
                    pages = self.pages,
                    elements = self.elements,
                    "page traversal finished"
                );
                TraversalState::Done
            }
        };
    }
}

impl<Q: QueryExecutor> Iterator for Pages<'_, Q> {
    type Item = Result<Page, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = match mem::replace(&mut self.state, TraversalState::Done) {
            TraversalState::Start => {
                sink::record(MetricsEvent::TraversalStart);
                None
            }
            TraversalState::Next { direction, cursor } => Some((direction, cursor)),
            TraversalState::Done => return None,
            TraversalState::Failed => {
                self.state = TraversalState::Failed;
                return None;
            }
        };

        match self.fetch(cursor.as_ref().map(|(direction, c)| (*direction, c))) {
            Ok(page) => {
                let first = cursor.is_none();
                let direction = match cursor {
                    Some((direction, _)) => direction,
                    None => Direction::lock(&page),
                };
                self.direction = Some(direction);
                self.advance(direction, &page, first);

                Some(Ok(page))
            }
            Err(err) => {
                sink::record(MetricsEvent::FetchFailed { class: err.class });
                warn!(
                    page = self.pages,
                    error = %err.display_with_class(),
                    "page fetch failed; ending traversal"
                );
                self.state = TraversalState::Failed;

                Some(Err(err))
            }
        }
    }
}

impl<Q: QueryExecutor> FusedIterator for Pages<'_, Q> {}
