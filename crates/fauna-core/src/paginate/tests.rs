use crate::{
    error::Error,
    paginate::Direction,
    query::{Expr, PaginateOptions, QueryExecutor},
    types::{Page, Ref, SetRef},
    value::Value,
};
use std::{cell::RefCell, collections::VecDeque};

///
/// Script
/// Replays canned responses and counts calls.
///

struct Script {
    responses: RefCell<VecDeque<Result<Value, Error>>>,
    calls: RefCell<usize>,
}

impl Script {
    fn new(responses: Vec<Result<Value, Error>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl QueryExecutor for Script {
    fn query(&self, _expr: &Expr) -> Result<Value, Error> {
        *self.calls.borrow_mut() += 1;
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::execution("script exhausted")))
    }
}

fn page(data: &[i64], before: Option<i64>, after: Option<i64>) -> Value {
    let mut fields = vec![(
        "data",
        Value::Array(data.iter().copied().map(Value::Int).collect()),
    )];
    if let Some(c) = before {
        fields.push(("before", Value::Int(c)));
    }
    if let Some(c) = after {
        fields.push(("after", Value::Int(c)));
    }

    Value::object(fields)
}

fn all_spells() -> SetRef {
    SetRef::matching(Value::Null, Ref::new("indexes/all_spells"))
}

#[test]
fn direction_locks_to_after_when_present() {
    let both = Page::<Value>::new(vec![], Some(Value::Int(1)), Some(Value::Int(2)));
    let before_only = Page::<Value>::new(vec![], Some(Value::Int(1)), None);
    let neither = Page::<Value>::default();

    assert_eq!(Direction::lock(&both), Direction::After);
    assert_eq!(Direction::lock(&before_only), Direction::Before);
    assert_eq!(Direction::lock(&neither), Direction::Before);
    assert_eq!(Direction::After.opposite(), Direction::Before);
}

#[test]
fn nothing_is_fetched_until_first_advance() {
    let script = Script::new(vec![Ok(page(&[1], None, None))]);
    let set = all_spells();

    let mut pages = set.pages(&script, PaginateOptions::new());
    assert_eq!(script.calls(), 0);
    assert_eq!(pages.direction(), None);

    pages.next().expect("first page").expect("first page should load");
    assert_eq!(script.calls(), 1);
    assert!(pages.is_finished());
    assert!(pages.next().is_none());
    assert_eq!(script.calls(), 1);
}

#[test]
fn failure_fuses_the_page_iterator() {
    let script = Script::new(vec![Err(Error::execution("boom"))]);
    let set = all_spells();
    let mut pages = set.pages(&script, PaginateOptions::new());

    let err = pages.next().expect("one item").expect_err("fetch fails");
    assert!(err.is_execution());
    assert!(pages.is_finished());
    assert!(pages.next().is_none());
    assert!(pages.next().is_none());
    assert_eq!(script.calls(), 1);
}

#[test]
fn malformed_resource_surfaces_as_error_without_partial_page() {
    let script = Script::new(vec![Ok(Value::object([("after", Value::Int(4))]))]);
    let set = all_spells();

    let items: Vec<_> = set.iter(&script, PaginateOptions::new()).collect();
    assert_eq!(items.len(), 1);
    assert!(items[0].as_ref().is_err_and(Error::is_malformed_response));
}

#[test]
fn empty_pages_with_cursors_are_skipped() {
    let script = Script::new(vec![
        Ok(page(&[], None, Some(1))),
        Ok(page(&[], None, Some(2))),
        Ok(page(&[7], None, None)),
    ]);
    let set = all_spells();
    let mut iter = set.iter(&script, PaginateOptions::new());

    assert_eq!(iter.next().unwrap().unwrap(), Value::Int(7));
    assert!(iter.next().is_none());
    assert_eq!(iter.pages_fetched(), 3);
    assert_eq!(iter.direction(), Some(Direction::After));
}

#[test]
fn each_invocation_restarts_the_traversal() {
    let script = Script::new(vec![
        Ok(page(&[1, 2], None, None)),
        Ok(page(&[1, 2], None, None)),
    ]);
    let set = all_spells();

    let first: Vec<_> = set.iter(&script, PaginateOptions::new()).map(Result::unwrap).collect();
    let second: Vec<_> = set.iter(&script, PaginateOptions::new()).map(Result::unwrap).collect();

    assert_eq!(first, second);
    assert_eq!(script.calls(), 2);
}
