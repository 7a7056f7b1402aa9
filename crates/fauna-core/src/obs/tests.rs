use crate::{
    error::{Error, ErrorClass},
    obs::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink},
    query::{Expr, PaginateOptions, QueryExecutor},
    types::{Ref, SetRef},
    value::Value,
};
use std::{cell::RefCell, rc::Rc};

#[derive(Default)]
struct RecordingSink(RefCell<Vec<MetricsEvent>>);

impl MetricsSink for RecordingSink {
    fn record(&self, event: MetricsEvent) {
        self.0.borrow_mut().push(event);
    }
}

struct TwoPages(RefCell<u32>);

impl QueryExecutor for TwoPages {
    fn query(&self, _expr: &Expr) -> Result<Value, Error> {
        let mut n = self.0.borrow_mut();
        *n += 1;
        match *n {
            1 => Ok(Value::object([
                ("data", Value::from(vec![1, 2])),
                ("after", Value::Int(2)),
            ])),
            2 => Ok(Value::object([("data", Value::from(vec![3]))])),
            _ => Err(Error::execution("unexpected fetch")),
        }
    }
}

fn set() -> SetRef {
    SetRef::matching("x", Ref::new("indexes/letters"))
}

#[test]
fn global_sink_accumulates_traversal_counters() {
    metrics_reset_all();
    let set = set();

    let total = set
        .iter(TwoPages(RefCell::new(0)), PaginateOptions::new())
        .filter(Result::is_ok)
        .count();
    assert_eq!(total, 3);

    let report = metrics_report();
    assert_eq!(report.traversals_started, 1);
    assert_eq!(report.traversals_finished, 1);
    assert_eq!(report.traversals_failed, 0);
    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.elements_fetched, 3);

    metrics_reset_all();
    assert_eq!(metrics_report().pages_fetched, 0);
}

#[test]
fn scoped_sink_receives_events_in_order() {
    let sink = Rc::new(RecordingSink::default());
    let set = set();
    let before = metrics_report();

    with_metrics_sink(sink.clone(), || {
        let mut pages = set.pages(TwoPages(RefCell::new(2)), PaginateOptions::new());
        assert!(pages.next().is_some_and(|r| r.is_err()));
    });

    assert_eq!(
        *sink.0.borrow(),
        vec![
            MetricsEvent::TraversalStart,
            MetricsEvent::FetchFailed {
                class: ErrorClass::Execution
            },
        ]
    );
    assert_eq!(metrics_report(), before);
}

struct Scripted(RefCell<Vec<Value>>);

impl QueryExecutor for Scripted {
    fn query(&self, _expr: &Expr) -> Result<Value, Error> {
        let mut pages = self.0.borrow_mut();
        if pages.is_empty() {
            return Err(Error::execution("unexpected fetch"));
        }

        Ok(pages.remove(0))
    }
}

#[test]
fn global_sink_tracks_cursor_shapes_and_traversal_size() {
    metrics_reset_all();
    let set = set();
    let executor = Scripted(RefCell::new(vec![
        Value::object([("data", Value::from(vec![1])), ("after", Value::Int(1))]),
        Value::object([
            ("data", Value::from(vec![2])),
            ("before", Value::Int(1)),
            ("after", Value::Int(2)),
        ]),
        Value::object([("data", Value::from(vec![3, 4])), ("before", Value::Int(2))]),
    ]));

    let total = set
        .iter(&executor, PaginateOptions::new())
        .filter(Result::is_ok)
        .count();
    assert_eq!(total, 4);

    let report = metrics_report();
    assert_eq!(report.pages_with_both_cursors, 1);
    assert_eq!(report.longest_traversal_pages, 3);
    assert_eq!(report.largest_traversal_elements, 4);
}
