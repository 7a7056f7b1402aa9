use crate::{
    error::Error,
    paginate::Direction,
    query::{Expr, PaginateOptions, QueryExecutor, paginate},
    types::{Ref, SetRef},
    value::Value,
};
use serde_json::json;

fn spells() -> SetRef {
    SetRef::matching("fire", Ref::new("indexes/spells_by_element"))
}

#[test]
fn paginate_without_size_or_cursor_omits_both_keys() {
    let expr = paginate(&spells(), PaginateOptions::new(), None).unwrap();

    assert_eq!(
        expr.as_json(),
        &json!({
            "paginate": { "@set": {
                "match": "fire",
                "index": { "@ref": "indexes/spells_by_element" }
            }}
        })
    );
}

#[test]
fn paginate_places_cursor_under_direction_key() {
    let cursor = Value::Ref(Ref::new("classes/spells/9"));
    let options = PaginateOptions::new().with_size(2);

    let after = paginate(&spells(), options, Some((Direction::After, &cursor))).unwrap();
    let before = paginate(&spells(), options, Some((Direction::Before, &cursor))).unwrap();

    assert_eq!(after.as_json()["size"], json!(2));
    assert_eq!(after.as_json()["after"], json!({ "@ref": "classes/spells/9" }));
    assert!(after.as_json().get("before").is_none());
    assert_eq!(before.as_json()["before"], json!({ "@ref": "classes/spells/9" }));
    assert!(before.as_json().get("after").is_none());
}

#[test]
fn options_load_from_config_shape() {
    let sized: PaginateOptions = serde_json::from_value(json!({ "size": 16 })).unwrap();
    let empty: PaginateOptions = serde_json::from_value(json!({})).unwrap();

    assert_eq!(sized.size(), Some(16));
    assert_eq!(empty, PaginateOptions::default());
    serde_json::from_value::<PaginateOptions>(json!({ "page": 3 }))
        .expect_err("unknown option keys are rejected");
}

#[test]
fn executor_is_usable_through_references_and_boxes() {
    struct Echo;

    impl QueryExecutor for Echo {
        fn query(&self, expr: &Expr) -> Result<Value, Error> {
            Ok(serde_json::from_value(expr.as_json().clone())?)
        }
    }

    fn run<Q: QueryExecutor>(executor: Q, expr: &Expr) -> Value {
        executor.query(expr).unwrap()
    }

    let expr = Expr::from_json(json!({ "data": [] }));
    let boxed: Box<dyn QueryExecutor> = Box::new(Echo);

    assert_eq!(
        run(&Echo, &expr),
        Value::object([("data", Value::Array(vec![]))])
    );
    assert_eq!(run(boxed, &expr).get("data"), Some(&Value::Array(vec![])));
}
