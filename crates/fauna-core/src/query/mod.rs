//! Module: query
//! Responsibility: the boundary with the query-execution collaborator:
//! opaque expressions, the `paginate` wrapper, and the executor trait.
//! Does not own: transport, retries, or the wider expression DSL.

mod executor;
mod options;

#[cfg(test)]
mod tests;

pub use executor::QueryExecutor;
pub use options::PaginateOptions;

use crate::{error::Error, paginate::Direction, types::SetRef, value::Value};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use std::fmt;

///
/// Expr
///
/// Opaque query expression tree, exactly as it will be sent to the server.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Expr(Json);

impl Expr {
    #[must_use]
    pub const fn from_json(json: Json) -> Self {
        Self(json)
    }

    #[must_use]
    pub const fn as_json(&self) -> &Json {
        &self.0
    }

    #[must_use]
    pub fn into_json(self) -> Json {
        self.0
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build a `paginate` expression over `set`.
///
/// `size` is omitted when unset so the server default applies; the cursor,
/// when given, lands under the key named by its direction.
pub fn paginate(
    set: &SetRef,
    options: PaginateOptions,
    cursor: Option<(Direction, &Value)>,
) -> Result<Expr, Error> {
    let mut call = Map::new();
    call.insert("paginate".to_string(), serde_json::to_value(set)?);

    if let Some(size) = options.size() {
        call.insert("size".to_string(), Json::from(size));
    }
    if let Some((direction, cursor)) = cursor {
        call.insert(
            direction.as_str().to_string(),
            serde_json::to_value(cursor)?,
        );
    }

    Ok(Expr(Json::Object(call)))
}
