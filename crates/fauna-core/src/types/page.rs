use crate::{error::Error, paginate::Direction, value::Value};
use derive_more::IntoIterator;
use serde::{Deserialize, Serialize};

///
/// Page
///
/// One fetched slice of a paginated result. `before` and `after` are
/// opaque cursor tokens for the adjacent slices; their contents are never
/// inspected, only their presence.
///

#[derive(Clone, Debug, Deserialize, IntoIterator, PartialEq, Serialize)]
pub struct Page<T = Value> {
    #[into_iterator(owned, ref)]
    data: Vec<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    before: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    after: Option<Value>,
}

impl<T> Page<T> {
    /// Build a page; a null cursor is stored as absent.
    #[must_use]
    pub fn new(data: Vec<T>, before: Option<Value>, after: Option<Value>) -> Self {
        Self {
            data,
            before: before.filter(|v| !v.is_null()),
            after: after.filter(|v| !v.is_null()),
        }
    }

    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[must_use]
    pub const fn before(&self) -> Option<&Value> {
        self.before.as_ref()
    }

    #[must_use]
    pub const fn after(&self) -> Option<&Value> {
        self.after.as_ref()
    }

    /// Cursor pointing further along `direction`, if any.
    #[must_use]
    pub const fn cursor(&self, direction: Direction) -> Option<&Value> {
        match direction {
            Direction::Before => self.before(),
            Direction::After => self.after(),
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Transform every element, keeping both cursors.
    #[must_use]
    pub fn map_data<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            before: self.before,
            after: self.after,
        }
    }

    /// Consume the page and return `(data, before, after)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<Value>, Option<Value>) {
        (self.data, self.before, self.after)
    }
}

impl Page {
    /// Rebuild a page from a response resource.
    ///
    /// The resource must be an object with a `data` array; `before` and
    /// `after` are optional and an explicit null counts as absent.
    pub fn from_resource(resource: Value) -> Result<Self, Error> {
        let Value::Object(mut fields) = resource else {
            return Err(Error::malformed_response(
                "page resource must be an object",
            ));
        };

        let data = match fields.remove("data") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(Error::malformed_response(
                    "page resource field 'data' must be an array",
                ));
            }
            None => {
                return Err(Error::malformed_response(
                    "page resource is missing required field 'data'",
                ));
            }
        };
        let before = fields.remove("before");
        let after = fields.remove("after");

        Ok(Self::new(data, before, after))
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::new(Vec::new(), None, None)
    }
}
