use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path separator between class and id segments.
const SEPARATOR: char = '/';

///
/// Ref
///
/// Opaque handle to a server-side resource such as `databases/prydain`.
/// Queries that need a Ref will not accept a bare string, so the path is
/// always wrapped and travels as `{"@ref": "<path>"}`.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[display("{value}")]
#[serde(from = "RefWire", into = "RefWire")]
pub struct Ref {
    value: String,
}

impl Ref {
    /// Build a Ref from a complete path.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Build a Ref from a class part and an id.
    ///
    /// The class may be any displayable path, including another `Ref`,
    /// so `Ref::with_id(Ref::new("databases"), "prydain")` is `databases/prydain`.
    #[must_use]
    pub fn with_id(class: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self {
            value: format!("{class}{SEPARATOR}{id}"),
        }
    }

    /// Borrow the full path.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume the Ref and return its path.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }

    /// Everything but the last segment, as a Ref.
    ///
    /// `Ref::with_id("a", "b/c").class_part()` is `Ref::new("a/b")`.
    /// A single-segment Ref yields a Ref over the empty string.
    #[must_use]
    pub fn class_part(&self) -> Self {
        match self.value.rfind(SEPARATOR) {
            Some(pos) => Self::new(&self.value[..pos]),
            None => Self::new(String::new()),
        }
    }

    /// The last segment; the whole value when there is no separator.
    #[must_use]
    pub fn id_part(&self) -> &str {
        match self.value.rfind(SEPARATOR) {
            Some(pos) => &self.value[pos + SEPARATOR.len_utf8()..],
            None => &self.value,
        }
    }
}

impl From<&str> for Ref {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Ref {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Ref {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

///
/// RefWire
/// Reserved-key envelope used on the wire.
///

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RefWire {
    #[serde(rename = "@ref")]
    value: String,
}

impl From<RefWire> for Ref {
    fn from(wire: RefWire) -> Self {
        Self::new(wire.value)
    }
}

impl From<Ref> for RefWire {
    fn from(r: Ref) -> Self {
        Self { value: r.value }
    }
}
