use crate::types::Page;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Direction
///
/// Cursor field followed by one traversal. Chosen once from the first
/// page and never switched, so elements are neither reordered nor repeated.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Before,
    After,
}

impl Direction {
    /// Lock the direction from the first page: `After` when it carries an
    /// `after` cursor, `Before` otherwise.
    #[must_use]
    pub const fn lock<T>(first: &Page<T>) -> Self {
        if first.after().is_some() {
            Self::After
        } else {
            Self::Before
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
        }
    }

    /// Wire key carrying the cursor for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
