use serde::{Deserialize, Serialize};

///
/// PaginateOptions
///
/// Per-traversal paging configuration. Deserializable so hosts can carry
/// it inside their own configuration files.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginateOptions {
    /// Elements requested per page; `None` defers to the server default.
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
}

impl PaginateOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self { size: None }
    }

    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub const fn size(&self) -> Option<u32> {
        self.size
    }
}

impl From<Option<u32>> for PaginateOptions {
    fn from(size: Option<u32>) -> Self {
        Self { size }
    }
}
