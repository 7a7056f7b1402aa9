//! Client-side value model for FaunaDB queries: refs, set descriptors,
//! events, pages, and the cursor-driven paginator that walks a set one
//! page at a time through a caller-supplied query executor.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod obs;
pub mod paginate;
pub mod query;
pub mod types;
pub mod value;

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only value vocabulary and the executor seam.
/// No errors, metrics, or wire helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        paginate::Direction,
        query::{PaginateOptions, QueryExecutor},
        types::{Event, EventAction, Page, Ref, SetExpr, SetRef},
        value::Value,
    };
}
