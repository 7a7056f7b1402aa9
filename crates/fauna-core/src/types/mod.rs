//! Module: types
//! Responsibility: the special protocol values (refs, set descriptors,
//! events, pages) and their wire shapes.
//! Does not own: query execution or page traversal.

mod event;
mod page;
mod reference;
mod set;


pub use event::{Event, EventAction};
pub use page::Page;
pub use reference::Ref;
pub use set::{SetExpr, SetRef};
