//! Multi-page walks and the operation facade
//!
//! The walker turns a paginated listing into one ordered sequence of records;
//! the coordinator exposes one operation per page type on top of the session,
//! the resolver, the extractors and the walker.

mod coordinator;
mod walker;

pub use coordinator::{Coordinator, Target};
pub use walker::{walk, ChartCursor, PageCursor, TimelineCursor};
