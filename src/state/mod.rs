//! State module for navigation outcomes and pagination progress
//!
//! # Components
//!
//! - `PageStatus`: what a freshly rendered page turned out to be (usable, rate-limited, banned)
//! - `WalkState`: the pagination walker's state machine

mod page_status;
mod walk_state;

// Re-export main types
pub use page_status::PageStatus;
pub use walk_state::WalkState;
