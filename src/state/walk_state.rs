/// States of the pagination walker
///
/// ```text
/// Fetching ──rows extracted──▶ CheckNext ──next control, under cap──▶ Fetching
///    │                            │
///    └─container absent / no rows / navigation error──▶ Done ◀──no next / cap reached
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkState {
    /// Navigate to the current page and extract its rows
    Fetching,

    /// Look for a "next page" control
    CheckNext,

    /// Terminal
    Done,
}

impl WalkState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}
