/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Question budget of a session.
    pub total: usize,
    /// Questions served so far, including the current one.
    pub served: usize,
    pub remaining: usize,
    pub score: u32,
    pub is_complete: bool,
}
