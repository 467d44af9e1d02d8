use crate::models::Entity;
use crate::mvi::ViewState;

/// Where a list view is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListPhase {
    /// Nothing requested yet (fresh or just reset).
    #[default]
    Idle,
    /// First page in flight.
    LoadingInitial,
    /// At least one page loaded, more available.
    Ready,
    /// A follow-up page in flight.
    LoadingMore,
    /// Last page fetch failed; items are the last good set.
    Error,
    /// The backend confirmed there are no further pages.
    Exhausted,
}

/// Snapshot of one paginated list.
///
/// The loading flags are derived from a single phase, so "initial" and
/// "more" can never be set together.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// Items in page order.
    pub items: Vec<T>,
    /// Page requested by the next load. Frozen once exhausted.
    pub next_page: u32,
    pub phase: ListPhase,
    /// Message of the last failed page fetch, cleared on the next attempt.
    pub last_error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            phase: ListPhase::Idle,
            last_error: None,
        }
    }
}

impl<T: Entity> ViewState for ListState<T> {}

impl<T> ListState<T> {
    pub fn is_exhausted(&self) -> bool {
        self.phase == ListPhase::Exhausted
    }

    pub fn is_loading_initial(&self) -> bool {
        self.phase == ListPhase::LoadingInitial
    }

    pub fn is_loading_more(&self) -> bool {
        self.phase == ListPhase::LoadingMore
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading_initial() || self.is_loading_more()
    }

    /// A `load_next` now would issue a request.
    pub fn can_load_more(&self) -> bool {
        !self.is_exhausted() && !self.is_loading()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
