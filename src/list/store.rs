use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::RequestContext;
use crate::filter::Filters;
use crate::gateway::{FetchError, FetchGateway, FetchRequest, FetchResult};
use crate::models::{Entity, EntityId};
use crate::mvi::Reducer;
use crate::resource::Resource;

use super::intent::ListIntent;
use super::reducer::ListReducer;
use super::state::ListState;

/// Why a `load_next` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Exhausted,
    InFlight,
}

/// Result of one `load_next` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was appended.
    Loaded { added: usize, exhausted: bool },
    /// No request was issued.
    Skipped(SkipReason),
    /// The list was reset while the request was in flight; the response
    /// was dropped.
    Discarded,
}

struct Inner<T> {
    state: ListState<T>,
    /// Bumped on every reset so late completions can be recognised.
    generation: u64,
}

impl<T: Entity> Inner<T> {
    fn dispatch(&mut self, intent: ListIntent<T>) {
        let state = std::mem::take(&mut self.state);
        self.state = ListReducer::<T>::reduce(state, intent);
    }
}

/// Paginated list of one resource.
///
/// The lock only guards state transitions and is never held across the
/// gateway call, so a second `load_next` issued while the first is pending
/// sees the loading phase and returns immediately.
pub struct ListStore<R: Resource> {
    inner: Mutex<Inner<R::Entity>>,
    gateway: Arc<dyn FetchGateway>,
    ctx: RequestContext,
}

impl<R: Resource> ListStore<R> {
    pub fn new(gateway: Arc<dyn FetchGateway>, ctx: RequestContext) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: ListState::default(),
                generation: 0,
            }),
            gateway,
            ctx,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ListState<R::Entity> {
        self.inner.lock().state.clone()
    }

    pub fn items(&self) -> Vec<R::Entity> {
        self.inner.lock().state.items.clone()
    }

    /// Back to page 1 with nothing loaded. Any request still in flight will
    /// have its response discarded.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.generation = inner.generation.wrapping_add(1);
        inner.dispatch(ListIntent::Reset);
        tracing::debug!(resource = R::NAME, "list reset");
    }

    /// Fetch and append the next page.
    ///
    /// # Returns
    /// * `Ok(LoadOutcome)` - What happened to the list
    /// * `Err(FetchError)` - The page fetch failed; items are unchanged
    pub async fn load_next(&self, filters: &R::Filters) -> Result<LoadOutcome, FetchError> {
        let (page, generation) = {
            let mut inner = self.inner.lock();
            if inner.state.is_exhausted() {
                return Ok(LoadOutcome::Skipped(SkipReason::Exhausted));
            }
            if inner.state.is_loading() {
                return Ok(LoadOutcome::Skipped(SkipReason::InFlight));
            }
            inner.dispatch(ListIntent::LoadStarted);
            (inner.state.next_page, inner.generation)
        };

        let request = FetchRequest::get(R::PATH)
            .query("page", page.to_string())
            .query_pairs(filters.query_pairs());

        let result: Result<FetchResult<R::Entity>, FetchError> = match self.gateway.fetch(request, &self.ctx).await {
            Ok(body) => R::SHAPE.decode(body),
            Err(e) => Err(e),
        };

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            tracing::debug!(resource = R::NAME, page, "discarding response for a reset list");
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(fetched) => {
                let added = fetched.page.len();
                tracing::debug!(
                    resource = R::NAME,
                    page = fetched.current_page,
                    last_page = fetched.last_page,
                    added,
                    "page loaded"
                );
                inner.dispatch(ListIntent::PageLoaded(fetched));
                Ok(LoadOutcome::Loaded {
                    added,
                    exhausted: inner.state.is_exhausted(),
                })
            }
            Err(e) => {
                inner.dispatch(ListIntent::PageFailed {
                    message: e.user_message(),
                });
                Err(e)
            }
        }
    }

    /// Swap the item with the same id for `item`. Items not loaded yet are
    /// left alone.
    pub fn replace_item(&self, item: R::Entity) {
        self.inner.lock().dispatch(ListIntent::ItemReplaced(item));
    }

    pub fn prepend_item(&self, item: R::Entity) {
        self.inner.lock().dispatch(ListIntent::ItemPrepended(item));
    }

    pub fn remove_item(&self, id: EntityId) {
        self.inner.lock().dispatch(ListIntent::ItemRemoved(id));
    }
}
