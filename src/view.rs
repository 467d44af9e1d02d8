//! One list screen: store, filters, scroll trigger and mutations wired
//! together.
//!
//! A 401 from any call made here fires [`Navigator::redirect_to_login`]
//! and leaves the loaded items alone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::config::RequestContext;
use crate::filter::FilterController;
use crate::gateway::{FetchError, FetchGateway};
use crate::list::{ListState, ListStore, LoadOutcome};
use crate::mutation::{Mutation, MutationError, MutationOutcome, MutationRelay};
use crate::resource::Resource;
use crate::scroll::{ScrollGeometry, ScrollObserver, ScrollTrigger};

/// Side effect for an expired or missing session.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Navigator that records the redirect for the caller to act on.
#[derive(Debug, Default)]
pub struct LoginRedirect {
    requested: AtomicBool,
}

impl LoginRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

impl Navigator for LoginRedirect {
    fn redirect_to_login(&self) {
        tracing::info!("session rejected, redirecting to login");
        self.requested.store(true, Ordering::SeqCst);
    }
}

pub struct ListView<R: Resource> {
    store: ListStore<R>,
    filters: FilterController<R::Filters>,
    relay: MutationRelay,
    trigger: ScrollTrigger,
    navigator: Arc<dyn Navigator>,
}

impl<R: Resource> ListView<R> {
    pub fn new(gateway: Arc<dyn FetchGateway>, ctx: RequestContext, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store: ListStore::new(gateway.clone(), ctx.clone()),
            filters: FilterController::default(),
            relay: MutationRelay::new(gateway, ctx),
            trigger: ScrollTrigger::default(),
            navigator,
        }
    }

    pub fn with_filters(self, filters: R::Filters) -> Self {
        self.filters.set(filters);
        self
    }

    pub fn with_trigger(mut self, trigger: ScrollTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn state(&self) -> ListState<R::Entity> {
        self.store.snapshot()
    }

    pub fn filters(&self) -> R::Filters {
        self.filters.current()
    }

    pub fn subscribe_filters(&self) -> watch::Receiver<R::Filters> {
        self.filters.subscribe()
    }

    pub fn trigger(&self) -> ScrollTrigger {
        self.trigger
    }

    /// First load when the screen is shown.
    pub async fn open(&self) -> Result<LoadOutcome, FetchError> {
        self.load_more().await
    }

    /// Next page with the current filters. Also backs the manual
    /// "Load more" control.
    pub async fn load_more(&self) -> Result<LoadOutcome, FetchError> {
        let filters = self.filters.current();
        let result = self.store.load_next(&filters).await;
        self.check_session(&result);
        result
    }

    /// Edit the filters. An effective change resets the list and loads
    /// page 1; otherwise nothing is fetched and `Ok(None)` is returned.
    pub async fn update_filters(&self, edit: impl FnOnce(&mut R::Filters)) -> Result<Option<LoadOutcome>, FetchError> {
        if !self.filters.update(edit) {
            return Ok(None);
        }
        self.reload().await.map(Some)
    }

    pub async fn set_filters(&self, filters: R::Filters) -> Result<Option<LoadOutcome>, FetchError> {
        self.update_filters(|current| *current = filters).await
    }

    /// Reset and fetch page 1 again.
    pub async fn reload(&self) -> Result<LoadOutcome, FetchError> {
        self.store.reset();
        self.load_more().await
    }

    /// React to a geometry event from the scroll container.
    pub async fn on_scroll(&self, geometry: ScrollGeometry) -> Result<Option<LoadOutcome>, FetchError> {
        if !self.trigger.should_load(&geometry, &self.store.snapshot()) {
            return Ok(None);
        }
        self.load_more().await.map(Some)
    }

    /// Send a mutation and apply its outcome to the loaded list.
    pub async fn submit(&self, mutation: Mutation) -> Result<MutationOutcome<R::Entity>, MutationError> {
        let outcome = match self.relay.submit::<R::Entity>(mutation).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_unauthorized() {
                    self.navigator.redirect_to_login();
                }
                return Err(e);
            }
        };

        match &outcome {
            MutationOutcome::Created(item) => self.store.prepend_item(item.clone()),
            MutationOutcome::Updated(item) => self.store.replace_item(item.clone()),
            MutationOutcome::Removed(id) => self.store.remove_item(*id),
            MutationOutcome::ReloadRequired => {
                // The change went through; a failed reload shows up in the
                // list state, not as a mutation error.
                if let Err(e) = self.reload().await {
                    tracing::warn!(resource = R::NAME, error = %e, "reload after mutation failed");
                }
            }
        }

        Ok(outcome)
    }

    fn check_session<T>(&self, result: &Result<T, FetchError>) {
        if let Err(FetchError::Unauthorized) = result {
            self.navigator.redirect_to_login();
        }
    }
}

impl<R: Resource> ListView<R> {
    /// Feed scroll geometry from `events` into this view until the returned
    /// observer is dropped.
    pub fn observe_scroll(self: &Arc<Self>, events: mpsc::Receiver<ScrollGeometry>) -> ScrollObserver {
        let view = Arc::clone(self);
        ScrollObserver::spawn(events, move |geometry| {
            let view = Arc::clone(&view);
            async move {
                if let Err(e) = view.on_scroll(geometry).await {
                    tracing::debug!(resource = R::NAME, error = %e, "scroll-triggered load failed");
                }
            }
        })
    }
}
