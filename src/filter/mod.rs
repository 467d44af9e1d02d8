//! Filter Controller: user-editable predicates that invalidate a list.
//!
//! Every effective change is broadcast to subscribers; the owning
//! [`ListView`](crate::view::ListView) answers with a full reset followed by
//! a reload of page 1. Partial invalidation is never attempted.

mod bookings;
mod checkins;
mod reports;

use tokio::sync::watch;

pub use bookings::BookingFilters;
pub use checkins::{CheckInFilters, CheckInWindow};
pub use reports::DateRange;

/// Server-side predicates of one list endpoint.
pub trait Filters: Clone + PartialEq + Default + Send + Sync + 'static {
    /// Query pairs sent next to `page`. Inactive predicates are omitted.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// For endpoints without server-side filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoFilters;

impl Filters for NoFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Holds the current filter values of one view.
pub struct FilterController<F: Filters> {
    tx: watch::Sender<F>,
}

impl<F: Filters> FilterController<F> {
    pub fn new(initial: F) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot of the current values.
    pub fn current(&self) -> F {
        self.tx.borrow().clone()
    }

    /// Edit the values in place.
    ///
    /// Returns `true` (and notifies subscribers) only when the values
    /// actually changed; re-selecting the current option is not a change.
    pub fn update(&self, edit: impl FnOnce(&mut F)) -> bool {
        self.tx.send_if_modified(|filters| {
            let before = filters.clone();
            edit(filters);
            *filters != before
        })
    }

    /// Replace all values at once.
    pub fn set(&self, value: F) -> bool {
        self.update(|filters| *filters = value)
    }

    /// Restore the defaults.
    pub fn clear(&self) -> bool {
        self.set(F::default())
    }

    pub fn subscribe(&self) -> watch::Receiver<F> {
        self.tx.subscribe()
    }
}

impl<F: Filters> Default for FilterController<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}
