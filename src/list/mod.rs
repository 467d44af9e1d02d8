//! List Store: the accumulated pages of one resource view.
//!
//! State transitions live in [`ListReducer`]; [`ListStore`] drives them
//! around calls to the [`FetchGateway`](crate::gateway::FetchGateway).
//!
//! ```text
//! Idle ─→ LoadingInitial ─→ Ready ⇄ LoadingMore ─→ Exhausted
//!              │                        │
//!              └────────→ Error ←───────┘   (retry → Loading*)
//!
//! reset() from any state → Idle
//! ```

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::ListIntent;
pub use reducer::ListReducer;
pub use state::{ListPhase, ListState};
pub use store::{ListStore, LoadOutcome, SkipReason};
