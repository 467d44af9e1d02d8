//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (filter edits, "load more" clicks)
/// - System events (page responses, mutation results)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
