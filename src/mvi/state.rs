//! Base trait for view state in MVI architecture.

/// Marker trait for view state objects.
///
/// States should be:
/// - Cloneable (snapshots are handed to renderers)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait ViewState: Clone + PartialEq + Default + Send + 'static {}
