//! Infinite Scroll Trigger.
//!
//! Geometry is reported in container coordinates: the container viewport
//! spans `[scroll_top, scroll_top + viewport_height)` and the sentinel sits
//! at `sentinel_top` below the last item.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::ScrollConfig;
use crate::list::ListState;

/// One layout/scroll observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub sentinel_top: f64,
    pub sentinel_height: f64,
}

impl ScrollGeometry {
    /// Fraction of the sentinel inside the viewport grown by `margin` on
    /// both edges.
    pub fn visible_ratio(&self, margin: f64) -> f64 {
        let top = self.scroll_top - margin;
        let bottom = self.scroll_top + self.viewport_height + margin;
        let sentinel_bottom = self.sentinel_top + self.sentinel_height;

        if self.sentinel_height <= 0.0 {
            // A zero-height sentinel is either on screen or not.
            return if self.sentinel_top >= top && self.sentinel_top <= bottom {
                1.0
            } else {
                0.0
            };
        }

        let overlap = sentinel_bottom.min(bottom) - self.sentinel_top.max(top);
        (overlap / self.sentinel_height).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerMode {
    /// Load automatically when the sentinel comes into view.
    Observe { margin_px: f64, threshold: f64 },
    /// No observation available; the view shows a "Load more" control.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    mode: TriggerMode,
}

impl ScrollTrigger {
    pub fn observe(config: &ScrollConfig) -> Self {
        Self {
            mode: TriggerMode::Observe {
                margin_px: config.prefetch_margin_px,
                threshold: config.visibility_threshold,
            },
        }
    }

    pub fn manual() -> Self {
        Self {
            mode: TriggerMode::Manual,
        }
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    /// The view should render a "Load more" button.
    pub fn is_manual(&self) -> bool {
        self.mode == TriggerMode::Manual
    }

    pub fn is_intersecting(&self, geometry: &ScrollGeometry) -> bool {
        match self.mode {
            TriggerMode::Observe { margin_px, threshold } => {
                let ratio = geometry.visible_ratio(margin_px);
                ratio > 0.0 && ratio >= threshold
            }
            TriggerMode::Manual => false,
        }
    }

    /// Sentinel visible, more pages available, nothing in flight.
    pub fn should_load<T>(&self, geometry: &ScrollGeometry, state: &ListState<T>) -> bool {
        self.is_intersecting(geometry) && state.can_load_more()
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::observe(&ScrollConfig::default())
    }
}

/// Background task consuming geometry events.
///
/// Dropping the handle aborts the task, so the observer never outlives the
/// view that created it.
pub struct ScrollObserver {
    handle: JoinHandle<()>,
}

impl ScrollObserver {
    /// Run `on_event` for every geometry event until the sender side closes
    /// or the observer is disconnected. Events are handled one at a time.
    pub fn spawn<F, Fut>(mut events: mpsc::Receiver<ScrollGeometry>, mut on_event: F) -> Self
    where
        F: FnMut(ScrollGeometry) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            while let Some(geometry) = events.recv().await {
                on_event(geometry).await;
            }
            tracing::debug!("scroll event source closed");
        });
        Self { handle }
    }

    pub fn is_connected(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn disconnect(self) {
        // Drop does the work.
    }
}

impl Drop for ScrollObserver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
