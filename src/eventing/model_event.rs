//! ModelEvent - Remote Model Notifications
//!
//! All events the model sends to the presentation layer. The renderer
//! subscribes to these to toggle its busy indicator and repaint exactly the
//! rows that changed.

use std::sync::Arc;

/// Notifications emitted by the remote model
#[derive(Debug, Clone)]
pub enum ModelEvent {
    /// A fetch was issued; show a busy indicator
    LoadingStarted,

    /// Rows in the inclusive index range `[from, to]` became available
    DataLoaded {
        /// First row index that was merged
        from: u64,
        /// Last row index that was merged
        to: u64,
    },

    /// A fetch failed; the range stays uncached and may be re-requested
    LoadFailed {
        /// First row index of the failed fetch
        from: u64,
        /// Last row index of the failed fetch
        to: u64,
        /// Human-readable failure description
        message: Arc<str>,
    },
}
