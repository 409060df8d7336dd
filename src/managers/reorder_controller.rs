//! Drag-reorder state machine.
//!
//! ```text
//! Idle -> Dragging -> Syncing   -> Idle
//!                  -> SyncFailed -> Idle
//! ```
//!
//! The controller only accepts drops while a drag binding is attached, which the
//! renderer arranges on wide viewports. Whatever the server says afterwards,
//! the list is reloaded; the dropped order is never kept on its own.

use serde::Serialize;
use tracing::debug;

use crate::types::errors::ReorderError;

/// Where the reorder gesture currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReorderState {
    #[default]
    Idle,
    Dragging,
    Syncing,
    SyncFailed,
}

/// Tracks the drag binding and the reorder lifecycle.
#[derive(Debug, Default)]
pub struct ReorderController {
    state: ReorderState,
    attached: bool,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ReorderState {
        self.state
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Marks the drag binding as present. Called after each wide-viewport render.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Marks the drag binding as gone. An unfinished drag is abandoned.
    pub fn detach(&mut self) {
        self.attached = false;
        if self.state == ReorderState::Dragging {
            self.state = ReorderState::Idle;
        }
    }

    /// A drag gesture started on the list.
    pub fn begin_drag(&mut self) -> Result<(), ReorderError> {
        if !self.attached {
            return Err(ReorderError::Detached);
        }
        match self.state {
            ReorderState::Idle | ReorderState::Dragging => {
                self.state = ReorderState::Dragging;
                Ok(())
            }
            ReorderState::Syncing | ReorderState::SyncFailed => Err(ReorderError::SyncInFlight),
        }
    }

    /// The gesture ended with `order` as the visible ID sequence.
    ///
    /// Moves to `Syncing` and hands back the order to post. Hosts that do not
    /// report drag starts may drop straight from `Idle`.
    pub fn drop_order(&mut self, order: Vec<i64>) -> Result<Vec<i64>, ReorderError> {
        if !self.attached {
            return Err(ReorderError::Detached);
        }
        if matches!(self.state, ReorderState::Syncing | ReorderState::SyncFailed) {
            return Err(ReorderError::SyncInFlight);
        }
        if order.is_empty() {
            self.state = ReorderState::Idle;
            return Err(ReorderError::EmptyOrder);
        }
        debug!(count = order.len(), "reorder dropped");
        self.state = ReorderState::Syncing;
        Ok(order)
    }

    /// The server rejected the reorder or could not be reached.
    pub fn sync_failed(&mut self) {
        self.state = ReorderState::SyncFailed;
    }

    /// The confirming reload has been issued; back to rest.
    pub fn settle(&mut self) {
        self.state = ReorderState::Idle;
    }
}
