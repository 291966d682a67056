//! Notifications a pane sends to its owning session

use uuid::Uuid;

use crate::delegate::Delegate;
use crate::quadrant::{Orientation, Quadrant};

#[derive(Clone, Debug, PartialEq)]
pub struct SplitRequest {
    pub pane: Uuid,
    pub orientation: Orientation,
}

/// A terminal was dropped onto another one
#[derive(Clone, Debug, PartialEq)]
pub struct MoveRequest {
    pub source: Uuid,
    pub target: Uuid,
    pub quadrant: Quadrant,
}

/// A terminal was dragged out of every window; x/y are root coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct DetachRequest {
    pub pane: Uuid,
    pub x: f64,
    pub y: f64,
}

/// Input typed in a pane with synchronized input enabled
#[derive(Clone, Debug, PartialEq)]
pub struct SyncInput {
    pub source: Uuid,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TitleChanged {
    pub pane: Uuid,
    pub title: String,
}

#[derive(Default)]
pub struct PaneSignals {
    pub focus_in: Delegate<Uuid>,
    pub close_request: Delegate<Uuid>,
    pub split_request: Delegate<SplitRequest>,
    pub move_request: Delegate<MoveRequest>,
    pub detach_request: Delegate<DetachRequest>,
    pub sync_input: Delegate<SyncInput>,
    pub title_changed: Delegate<TitleChanged>,
}

impl PaneSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every subscriber, used when the pane is torn down
    pub fn clear(&self) {
        self.focus_in.clear();
        self.close_request.clear();
        self.split_request.clear();
        self.move_request.clear();
        self.detach_request.clear();
        self.sync_input.clear();
        self.title_changed.clear();
    }
}
