//! Floating overlay panels.
//!
//! - `state` - `PanelState` and its pure transition function
//! - `host` - `PanelHost`, the window-system seam, and `HeadlessHost`
//! - `controller` - `PanelController`, which owns the search panel and note panels

mod controller;
mod host;
mod state;

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use controller::{
    CloseReason, KeyOutcome, PanelController, PanelInfo, PanelLayout, PanelTarget,
    UNTITLED_NOTE_NAME,
};
pub use host::{
    DisplayBounds, HeadlessHost, HeadlessWindow, PanelBounds, PanelHost, PanelKind, WindowId,
    WindowSpec,
};
pub use state::{PanelEvent, PanelState};

/// Logical panel identity. The search panel is always `PanelId::SEARCH`;
/// note panels are numbered from 1 in opening order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub u64);

impl PanelId {
    pub const SEARCH: PanelId = PanelId(0);
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == PanelId::SEARCH {
            write!(f, "search")
        } else {
            write!(f, "note-panel-{}", self.0)
        }
    }
}
