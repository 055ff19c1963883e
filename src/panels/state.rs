//! Per-panel lifecycle state machine.

use serde::Serialize;

/// Lifecycle of one floating panel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelState {
    /// No window resource held.
    #[default]
    Closed,
    /// Accepts pointer input and can become the key window.
    OpenInteractive,
    /// Still drawn, but pointer input falls through and it never takes key focus.
    OpenPassthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Open,
    ToggleInteraction,
    FocusLost,
    Close,
}

impl PanelState {
    /// Next state for `event`. Events that do not apply leave the state unchanged.
    pub fn transition(self, event: PanelEvent) -> PanelState {
        use PanelEvent::*;
        use PanelState::*;
        match (self, event) {
            (Closed, Open) => OpenInteractive,
            (Closed, _) => Closed,
            (OpenInteractive, ToggleInteraction) => OpenPassthrough,
            (OpenPassthrough, ToggleInteraction) => OpenInteractive,
            (OpenInteractive, FocusLost) => Closed,
            // a passthrough window cannot hold key focus, so it cannot lose it
            (OpenPassthrough, FocusLost) => OpenPassthrough,
            (_, Close) => Closed,
            (open, Open) => open,
        }
    }

    pub fn is_open(self) -> bool {
        self != PanelState::Closed
    }

    pub fn is_passthrough(self) -> bool {
        self == PanelState::OpenPassthrough
    }

    pub fn can_become_key(self) -> bool {
        self == PanelState::OpenInteractive
    }
}
