//! Window-system seam for floating panels.
//!
//! The controller only talks to a [`PanelHost`]. [`HeadlessHost`] keeps
//! windows as plain records; it backs the stdin-driven binary and the tests.

use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

use crate::error::PanelError;

/// Opaque handle to a window created by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Display bounds in top-left-origin coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBounds {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for DisplayBounds {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            width: 1440.0,
            height: 900.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PanelBounds {
    /// A `width` x `height` rectangle centred on `display`.
    pub fn centered(display: &DisplayBounds, width: f64, height: f64) -> Self {
        Self {
            x: display.origin_x + (display.width - width) / 2.0,
            y: display.origin_y + (display.height - height) / 2.0,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Search,
    Note,
}

/// What to create: a borderless, always-on-top floating panel.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub kind: PanelKind,
    pub title: String,
    pub bounds: PanelBounds,
}

pub trait PanelHost {
    fn primary_display(&self) -> DisplayBounds;

    fn create(&mut self, spec: &WindowSpec) -> Result<WindowId, PanelError>;

    /// Release the window resource. Unknown ids are ignored.
    fn destroy(&mut self, window: WindowId);

    /// Bring to front; `take_key_focus` also makes it the key window.
    fn raise(&mut self, window: WindowId, take_key_focus: bool);

    /// Ignore pointer events and refuse key status while `true`.
    fn set_passthrough(&mut self, window: WindowId, passthrough: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    pub spec: WindowSpec,
    pub passthrough: bool,
    pub key_window: bool,
    pub raise_count: u32,
}

/// In-memory host. Windows are records; nothing is drawn.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    display: DisplayBounds,
    windows: BTreeMap<WindowId, HeadlessWindow>,
    next_id: u64,
    created: u64,
    fail_next_create: Option<String>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display(display: DisplayBounds) -> Self {
        Self {
            display,
            ..Self::default()
        }
    }

    /// Make the next `create` fail with `reason`.
    pub fn fail_next_create(&mut self, reason: impl Into<String>) {
        self.fail_next_create = Some(reason.into());
    }

    pub fn window(&self, id: WindowId) -> Option<&HeadlessWindow> {
        self.windows.get(&id)
    }

    pub fn live_windows(&self) -> usize {
        self.windows.len()
    }

    /// Total windows ever created.
    pub fn created(&self) -> u64 {
        self.created
    }
}

impl PanelHost for HeadlessHost {
    fn primary_display(&self) -> DisplayBounds {
        self.display
    }

    fn create(&mut self, spec: &WindowSpec) -> Result<WindowId, PanelError> {
        if let Some(reason) = self.fail_next_create.take() {
            return Err(PanelError::Host(reason));
        }
        self.next_id += 1;
        self.created += 1;
        let id = WindowId(self.next_id);
        info!(
            window = %id,
            kind = ?spec.kind,
            title = %spec.title,
            x = spec.bounds.x,
            y = spec.bounds.y,
            width = spec.bounds.width,
            height = spec.bounds.height,
            "Created panel window"
        );
        self.windows.insert(
            id,
            HeadlessWindow {
                spec: spec.clone(),
                passthrough: false,
                key_window: false,
                raise_count: 0,
            },
        );
        Ok(id)
    }

    fn destroy(&mut self, window: WindowId) {
        if self.windows.remove(&window).is_some() {
            info!(window = %window, "Destroyed panel window");
        }
    }

    fn raise(&mut self, window: WindowId, take_key_focus: bool) {
        if take_key_focus {
            for other in self.windows.values_mut() {
                other.key_window = false;
            }
        }
        if let Some(record) = self.windows.get_mut(&window) {
            record.raise_count += 1;
            record.key_window = take_key_focus && !record.passthrough;
            debug!(window = %window, key = record.key_window, "Raised panel window");
        }
    }

    fn set_passthrough(&mut self, window: WindowId, passthrough: bool) {
        if let Some(record) = self.windows.get_mut(&window) {
            record.passthrough = passthrough;
            if passthrough {
                record.key_window = false;
            }
            debug!(window = %window, passthrough, "Panel passthrough changed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> WindowSpec {
        WindowSpec {
            kind: PanelKind::Note,
            title: "Note".into(),
            bounds: PanelBounds {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
        }
    }

    #[test]
    fn centered_bounds_respect_display_origin() {
        let display = DisplayBounds {
            origin_x: 100.0,
            origin_y: 50.0,
            width: 1000.0,
            height: 800.0,
        };
        let bounds = PanelBounds::centered(&display, 200.0, 100.0);
        assert_eq!((bounds.x, bounds.y), (500.0, 400.0));
    }

    #[test]
    fn passthrough_window_never_becomes_key() {
        let mut host = HeadlessHost::new();
        let id = host.create(&spec()).unwrap();
        host.set_passthrough(id, true);
        host.raise(id, true);

        let window = host.window(id).unwrap();
        assert!(window.passthrough);
        assert!(!window.key_window);
        assert_eq!(window.raise_count, 1);
    }

    #[test]
    fn injected_create_failure_fires_once() {
        let mut host = HeadlessHost::new();
        host.fail_next_create("no display");
        assert_eq!(
            host.create(&spec()),
            Err(PanelError::Host("no display".into()))
        );
        assert!(host.create(&spec()).is_ok());
        assert_eq!(host.created(), 1);
    }
}
