//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Launcher hotkey: opens the search panel from anywhere (Control+Shift+Space)
pub const DEFAULT_LAUNCHER_MODIFIERS: &[&str] = &["ctrl", "shift"];
pub const DEFAULT_LAUNCHER_KEY: &str = "Space";

/// In-app shortcut toggling interactive/click-through (Command+Shift+1)
pub const DEFAULT_TOGGLE_INTERACTION_MODIFIERS: &[&str] = &["meta", "shift"];
pub const DEFAULT_TOGGLE_INTERACTION_KEY: &str = "Digit1";

/// Notes file location (tilde-expanded)
pub const DEFAULT_NOTES_PATH: &str = "~/.comfynotes/notes.json";

/// Config file location (tilde-expanded)
pub const DEFAULT_CONFIG_PATH: &str = "~/.comfynotes/config.json";

/// Search panel geometry: 500px field plus 16px padding each side
pub const DEFAULT_SEARCH_PANEL_WIDTH: f64 = 532.0;
/// Height of the query field including its padding
pub const DEFAULT_SEARCH_PANEL_BASE_HEIGHT: f64 = 92.0;
pub const DEFAULT_SEARCH_PANEL_ROW_HEIGHT: f64 = 36.0;
pub const DEFAULT_SEARCH_PANEL_MAX_ROWS: usize = 8;

/// Note panels open at a fixed origin; no overlap avoidance
pub const DEFAULT_NOTE_PANEL_X: f64 = 200.0;
pub const DEFAULT_NOTE_PANEL_Y: f64 = 200.0;
pub const DEFAULT_NOTE_PANEL_WIDTH: f64 = 600.0;
pub const DEFAULT_NOTE_PANEL_HEIGHT: f64 = 600.0;

pub const DEFAULT_SEED_SAMPLE_NOTES: bool = false;
