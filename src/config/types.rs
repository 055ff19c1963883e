//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;
use crate::shortcuts::{Shortcut, ShortcutParseError};

// ============================================
// HOTKEYS
// ============================================

/// A key combination as written in config.json.
///
/// ```json
/// { "modifiers": ["ctrl", "shift"], "key": "Space" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    pub modifiers: Vec<String>,
    pub key: String,
}

impl HotkeyConfig {
    /// Control+Shift+Space
    pub fn default_launcher() -> Self {
        HotkeyConfig {
            modifiers: to_owned_list(DEFAULT_LAUNCHER_MODIFIERS),
            key: DEFAULT_LAUNCHER_KEY.to_string(),
        }
    }

    /// Command+Shift+1
    pub fn default_toggle_interaction() -> Self {
        HotkeyConfig {
            modifiers: to_owned_list(DEFAULT_TOGGLE_INTERACTION_MODIFIERS),
            key: DEFAULT_TOGGLE_INTERACTION_KEY.to_string(),
        }
    }

    /// Convert to canonical shortcut string format (e.g., "ctrl+shift+space").
    ///
    /// "meta" maps to "cmd"; keys like "KeyX"/"Digit0" are normalized by the
    /// shortcut parser.
    pub fn to_shortcut_string(&self) -> String {
        let mut parts: Vec<String> = self
            .modifiers
            .iter()
            .map(|m| match m.as_str() {
                "meta" => "cmd".to_string(),
                other => other.to_string(),
            })
            .collect();
        parts.push(self.key.clone());
        parts.join("+")
    }

    pub fn to_shortcut(&self) -> Result<Shortcut, ShortcutParseError> {
        Shortcut::parse(&self.to_shortcut_string())
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================
// PANEL GEOMETRY
// ============================================

/// Search panel sizing; the panel is content-fitted to its result rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPanelConfig {
    #[serde(default = "default_search_width")]
    pub width: f64,
    #[serde(default = "default_search_base_height")]
    pub base_height: f64,
    #[serde(default = "default_search_row_height")]
    pub row_height: f64,
    #[serde(default = "default_search_max_rows")]
    pub max_rows: usize,
}

fn default_search_width() -> f64 {
    DEFAULT_SEARCH_PANEL_WIDTH
}
fn default_search_base_height() -> f64 {
    DEFAULT_SEARCH_PANEL_BASE_HEIGHT
}
fn default_search_row_height() -> f64 {
    DEFAULT_SEARCH_PANEL_ROW_HEIGHT
}
fn default_search_max_rows() -> usize {
    DEFAULT_SEARCH_PANEL_MAX_ROWS
}

impl Default for SearchPanelConfig {
    fn default() -> Self {
        SearchPanelConfig {
            width: DEFAULT_SEARCH_PANEL_WIDTH,
            base_height: DEFAULT_SEARCH_PANEL_BASE_HEIGHT,
            row_height: DEFAULT_SEARCH_PANEL_ROW_HEIGHT,
            max_rows: DEFAULT_SEARCH_PANEL_MAX_ROWS,
        }
    }
}

/// Fixed placement for every note panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotePanelConfig {
    #[serde(default = "default_note_x")]
    pub x: f64,
    #[serde(default = "default_note_y")]
    pub y: f64,
    #[serde(default = "default_note_width")]
    pub width: f64,
    #[serde(default = "default_note_height")]
    pub height: f64,
}

fn default_note_x() -> f64 {
    DEFAULT_NOTE_PANEL_X
}
fn default_note_y() -> f64 {
    DEFAULT_NOTE_PANEL_Y
}
fn default_note_width() -> f64 {
    DEFAULT_NOTE_PANEL_WIDTH
}
fn default_note_height() -> f64 {
    DEFAULT_NOTE_PANEL_HEIGHT
}

impl Default for NotePanelConfig {
    fn default() -> Self {
        NotePanelConfig {
            x: DEFAULT_NOTE_PANEL_X,
            y: DEFAULT_NOTE_PANEL_Y,
            width: DEFAULT_NOTE_PANEL_WIDTH,
            height: DEFAULT_NOTE_PANEL_HEIGHT,
        }
    }
}

// ============================================
// MAIN CONFIG
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Global hotkey that opens the search panel (default: Ctrl+Shift+Space)
    #[serde(default = "HotkeyConfig::default_launcher")]
    pub launcher_hotkey: HotkeyConfig,
    /// In-app shortcut toggling click-through (default: Cmd+Shift+1)
    #[serde(default = "HotkeyConfig::default_toggle_interaction")]
    pub toggle_interaction_hotkey: HotkeyConfig,
    /// Where notes are persisted (default: ~/.comfynotes/notes.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_panel: Option<SearchPanelConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_panel: Option<NotePanelConfig>,
    /// Fill an empty store with sample notes on first load (default: false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_sample_notes: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            launcher_hotkey: HotkeyConfig::default_launcher(),
            toggle_interaction_hotkey: HotkeyConfig::default_toggle_interaction(),
            notes_path: None,
            search_panel: None,
            note_panel: None,
            seed_sample_notes: None,
        }
    }
}

impl Config {
    /// Notes file path with `~` expanded
    pub fn get_notes_path(&self) -> PathBuf {
        let raw = self.notes_path.as_deref().unwrap_or(DEFAULT_NOTES_PATH);
        PathBuf::from(shellexpand::tilde(raw).as_ref())
    }

    pub fn get_search_panel(&self) -> SearchPanelConfig {
        self.search_panel.clone().unwrap_or_default()
    }

    pub fn get_note_panel(&self) -> NotePanelConfig {
        self.note_panel.clone().unwrap_or_default()
    }

    pub fn get_seed_sample_notes(&self) -> bool {
        self.seed_sample_notes.unwrap_or(DEFAULT_SEED_SAMPLE_NOTES)
    }
}
