//! Core shortcut types with proper error handling and platform-aware display.
//!
//! - `Shortcut` - A keyboard shortcut (modifiers + key)
//! - `Modifiers` - Modifier key flags (cmd, ctrl, alt, shift)
//! - `ShortcutParseError` - Detailed parse errors for user feedback
//! - Platform-aware display (⌃⇧␣ on macOS, Ctrl+Shift+Space on Windows/Linux)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing a shortcut string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("shortcut string is empty")]
    Empty,
    #[error("shortcut has no key, only modifiers")]
    MissingKey,
    #[error("unknown token '{0}' in shortcut")]
    UnknownToken(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// Modifier keys for a shortcut.
///
/// `cmd` is the platform accelerator: Command (⌘) on macOS, Super elsewhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub cmd: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

impl Modifiers {
    pub fn ctrl_shift() -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Default::default()
        }
    }

    pub fn cmd_shift() -> Self {
        Self {
            cmd: true,
            shift: true,
            ..Default::default()
        }
    }

    pub fn any(&self) -> bool {
        self.cmd || self.ctrl || self.alt || self.shift
    }
}

/// Platform enum for display formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

/// A keyboard shortcut consisting of modifier keys and a main key.
///
/// The key is always stored in canonical lowercase form (`"space"`, `"1"`,
/// `"k"`), so two shortcuts compare equal exactly when they describe the
/// same physical combination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shortcut {
    pub key: String,
    pub modifiers: Modifiers,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: canonicalize_key(&key.into()),
            modifiers,
        }
    }

    /// Parse strings such as `"ctrl+shift+space"`, `"Cmd Shift 1"` or `"⌘⇧K"`-style
    /// token lists separated by `+` or whitespace.
    pub fn parse(s: &str) -> Result<Self, ShortcutParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShortcutParseError::Empty);
        }

        let normalized = s.replace('+', " ");
        let mut modifiers = Modifiers::default();
        let mut key_part: Option<&str> = None;

        for part in normalized.split_whitespace() {
            match part.to_lowercase().as_str() {
                "cmd" | "command" | "meta" | "super" | "win" | "⌘" => modifiers.cmd = true,
                "ctrl" | "control" | "ctl" | "⌃" => modifiers.ctrl = true,
                "alt" | "opt" | "option" | "⌥" => modifiers.alt = true,
                "shift" | "⇧" => modifiers.shift = true,
                _ => {
                    if key_part.is_some() {
                        return Err(ShortcutParseError::UnknownToken(part.to_string()));
                    }
                    key_part = Some(part);
                }
            }
        }

        let key = key_part.ok_or(ShortcutParseError::MissingKey)?;
        let canonical_key = canonicalize_key(key);
        if !is_known_key(&canonical_key) {
            return Err(ShortcutParseError::UnknownKey(key.to_string()));
        }

        Ok(Self {
            key: canonical_key,
            modifiers,
        })
    }

    pub fn display(&self) -> String {
        self.display_for_platform(Platform::current())
    }

    pub fn display_for_platform(&self, platform: Platform) -> String {
        match platform {
            Platform::MacOS => {
                let mut s = String::new();
                if self.modifiers.ctrl {
                    s.push('⌃');
                }
                if self.modifiers.alt {
                    s.push('⌥');
                }
                if self.modifiers.shift {
                    s.push('⇧');
                }
                if self.modifiers.cmd {
                    s.push('⌘');
                }
                s.push_str(&self.key_symbol());
                s
            }
            Platform::Windows | Platform::Linux => {
                let mut parts: Vec<String> = Vec::new();
                if self.modifiers.ctrl {
                    parts.push("Ctrl".to_string());
                }
                if self.modifiers.alt {
                    parts.push("Alt".to_string());
                }
                if self.modifiers.shift {
                    parts.push("Shift".to_string());
                }
                if self.modifiers.cmd {
                    parts.push("Super".to_string());
                }
                parts.push(self.key_text());
                parts.join("+")
            }
        }
    }

    fn key_symbol(&self) -> String {
        match self.key.as_str() {
            "enter" => "↵",
            "escape" => "⎋",
            "tab" => "⇥",
            "space" => "␣",
            "backspace" => "⌫",
            "up" => "↑",
            "down" => "↓",
            "left" => "←",
            "right" => "→",
            _ => return self.key_text(),
        }
        .to_string()
    }

    fn key_text(&self) -> String {
        match self.key.as_str() {
            "enter" => "Enter".to_string(),
            "escape" => "Esc".to_string(),
            "space" => "Space".to_string(),
            "backspace" => "Backspace".to_string(),
            "up" => "Up".to_string(),
            "down" => "Down".to_string(),
            "left" => "Left".to_string(),
            "right" => "Right".to_string(),
            k => k.to_uppercase(),
        }
    }

    /// Stable string form used for config files and logs (`"ctrl+shift+space"`).
    pub fn to_canonical_string(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.modifiers.alt {
            parts.push("alt");
        }
        if self.modifiers.cmd {
            parts.push("cmd");
        }
        if self.modifiers.ctrl {
            parts.push("ctrl");
        }
        if self.modifiers.shift {
            parts.push("shift");
        }
        parts.push(&self.key);
        parts.join("+")
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Canonicalize a key name to the internal standard form.
///
/// Accepts DOM-style codes (`KeyK`, `Digit1`, `ArrowUp`) as well as the short
/// names people type by hand.
pub fn canonicalize_key(key: &str) -> String {
    let key_lower = key.to_lowercase();

    if let Some(rest) = key_lower.strip_prefix("key") {
        if rest.len() == 1 && rest.chars().all(|c| c.is_ascii_lowercase()) {
            return rest.to_string();
        }
    }
    if let Some(rest) = key_lower.strip_prefix("digit") {
        if rest.len() == 1 && rest.chars().all(|c| c.is_ascii_digit()) {
            return rest.to_string();
        }
    }

    match key_lower.as_str() {
        "arrowup" | "uparrow" => "up",
        "arrowdown" | "downarrow" => "down",
        "arrowleft" | "leftarrow" => "left",
        "arrowright" | "rightarrow" => "right",
        "return" | "numpadenter" | "kpenter" => "enter",
        "esc" => "escape",
        "spacebar" | " " => "space",
        "back" => "backspace",
        "del" => "delete",
        ";" => "semicolon",
        "," => "comma",
        "." => "period",
        "/" => "slash",
        "-" => "minus",
        "=" => "equal",
        _ => return key_lower,
    }
    .to_string()
}

/// Check if a canonical key name is known/valid.
pub fn is_known_key(key: &str) -> bool {
    let single_alnum =
        key.len() == 1 && key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if single_alnum {
        return true;
    }

    if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        return (1..=24).contains(&n);
    }

    matches!(
        key,
        "space"
            | "enter"
            | "tab"
            | "escape"
            | "backspace"
            | "delete"
            | "up"
            | "down"
            | "left"
            | "right"
            | "home"
            | "end"
            | "pageup"
            | "pagedown"
            | "semicolon"
            | "quote"
            | "comma"
            | "period"
            | "slash"
            | "backslash"
            | "bracketleft"
            | "bracketright"
            | "minus"
            | "equal"
            | "backquote"
    )
}
