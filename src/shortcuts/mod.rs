//! Keyboard shortcut model.
//!
//! This module provides:
//! - `Shortcut` / `Modifiers` definitions shared by global and in-app bindings
//! - Parsing from config strings (`"ctrl+shift+space"`)
//! - Platform-aware display formatting
//! - Conversion to `global_hotkey::hotkey::HotKey` for OS registration
//!
//! # Example
//!
//! ```
//! use comfy_notes::shortcuts::Shortcut;
//!
//! let shortcut = Shortcut::parse("ctrl+shift+space").unwrap();
//! assert_eq!(shortcut.to_canonical_string(), "ctrl+shift+space");
//! ```

mod hotkey_compat;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

pub use types::{canonicalize_key, is_known_key, Modifiers, Platform, Shortcut, ShortcutParseError};

pub use hotkey_compat::to_global_hotkey;
