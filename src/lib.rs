//! comfy-notes - a hotkey-summoned note overlay
//!
//! A global hotkey opens a floating search panel over a small note
//! collection; committing a search opens the note in its own floating panel.

pub mod app;
pub mod config;
pub mod error;
pub mod hotkeys;
pub mod input;
pub mod logging;
pub mod notes;
pub mod panels;
pub mod search;
pub mod shortcuts;
pub mod stdin_commands;
