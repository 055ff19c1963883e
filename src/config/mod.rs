//! Configuration module - Application settings and user preferences
//!
//! - Loading configuration from ~/.comfynotes/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (Config, HotkeyConfig, etc.)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::DEFAULT_CONFIG_PATH;

pub use types::{Config, HotkeyConfig, NotePanelConfig, SearchPanelConfig};

pub use loader::{load_config, load_config_from};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
