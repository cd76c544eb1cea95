//! Configurable keyboard mapping system
//!
//! This module provides a data-driven keybinding system that:
//! - Maps keystrokes to editor commands
//! - Aliases keys through extra table entries (numpad 7 without NumLock is Home)
//! - Enables user customization via YAML config files
//!
//! # Architecture
//!
//! ```text
//! "ctrl+shift+home" → Keystroke → Keymap::resolve() → Command → Vec<Msg>
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Embedded defaults merged with ~/.config/ame/keymap.yaml
//! let keymap = Keymap::with_bindings(load_default_keymap());
//!
//! // Or hardcoded defaults only
//! let keymap = Keymap::with_bindings(default_bindings());
//! ```

mod binding;
mod command;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_keymap_yaml, KeymapError};
pub use defaults::{default_bindings, load_default_keymap, merge_bindings};
pub use keymap::{KeyAction, Keymap};
pub use types::{parse_key_string, KeyCode, Keystroke, Modifiers};
