//! Runtime module - drives the editor without a window
//!
//! - `app` - owns the session and keymap, dispatches messages, runs side effects
//! - `input` - keystroke to message mapping, including search/replace capture
//! - `script` - replays YAML keystroke scripts

pub mod app;
pub mod input;
pub mod script;

pub use app::App;
pub use script::{run_script, Script, ScriptError};
