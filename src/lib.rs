//! ame - Elm-style editing core
//!
//! This crate provides the core types and logic for a small text editor:
//! a line store, documents with two views each, mark/selection,
//! incremental search, replace and query-replace, and snapshot undo.

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod replace;
pub mod runtime;
pub mod search;
pub mod tracing;
pub mod undo;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::{Document, Session};
