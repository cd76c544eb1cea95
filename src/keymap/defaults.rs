//! Default keybindings for the editor
//!
//! The defaults ship as `keymap.yaml`, embedded at compile time, with a
//! hardcoded copy as fallback. Users override them in `~/.config/ame/keymap.yaml`.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::load_keymap_file;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Load and merge keymaps: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. User config at ~/.config/ame/keymap.yaml
///
/// User bindings with `command: Unbound` remove matching default bindings.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let bindings = match super::config::parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    match crate::config_paths::keymap_file() {
        Some(user_path) if user_path.exists() => with_user_keymap(bindings, &user_path),
        _ => bindings,
    }
}

fn with_user_keymap(bindings: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    match load_keymap_file(path) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                path.display(),
                user_bindings.len()
            );
            merge_bindings(bindings, user_bindings)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            bindings
        }
    }
}

/// Merge user bindings into base bindings
///
/// - If a user binding has the same keystroke as a base binding → replaces it
/// - If the user binding command is `Unbound` → removes the base binding
/// - Otherwise → the user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        match result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded default keybindings, mirroring `keymap.yaml`
pub fn default_bindings() -> Vec<Keybinding> {
    let none = Modifiers::NONE;
    let shift = Modifiers::SHIFT;
    let ctrl = Modifiers::CTRL;
    let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;
    let alt = Modifiers::ALT;

    let bind = |key: KeyCode, mods: Modifiers, command: Command| {
        Keybinding::new(Keystroke::new(key, mods), command)
    };

    vec![
        // Cursor movement
        bind(KeyCode::Up, none, Command::MoveCursorUp),
        bind(KeyCode::Down, none, Command::MoveCursorDown),
        bind(KeyCode::Left, none, Command::MoveCursorLeft),
        bind(KeyCode::Right, none, Command::MoveCursorRight),
        bind(KeyCode::Home, none, Command::MoveCursorLineStart),
        bind(KeyCode::End, none, Command::MoveCursorLineEnd),
        bind(KeyCode::Home, ctrl, Command::MoveCursorDocumentStart),
        bind(KeyCode::End, ctrl, Command::MoveCursorDocumentEnd),
        bind(KeyCode::Left, ctrl, Command::MoveCursorWordLeft),
        bind(KeyCode::Right, ctrl, Command::MoveCursorWordRight),
        bind(KeyCode::PageUp, none, Command::PageUp),
        bind(KeyCode::PageDown, none, Command::PageDown),
        // Numpad navigation
        bind(KeyCode::Numpad(8), none, Command::MoveCursorUp),
        bind(KeyCode::Numpad(2), none, Command::MoveCursorDown),
        bind(KeyCode::Numpad(4), none, Command::MoveCursorLeft),
        bind(KeyCode::Numpad(6), none, Command::MoveCursorRight),
        bind(KeyCode::Numpad(7), none, Command::MoveCursorLineStart),
        bind(KeyCode::Numpad(1), none, Command::MoveCursorLineEnd),
        bind(KeyCode::Numpad(7), ctrl, Command::MoveCursorDocumentStart),
        bind(KeyCode::Numpad(1), ctrl, Command::MoveCursorDocumentEnd),
        bind(KeyCode::Numpad(9), none, Command::PageUp),
        bind(KeyCode::Numpad(3), none, Command::PageDown),
        bind(KeyCode::NumpadDecimal, none, Command::DeleteForward),
        // Selection movement
        bind(KeyCode::Up, shift, Command::MoveCursorUpWithSelection),
        bind(KeyCode::Down, shift, Command::MoveCursorDownWithSelection),
        bind(KeyCode::Left, shift, Command::MoveCursorLeftWithSelection),
        bind(KeyCode::Right, shift, Command::MoveCursorRightWithSelection),
        bind(KeyCode::Home, shift, Command::MoveCursorLineStartWithSelection),
        bind(KeyCode::End, shift, Command::MoveCursorLineEndWithSelection),
        bind(KeyCode::Home, ctrl_shift, Command::MoveCursorDocumentStartWithSelection),
        bind(KeyCode::End, ctrl_shift, Command::MoveCursorDocumentEndWithSelection),
        bind(KeyCode::Left, ctrl_shift, Command::MoveCursorWordLeftWithSelection),
        bind(KeyCode::Right, ctrl_shift, Command::MoveCursorWordRightWithSelection),
        bind(KeyCode::PageUp, shift, Command::PageUpWithSelection),
        bind(KeyCode::PageDown, shift, Command::PageDownWithSelection),
        bind(KeyCode::Numpad(7), shift, Command::MoveCursorLineStartWithSelection),
        bind(KeyCode::Numpad(1), shift, Command::MoveCursorLineEndWithSelection),
        bind(KeyCode::Numpad(7), ctrl_shift, Command::MoveCursorDocumentStartWithSelection),
        bind(KeyCode::Numpad(1), ctrl_shift, Command::MoveCursorDocumentEndWithSelection),
        // Mark
        bind(KeyCode::Space, ctrl, Command::SetMark),
        // Editing
        bind(KeyCode::Enter, none, Command::InsertNewline),
        bind(KeyCode::NumpadEnter, none, Command::InsertNewline),
        bind(KeyCode::Tab, none, Command::InsertTab),
        bind(KeyCode::Backspace, none, Command::DeleteBackward),
        bind(KeyCode::Delete, none, Command::DeleteForward),
        bind(KeyCode::Char('z'), ctrl, Command::Undo),
        bind(KeyCode::Char('x'), ctrl, Command::Cut),
        bind(KeyCode::Char('c'), ctrl, Command::Copy),
        bind(KeyCode::Char('v'), ctrl, Command::Paste),
        // Search
        bind(KeyCode::Char('f'), ctrl, Command::IncrementalSearch),
        bind(KeyCode::Char('r'), ctrl, Command::QueryReplace),
        // Buffers and panels
        bind(KeyCode::Char('s'), ctrl, Command::SaveFile),
        bind(KeyCode::Char('b'), ctrl, Command::SwitchToPreviousBuffer),
        bind(KeyCode::Char('w'), ctrl, Command::KillBuffer),
        bind(KeyCode::Char('2'), ctrl, Command::SplitView),
        bind(KeyCode::Char('1'), ctrl, Command::UnsplitView),
        bind(KeyCode::Char('o'), alt, Command::SwapFocus),
        // Special
        bind(KeyCode::Char('g'), ctrl, Command::Cancel),
        bind(KeyCode::Escape, none, Command::Cancel),
        bind(KeyCode::Char('q'), ctrl, Command::Quit),
    ]
}
