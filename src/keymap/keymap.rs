//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Result of handling a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute this command
    Execute(Command),
    /// Unbound printable keystroke; type this character
    Insert(char),
    /// No binding matches this keystroke
    NoMatch,
}

/// The keymap stores all keybindings and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    /// All registered bindings
    bindings: Vec<Keybinding>,
    /// Keystroke → index into `bindings`; later bindings win
    lookup: HashMap<Keystroke, usize>,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    /// Add a binding to the keymap
    pub fn add_binding(&mut self, binding: Keybinding) {
        if binding.command == Command::Unbound {
            self.lookup.remove(&binding.keystroke);
            return;
        }
        self.lookup.insert(binding.keystroke, self.bindings.len());
        self.bindings.push(binding);
    }

    /// Look up the command bound to a keystroke.
    ///
    /// With NumLock on, numpad digits and the decimal key are text input and
    /// never match; otherwise the NumLock state is ignored.
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        if keystroke.mods.num_lock()
            && matches!(keystroke.key, KeyCode::Numpad(_) | KeyCode::NumpadDecimal)
        {
            return None;
        }
        let normalized = Keystroke::new(keystroke.key, keystroke.mods.without(Modifiers::NUM_LOCK));
        self.lookup
            .get(&normalized)
            .map(|&idx| self.bindings[idx].command)
    }

    /// Resolve a keystroke to a command, text input, or nothing
    pub fn resolve(&self, keystroke: &Keystroke) -> KeyAction {
        if let Some(command) = self.lookup(keystroke) {
            tracing::trace!("{} → {:?}", keystroke, command);
            return KeyAction::Execute(command);
        }
        match keystroke.text() {
            Some(ch) => KeyAction::Insert(ch),
            None => KeyAction::NoMatch,
        }
    }

    /// Get all bindings
    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Find the active binding for a command (first registered wins)
    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings
            .iter()
            .enumerate()
            .find(|(idx, b)| b.command == command && self.lookup.get(&b.keystroke) == Some(idx))
            .map(|(_, b)| b)
    }

    /// Get display string for a command's keybinding
    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|b| b.display_string())
    }
}
