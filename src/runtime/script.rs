//! Headless keystroke scripts
//!
//! A script is YAML with a list of steps, replayed in order:
//!
//! ```yaml
//! steps:
//!   - keys: "ctrl+f"           # whitespace-separated keystrokes
//!   - type: "hello"            # typed one character at a time
//!   - goto: 3
//!   - replace_all: { query: o, replacement: "0" }
//!   - tick_ms: 500
//! ```
//!
//! Steps other than `keys` and `type` send messages directly; they cover
//! commands whose arguments would come from a prompt.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::keymap::{KeymapError, Keystroke};
use crate::messages::{DocumentMsg, EditorMsg, Msg, SearchMsg, SessionMsg};

use super::app::App;

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Keys(String),
    Type(String),
    /// Insert text as a paste
    Paste(String),
    Open(PathBuf),
    SaveAs(PathBuf),
    Switch(String),
    Goto(usize),
    MarkAll(String),
    ReplaceNext { query: String, replacement: String },
    ReplaceAll { query: String, replacement: String },
    TickMs(u64),
    Resize { width: u32, height: u32 },
}

/// A step ready to run
#[derive(Debug, Clone)]
pub enum Action {
    Key(Keystroke),
    Msg(Msg),
    Tick(Duration),
}

/// Errors from loading or compiling a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    Io(String),
    Parse(String),
    InvalidKey { step: usize, error: KeymapError },
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Io(e) => write!(f, "IO error: {}", e),
            ScriptError::Parse(e) => write!(f, "Parse error: {}", e),
            ScriptError::InvalidKey { step, error } => write!(f, "step {}: {}", step + 1, error),
        }
    }
}

impl std::error::Error for ScriptError {}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ScriptError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ScriptError> {
        serde_yaml::from_str(yaml).map_err(|e| ScriptError::Parse(e.to_string()))
    }

    /// Expand steps into actions, validating every keystroke up front
    pub fn actions(&self) -> Result<Vec<Action>, ScriptError> {
        let mut actions = Vec::new();
        for (idx, step) in self.steps.iter().enumerate() {
            match step {
                Step::Keys(keys) => {
                    for spec in keys.split_whitespace() {
                        let keystroke = spec
                            .parse::<Keystroke>()
                            .map_err(|error| ScriptError::InvalidKey { step: idx, error })?;
                        actions.push(Action::Key(keystroke));
                    }
                }
                Step::Type(text) => {
                    actions.extend(text.chars().map(|c| Action::Key(Keystroke::char(c))));
                }
                Step::Paste(text) => {
                    actions.push(Action::Msg(Msg::Document(DocumentMsg::InsertText(text.clone()))))
                }
                Step::Open(path) => {
                    actions.push(Action::Msg(Msg::Session(SessionMsg::OpenFile(path.clone()))))
                }
                Step::SaveAs(path) => {
                    actions.push(Action::Msg(Msg::Session(SessionMsg::SaveFileAs(path.clone()))))
                }
                Step::Switch(name) => {
                    actions.push(Action::Msg(Msg::Session(SessionMsg::SwitchTo(name.clone()))))
                }
                Step::Goto(line) => actions.push(Action::Msg(Msg::Editor(EditorMsg::GotoLine(*line)))),
                Step::MarkAll(query) => {
                    actions.push(Action::Msg(Msg::Search(SearchMsg::MarkAll(query.clone()))))
                }
                Step::ReplaceNext { query, replacement } => {
                    actions.push(Action::Msg(Msg::Search(SearchMsg::ReplaceNext {
                        query: query.clone(),
                        replacement: replacement.clone(),
                    })))
                }
                Step::ReplaceAll { query, replacement } => {
                    actions.push(Action::Msg(Msg::Search(SearchMsg::ReplaceAll {
                        query: query.clone(),
                        replacement: replacement.clone(),
                    })))
                }
                Step::TickMs(ms) => actions.push(Action::Tick(Duration::from_millis(*ms))),
                Step::Resize { width, height } => {
                    actions.push(Action::Msg(Msg::resize(*width, *height)))
                }
            }
        }
        Ok(actions)
    }
}

/// Run a script against an app until it ends or the app quits.
/// Returns the number of actions performed.
pub fn run_script(app: &mut App, script: &Script) -> Result<usize, ScriptError> {
    let actions = script.actions()?;
    let mut performed = 0;
    for action in actions {
        if !app.is_running() {
            tracing::debug!("Script stopped early: app quit");
            break;
        }
        match action {
            Action::Key(keystroke) => app.handle_keystroke(keystroke),
            Action::Msg(msg) => app.dispatch(msg),
            Action::Tick(dt) => {
                app.tick(dt);
            }
        }
        performed += 1;
    }
    tracing::info!("Script ran {} actions", performed);
    Ok(performed)
}
