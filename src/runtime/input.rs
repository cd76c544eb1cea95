//! Keyboard input routing
//!
//! Most keystrokes go through the keymap. Two modes capture input first:
//! - query-replace, which collects its strings and then y/n/! answers
//! - incremental search, where typing edits the query
//!
//! Everything here is pure: it maps one keystroke to messages.

use crate::keymap::{Command, KeyAction, Keymap, Keystroke};
use crate::messages::{DocumentMsg, Msg, SearchMsg};
use crate::model::Session;
use crate::replace::QueryReplaceState;

/// Map a keystroke to the messages it produces.
///
/// `prompt` holds the string being typed while query-replace collects
/// its query or replacement.
pub fn map_keystroke(
    session: &Session,
    keymap: &Keymap,
    prompt: &mut String,
    keystroke: Keystroke,
) -> Vec<Msg> {
    let action = keymap.resolve(&keystroke);

    // Focus capture: query-replace owns the keyboard while active
    if let Some(qr) = &session.query_replace {
        return match qr.state() {
            QueryReplaceState::CollectQuery | QueryReplaceState::CollectReplacement { .. } => {
                map_prompt_key(action, prompt)
            }
            QueryReplaceState::Confirm { .. } => map_confirm_key(action),
            QueryReplaceState::Done { .. } => vec![],
        };
    }

    if session
        .active_document()
        .view(session.active_slot())
        .search
        .is_searching()
    {
        return map_search_key(action);
    }

    match action {
        KeyAction::Execute(command) => command.to_msgs(),
        KeyAction::Insert(ch) => vec![Msg::Document(DocumentMsg::InsertChar(ch))],
        KeyAction::NoMatch => {
            tracing::trace!("Unbound keystroke {}", keystroke);
            vec![]
        }
    }
}

fn map_prompt_key(action: KeyAction, prompt: &mut String) -> Vec<Msg> {
    match action {
        KeyAction::Insert(ch) => {
            prompt.push(ch);
            vec![]
        }
        KeyAction::Execute(Command::DeleteBackward) => {
            prompt.pop();
            vec![]
        }
        KeyAction::Execute(Command::InsertNewline) => {
            vec![Msg::Search(SearchMsg::QueryReplaceSubmit(std::mem::take(prompt)))]
        }
        KeyAction::Execute(Command::Cancel) => {
            prompt.clear();
            vec![Msg::Search(SearchMsg::QueryReplaceAbort)]
        }
        _ => vec![],
    }
}

fn map_confirm_key(action: KeyAction) -> Vec<Msg> {
    let msg = match action {
        KeyAction::Insert('y' | 'Y' | ' ') => SearchMsg::QueryReplaceAnswer(true),
        KeyAction::Insert('n' | 'N') | KeyAction::Execute(Command::DeleteBackward) => {
            SearchMsg::QueryReplaceAnswer(false)
        }
        KeyAction::Insert('!') => SearchMsg::QueryReplaceRest,
        KeyAction::Insert('q' | 'Q')
        | KeyAction::Execute(Command::InsertNewline | Command::Cancel) => {
            SearchMsg::QueryReplaceAbort
        }
        _ => return vec![],
    };
    vec![Msg::Search(msg)]
}

fn map_search_key(action: KeyAction) -> Vec<Msg> {
    match action {
        KeyAction::Insert(ch) => vec![Msg::Search(SearchMsg::Input(ch))],
        KeyAction::Execute(Command::DeleteBackward) => vec![Msg::Search(SearchMsg::Backspace)],
        KeyAction::Execute(Command::IncrementalSearch) => vec![Msg::Search(SearchMsg::Next)],
        KeyAction::Execute(Command::InsertNewline) => vec![Msg::Search(SearchMsg::End)],
        KeyAction::Execute(Command::Cancel) => vec![Msg::Search(SearchMsg::Abort)],
        // Any other command ends the search and then runs
        KeyAction::Execute(command) => {
            let mut msgs = vec![Msg::Search(SearchMsg::End)];
            msgs.extend(command.to_msgs());
            msgs
        }
        KeyAction::NoMatch => vec![],
    }
}
