//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod document;
mod editor;
mod search;
mod session;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::Session;

#[cfg(debug_assertions)]
use crate::tracing::ViewSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use document::update_document;
pub use editor::update_editor;
pub use search::update_search;
pub use session::update_session;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(session: &mut Session, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(session, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(session, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(session: &mut Session, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => editor::update_editor(session, m),
        Msg::Document(m) => document::update_document(session, m),
        Msg::Search(m) => search::update_search(session, m),
        Msg::Session(m) => session::update_session(session, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after view state of the focused panel and logs diffs.
/// Tick messages are too frequent to log.
#[cfg(debug_assertions)]
fn update_traced(session: &mut Session, msg: Msg) -> Option<Cmd> {
    use crate::messages::SessionMsg;

    let is_noisy = matches!(&msg, Msg::Session(SessionMsg::Tick(_)));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let slot = session.active_slot();
    let id = session.active_id();
    let before = ViewSnapshot::capture(session.active_document(), slot);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(session, msg);

    // Only diff when the same document is still focused
    if session.active_id() == id && session.active_slot() == slot {
        let doc = session.active_document();
        let after = ViewSnapshot::capture(doc, slot);
        if let Some(diff) = before.diff(&after) {
            debug!(target: "cursor", %diff, "state changed");
        }
        if let Err(e) = doc.validate() {
            panic!("invariant violated after {}: {}", msg_name, e);
        }
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Editor::Move(Char(Up))`
/// - `Document::InsertChar('x')`
/// - `Session::Resize(1920, 1080)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Document(m) => format!("Document::{:?}", m),
        Msg::Search(m) => format!("Search::{:?}", m),
        Msg::Session(m) => format!("Session::{:?}", m),
    }
}
