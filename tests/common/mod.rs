//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use ame::clipboard::MemoryClipboard;
use ame::config::EditorConfig;
use ame::messages::{EditorMsg, Msg};
use ame::keymap::{default_bindings, parse_key_string, Keymap, Keystroke};
use ame::model::{Document, Session, ViewSlot};
use ame::runtime::App;
use ame::update::update;

/// Create a test session showing `text` with the cursor at (line, column)
pub fn test_session(text: &str, line: usize, column: usize) -> Session {
    let mut session = Session::with_document(Document::with_text(text));
    let slot = session.active_slot();
    session.active_document_mut().set_cursor(slot, line, column);
    session
}

/// Create a test session with the mark at (anchor) and the cursor at (head)
pub fn test_session_with_selection(
    text: &str,
    anchor_line: usize,
    anchor_col: usize,
    head_line: usize,
    head_col: usize,
) -> Session {
    let mut session = test_session(text, anchor_line, anchor_col);
    update(&mut session, Msg::Editor(EditorMsg::SetMark));
    update(
        &mut session,
        Msg::Editor(EditorMsg::SetCursorPosition {
            line: head_line,
            column: head_col,
        }),
    );
    session
}

/// A session with an explicit config and an in-memory clipboard
pub fn session_with_config(text: &str, config: EditorConfig) -> Session {
    let mut session = Session::new(config, Box::new(MemoryClipboard::new()));
    let id = session.add_document(Document::with_text(text));
    session.show(id);
    session
}

/// Helper to get buffer content as string
pub fn buffer_to_string(session: &Session) -> String {
    session.active_document().text()
}

/// Lines of the active document
pub fn lines(session: &Session) -> Vec<String> {
    session.active_document().lines().texts()
}

/// Cursor of the focused view as (line, column)
pub fn cursor(session: &Session) -> (usize, usize) {
    session
        .active_document()
        .cursor_position(session.active_slot())
}

pub fn cursor_in(session: &Session, slot: ViewSlot) -> (usize, usize) {
    session.active_document().cursor_position(slot)
}

/// Send a batch of messages
pub fn send(session: &mut Session, msgs: impl IntoIterator<Item = Msg>) {
    for msg in msgs {
        update(session, msg);
    }
}

/// Type a string one character at a time
pub fn type_text(session: &mut Session, text: &str) {
    send(session, text.chars().map(Msg::insert_char));
}

/// An app over `test_session` using the built-in key bindings
pub fn test_app(text: &str, line: usize, column: usize) -> App {
    App::new(
        test_session(text, line, column),
        Keymap::with_bindings(default_bindings()),
    )
}

/// Press whitespace-separated keystrokes, e.g. `"ctrl+f b a r enter"`
pub fn press(app: &mut App, keys: &str) {
    for spec in keys.split_whitespace() {
        let keystroke = parse_key_string(spec)
            .unwrap_or_else(|e| panic!("bad keystroke {:?}: {}", spec, e));
        app.handle_keystroke(keystroke);
    }
}

/// Type literal text as plain character keystrokes
pub fn type_keys(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_keystroke(Keystroke::char(ch));
    }
}

pub fn app_lines(app: &App) -> Vec<String> {
    lines(&app.session)
}

pub fn app_cursor(app: &App) -> (usize, usize) {
    cursor(&app.session)
}

/// Deterministic xorshift generator for fuzz-style tests
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform-ish value in `0..n` (n > 0)
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}
