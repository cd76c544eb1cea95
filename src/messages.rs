//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;
use std::time::Duration;

use crate::model::DocumentId;

/// Direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A cursor motion, with or without Shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Char(Direction),
    Word(Direction),
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    PageUp,
    PageDown,
}

/// Cursor movement and mark messages for the focused view
#[derive(Debug, Clone)]
pub enum EditorMsg {
    /// Plain motion; clears a mark that Shift started
    Move(Motion),
    /// Shift+motion; starts a shift-extend mark if none is active
    MoveWithSelection(Motion),
    /// Go to a 1-based line number
    GotoLine(usize),
    /// Set cursor to a 0-based position (clamped)
    SetCursorPosition { line: usize, column: usize },
    /// Set the mark at the cursor (Ctrl+Space)
    SetMark,
    /// Deactivate the mark
    ClearMark,
}

/// Text editing messages
#[derive(Debug, Clone)]
pub enum DocumentMsg {
    InsertChar(char),
    /// Insert text as if pasted: any line ending splits the line
    InsertText(String),
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,
    Cut,
    Copy,
    Paste,
    Undo,
}

/// Incremental search and replace messages
#[derive(Debug, Clone)]
pub enum SearchMsg {
    /// Enter incremental search in the focused view
    Begin,
    /// Append to the search query
    Input(char),
    /// Remove the last query character
    Backspace,
    /// Jump to the next match of the current query
    Next,
    /// Leave search, keeping the cursor where it is
    End,
    /// Leave search, returning the cursor to where it started
    Abort,
    /// Highlight every match from the cursor on
    MarkAll(String),
    ReplaceNext { query: String, replacement: String },
    ReplaceAll { query: String, replacement: String },
    /// Start an interactive query-replace
    QueryReplace,
    /// Feed the query or replacement string to an active query-replace
    QueryReplaceSubmit(String),
    /// Answer the confirm prompt: true replaces, false skips
    QueryReplaceAnswer(bool),
    /// Replace every remaining match ("!")
    QueryReplaceRest,
    QueryReplaceAbort,
}

/// Buffer and panel messages
#[derive(Debug, Clone)]
pub enum SessionMsg {
    OpenFile(PathBuf),
    SaveFile,
    SaveFileAs(PathBuf),
    /// Result of a save performed by the runtime
    SaveCompleted {
        id: DocumentId,
        result: Result<(), String>,
    },
    SwitchTo(String),
    SwitchToPrevious,
    KillBuffer,
    Split,
    Unsplit,
    SwapFocus,
    /// Cancel whatever is in progress (Ctrl+G / Escape)
    Cancel,
    /// Advance animations
    Tick(Duration),
    /// Viewport size changed, in pixels
    Resize(u32, u32),
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Cursor and mark messages
    Editor(EditorMsg),
    /// Text editing messages
    Document(DocumentMsg),
    /// Search and replace messages
    Search(SearchMsg),
    /// Buffer, panel and lifecycle messages
    Session(SessionMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Create a cursor movement message
    pub fn move_cursor(direction: Direction) -> Self {
        Msg::Editor(EditorMsg::Move(Motion::Char(direction)))
    }

    /// Create an insert character message
    pub fn insert_char(ch: char) -> Self {
        Msg::Document(DocumentMsg::InsertChar(ch))
    }

    /// Create a resize message
    pub fn resize(width: u32, height: u32) -> Self {
        Msg::Session(SessionMsg::Resize(width, height))
    }
}
