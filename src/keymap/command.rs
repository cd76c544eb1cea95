//! Command enum representing all executable editor actions
//!
//! Commands are the bridge between keybindings and the message system.
//! Each command maps to one or more `Msg` values for the Elm-style update loop.

use std::str::FromStr;

use super::config::KeymapError;
use crate::messages::{
    Direction, DocumentMsg, EditorMsg, Motion, Msg, SearchMsg, SessionMsg,
};

/// All editor commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Cursor Movement (no selection)
    // ========================================================================
    MoveCursorUp,
    MoveCursorDown,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorLineStart,
    MoveCursorLineEnd,
    MoveCursorDocumentStart,
    MoveCursorDocumentEnd,
    MoveCursorWordLeft,
    MoveCursorWordRight,
    PageUp,
    PageDown,

    // ========================================================================
    // Selection Movement (extend selection)
    // ========================================================================
    MoveCursorUpWithSelection,
    MoveCursorDownWithSelection,
    MoveCursorLeftWithSelection,
    MoveCursorRightWithSelection,
    MoveCursorLineStartWithSelection,
    MoveCursorLineEndWithSelection,
    MoveCursorDocumentStartWithSelection,
    MoveCursorDocumentEndWithSelection,
    MoveCursorWordLeftWithSelection,
    MoveCursorWordRightWithSelection,
    PageUpWithSelection,
    PageDownWithSelection,

    // ========================================================================
    // Mark
    // ========================================================================
    /// Set the mark at the cursor
    SetMark,
    ClearMark,

    // ========================================================================
    // Editing
    // ========================================================================
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,
    Undo,
    Cut,
    Copy,
    Paste,

    // ========================================================================
    // Search / Replace
    // ========================================================================
    /// Start incremental search, or jump to the next match while searching
    IncrementalSearch,
    QueryReplace,

    // ========================================================================
    // Buffers and panels
    // ========================================================================
    SaveFile,
    SwitchToPreviousBuffer,
    KillBuffer,
    SplitView,
    UnsplitView,
    SwapFocus,

    // ========================================================================
    // Special
    // ========================================================================
    /// Abort search or query-replace, otherwise clear the mark
    Cancel,
    Quit,
    /// Explicitly unbound - disables a default binding
    Unbound,
}

impl Command {
    /// Convert this command to message(s) for the Elm update loop
    pub fn to_msgs(self) -> Vec<Msg> {
        use Command::*;

        let msg = match self {
            // Cursor movement
            MoveCursorUp => Msg::Editor(EditorMsg::Move(Motion::Char(Direction::Up))),
            MoveCursorDown => Msg::Editor(EditorMsg::Move(Motion::Char(Direction::Down))),
            MoveCursorLeft => Msg::Editor(EditorMsg::Move(Motion::Char(Direction::Left))),
            MoveCursorRight => Msg::Editor(EditorMsg::Move(Motion::Char(Direction::Right))),
            MoveCursorLineStart => Msg::Editor(EditorMsg::Move(Motion::LineStart)),
            MoveCursorLineEnd => Msg::Editor(EditorMsg::Move(Motion::LineEnd)),
            MoveCursorDocumentStart => Msg::Editor(EditorMsg::Move(Motion::DocumentStart)),
            MoveCursorDocumentEnd => Msg::Editor(EditorMsg::Move(Motion::DocumentEnd)),
            MoveCursorWordLeft => Msg::Editor(EditorMsg::Move(Motion::Word(Direction::Left))),
            MoveCursorWordRight => Msg::Editor(EditorMsg::Move(Motion::Word(Direction::Right))),
            PageUp => Msg::Editor(EditorMsg::Move(Motion::PageUp)),
            PageDown => Msg::Editor(EditorMsg::Move(Motion::PageDown)),

            // Selection movement
            MoveCursorUpWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::Char(Direction::Up)))
            }
            MoveCursorDownWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::Char(Direction::Down)))
            }
            MoveCursorLeftWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::Char(Direction::Left)))
            }
            MoveCursorRightWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::Char(Direction::Right)))
            }
            MoveCursorLineStartWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::LineStart))
            }
            MoveCursorLineEndWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::LineEnd))
            }
            MoveCursorDocumentStartWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::DocumentStart))
            }
            MoveCursorDocumentEndWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::DocumentEnd))
            }
            MoveCursorWordLeftWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::Word(Direction::Left)))
            }
            MoveCursorWordRightWithSelection => {
                Msg::Editor(EditorMsg::MoveWithSelection(Motion::Word(Direction::Right)))
            }
            PageUpWithSelection => Msg::Editor(EditorMsg::MoveWithSelection(Motion::PageUp)),
            PageDownWithSelection => Msg::Editor(EditorMsg::MoveWithSelection(Motion::PageDown)),

            SetMark => Msg::Editor(EditorMsg::SetMark),
            ClearMark => Msg::Editor(EditorMsg::ClearMark),

            // Editing
            InsertNewline => Msg::Document(DocumentMsg::InsertNewline),
            InsertTab => Msg::Document(DocumentMsg::InsertTab),
            DeleteBackward => Msg::Document(DocumentMsg::DeleteBackward),
            DeleteForward => Msg::Document(DocumentMsg::DeleteForward),
            Undo => Msg::Document(DocumentMsg::Undo),
            Cut => Msg::Document(DocumentMsg::Cut),
            Copy => Msg::Document(DocumentMsg::Copy),
            Paste => Msg::Document(DocumentMsg::Paste),

            // Search
            IncrementalSearch => Msg::Search(SearchMsg::Begin),
            QueryReplace => Msg::Search(SearchMsg::QueryReplace),

            // Session
            SaveFile => Msg::Session(SessionMsg::SaveFile),
            SwitchToPreviousBuffer => Msg::Session(SessionMsg::SwitchToPrevious),
            KillBuffer => Msg::Session(SessionMsg::KillBuffer),
            SplitView => Msg::Session(SessionMsg::Split),
            UnsplitView => Msg::Session(SessionMsg::Unsplit),
            SwapFocus => Msg::Session(SessionMsg::SwapFocus),
            Cancel => Msg::Session(SessionMsg::Cancel),
            Quit => Msg::Session(SessionMsg::Quit),

            Unbound => return vec![],
        };
        vec![msg]
    }

    /// Whether this command moves the cursor without editing
    pub fn is_motion(self) -> bool {
        use Command::*;
        matches!(
            self,
            MoveCursorUp
                | MoveCursorDown
                | MoveCursorLeft
                | MoveCursorRight
                | MoveCursorLineStart
                | MoveCursorLineEnd
                | MoveCursorDocumentStart
                | MoveCursorDocumentEnd
                | MoveCursorWordLeft
                | MoveCursorWordRight
                | PageUp
                | PageDown
                | MoveCursorUpWithSelection
                | MoveCursorDownWithSelection
                | MoveCursorLeftWithSelection
                | MoveCursorRightWithSelection
                | MoveCursorLineStartWithSelection
                | MoveCursorLineEndWithSelection
                | MoveCursorDocumentStartWithSelection
                | MoveCursorDocumentEndWithSelection
                | MoveCursorWordLeftWithSelection
                | MoveCursorWordRightWithSelection
                | PageUpWithSelection
                | PageDownWithSelection
        )
    }

    /// Human-readable name for the modeline and logs
    pub fn display_name(self) -> &'static str {
        use Command::*;
        match self {
            MoveCursorUp => "Cursor Up",
            MoveCursorDown => "Cursor Down",
            MoveCursorLeft => "Cursor Left",
            MoveCursorRight => "Cursor Right",
            MoveCursorLineStart => "Line Start",
            MoveCursorLineEnd => "Line End",
            MoveCursorDocumentStart => "Document Start",
            MoveCursorDocumentEnd => "Document End",
            MoveCursorWordLeft => "Word Left",
            MoveCursorWordRight => "Word Right",
            PageUp => "Page Up",
            PageDown => "Page Down",
            MoveCursorUpWithSelection => "Select Up",
            MoveCursorDownWithSelection => "Select Down",
            MoveCursorLeftWithSelection => "Select Left",
            MoveCursorRightWithSelection => "Select Right",
            MoveCursorLineStartWithSelection => "Select to Line Start",
            MoveCursorLineEndWithSelection => "Select to Line End",
            MoveCursorDocumentStartWithSelection => "Select to Document Start",
            MoveCursorDocumentEndWithSelection => "Select to Document End",
            MoveCursorWordLeftWithSelection => "Select Word Left",
            MoveCursorWordRightWithSelection => "Select Word Right",
            PageUpWithSelection => "Select Page Up",
            PageDownWithSelection => "Select Page Down",
            SetMark => "Set Mark",
            ClearMark => "Clear Mark",
            InsertNewline => "Newline",
            InsertTab => "Tab",
            DeleteBackward => "Delete Backward",
            DeleteForward => "Delete Forward",
            Undo => "Undo",
            Cut => "Cut",
            Copy => "Copy",
            Paste => "Paste",
            IncrementalSearch => "Search",
            QueryReplace => "Query Replace",
            SaveFile => "Save",
            SwitchToPreviousBuffer => "Previous Buffer",
            KillBuffer => "Kill Buffer",
            SplitView => "Split",
            UnsplitView => "Unsplit",
            SwapFocus => "Other Panel",
            Cancel => "Cancel",
            Quit => "Quit",
            Unbound => "Unbound",
        }
    }
}

impl FromStr for Command {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Command::*;
        let command = match s {
            "MoveCursorUp" => MoveCursorUp,
            "MoveCursorDown" => MoveCursorDown,
            "MoveCursorLeft" => MoveCursorLeft,
            "MoveCursorRight" => MoveCursorRight,
            "MoveCursorLineStart" => MoveCursorLineStart,
            "MoveCursorLineEnd" => MoveCursorLineEnd,
            "MoveCursorDocumentStart" => MoveCursorDocumentStart,
            "MoveCursorDocumentEnd" => MoveCursorDocumentEnd,
            "MoveCursorWordLeft" => MoveCursorWordLeft,
            "MoveCursorWordRight" => MoveCursorWordRight,
            "PageUp" => PageUp,
            "PageDown" => PageDown,

            "MoveCursorUpWithSelection" => MoveCursorUpWithSelection,
            "MoveCursorDownWithSelection" => MoveCursorDownWithSelection,
            "MoveCursorLeftWithSelection" => MoveCursorLeftWithSelection,
            "MoveCursorRightWithSelection" => MoveCursorRightWithSelection,
            "MoveCursorLineStartWithSelection" => MoveCursorLineStartWithSelection,
            "MoveCursorLineEndWithSelection" => MoveCursorLineEndWithSelection,
            "MoveCursorDocumentStartWithSelection" => MoveCursorDocumentStartWithSelection,
            "MoveCursorDocumentEndWithSelection" => MoveCursorDocumentEndWithSelection,
            "MoveCursorWordLeftWithSelection" => MoveCursorWordLeftWithSelection,
            "MoveCursorWordRightWithSelection" => MoveCursorWordRightWithSelection,
            "PageUpWithSelection" => PageUpWithSelection,
            "PageDownWithSelection" => PageDownWithSelection,

            "SetMark" => SetMark,
            "ClearMark" => ClearMark,

            "InsertNewline" => InsertNewline,
            "InsertTab" => InsertTab,
            "DeleteBackward" => DeleteBackward,
            "DeleteForward" => DeleteForward,
            "Undo" => Undo,
            "Cut" => Cut,
            "Copy" => Copy,
            "Paste" => Paste,

            "IncrementalSearch" => IncrementalSearch,
            "QueryReplace" => QueryReplace,

            "SaveFile" => SaveFile,
            "SwitchToPreviousBuffer" => SwitchToPreviousBuffer,
            "KillBuffer" => KillBuffer,
            "SplitView" => SplitView,
            "UnsplitView" => UnsplitView,
            "SwapFocus" => SwapFocus,

            "Cancel" => Cancel,
            "Quit" => Quit,
            "Unbound" => Unbound,

            _ => return Err(KeymapError::InvalidCommand(s.to_string())),
        };
        Ok(command)
    }
}
