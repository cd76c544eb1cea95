//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::model::DocumentId;

/// Side effects returned by `update`
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Request a redraw
    Redraw,
    /// Write a document to its file, or to `path` when saving under a new name
    SaveFile {
        id: DocumentId,
        path: Option<PathBuf>,
    },
    /// Highlights or scrolling are still animating; keep ticking
    Animate,
    /// Request application exit
    Quit,
}
