//! Session - open documents, the two panels, and which one has focus
//!
//! Each panel shows one document through that document's matching view:
//! the left panel uses `ViewSlot::Left`, the right panel `ViewSlot::Right`.
//! Both panels may show the same document.

use std::io;
use std::path::Path;
use std::time::Duration;

use super::document::Document;
use super::view::{ViewSlot, ViewportMetrics};
use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::EditorConfig;
use crate::replace::QueryReplace;
use crate::util::LoadError;

/// Unique identifier for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// What `open_file` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The file was already open; its document is now shown
    Switched,
    /// The file was read from disk
    Loaded,
    /// No such file; a new empty document will create it on save
    Created,
}

#[derive(Debug)]
pub struct Session {
    documents: Vec<Document>,
    next_document_id: u64,
    /// Document shown in each panel; the left panel is never empty
    panels: [Option<DocumentId>; 2],
    focus: ViewSlot,
    previous: Option<DocumentId>,
    pub config: EditorConfig,
    /// Viewport size shared by every document
    metrics: ViewportMetrics,
    pub clipboard: Box<dyn Clipboard>,
    /// Active query-replace, which takes over input until done
    pub query_replace: Option<QueryReplace>,
    /// Transient message for the prompt line
    pub message: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EditorConfig::default(), Box::new(MemoryClipboard::new()))
    }
}

impl Session {
    /// A session holding one scratch document
    pub fn new(config: EditorConfig, clipboard: Box<dyn Clipboard>) -> Self {
        let mut session = Self {
            documents: Vec::new(),
            next_document_id: 1,
            panels: [None, None],
            focus: ViewSlot::Left,
            previous: None,
            config,
            metrics: ViewportMetrics::default(),
            clipboard,
            query_replace: None,
            message: None,
        };
        let id = session.add_document(Document::new());
        session.panels[ViewSlot::Left.index()] = Some(id);
        session
    }

    /// A session showing `doc` in the left panel
    pub fn with_document(doc: Document) -> Self {
        let mut session = Self::default();
        let id = session.add_document(doc);
        session.show(id);
        session.previous = None;
        session.remove_document(DocumentId(1));
        session
    }

    fn next_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_document_id);
        self.next_document_id += 1;
        id
    }

    /// Take ownership of a document without showing it
    pub fn add_document(&mut self, mut doc: Document) -> DocumentId {
        let id = self.next_id();
        doc.id = Some(id);
        doc.apply_config(&self.config);
        doc.metrics = self.metrics;
        tracing::debug!("Added document {:?} ({})", id, doc.name);
        self.documents.push(doc);
        id
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == Some(id))
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|doc| doc.id == Some(id))
    }

    pub fn find_by_name(&self, name: &str) -> Option<DocumentId> {
        self.documents
            .iter()
            .find(|doc| doc.name == name)
            .and_then(|doc| doc.id)
    }

    pub fn find_by_path(&self, path: &Path) -> Option<DocumentId> {
        let wanted = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.documents
            .iter()
            .find(|doc| {
                doc.file_path.as_deref().is_some_and(|p| {
                    p == path || p.canonicalize().is_ok_and(|canonical| canonical == wanted)
                })
            })
            .and_then(|doc| doc.id)
    }

    // =========================================================================
    // Panels and focus
    // =========================================================================

    /// The focused panel, which is also the view slot edits go through
    pub fn active_slot(&self) -> ViewSlot {
        self.focus
    }

    pub fn active_id(&self) -> DocumentId {
        self.panel(self.focus)
            .or_else(|| self.panel(ViewSlot::Left))
            .unwrap_or_else(|| unreachable!("left panel always shows a document"))
    }

    pub fn previous_id(&self) -> Option<DocumentId> {
        self.previous
    }

    pub fn panel(&self, slot: ViewSlot) -> Option<DocumentId> {
        self.panels[slot.index()]
    }

    pub fn active_document(&self) -> &Document {
        let id = self.active_id();
        self.document(id)
            .unwrap_or_else(|| panic!("panel shows unknown document {:?}", id))
    }

    pub fn active_document_mut(&mut self) -> &mut Document {
        let id = self.active_id();
        self.document_mut(id)
            .unwrap_or_else(|| panic!("panel shows unknown document {:?}", id))
    }

    /// The active document, its view slot, and the clipboard, borrowed together
    pub fn active_parts(&mut self) -> (&mut Document, ViewSlot, &mut dyn Clipboard) {
        let id = self.active_id();
        let slot = self.focus;
        let doc = self
            .documents
            .iter_mut()
            .find(|doc| doc.id == Some(id))
            .unwrap_or_else(|| panic!("panel shows unknown document {:?}", id));
        (doc, slot, self.clipboard.as_mut())
    }

    pub fn is_split(&self) -> bool {
        self.panels[ViewSlot::Right.index()].is_some()
    }

    /// Show the active document in the right panel as well
    pub fn split(&mut self) {
        let id = self.active_id();
        self.panels[ViewSlot::Right.index()] = Some(id);
        tracing::debug!("Split: right panel shows {:?}", id);
    }

    /// Close the right panel
    pub fn unsplit(&mut self) {
        self.panels[ViewSlot::Right.index()] = None;
        self.focus = ViewSlot::Left;
    }

    /// Move focus to the other panel (no-op when not split)
    pub fn swap_focus(&mut self) {
        if self.is_split() {
            self.focus = self.focus.other();
            tracing::debug!("Focus: {:?}", self.focus);
        }
    }

    /// Show `id` in the focused panel
    pub fn show(&mut self, id: DocumentId) {
        let current = self.panels[self.focus.index()];
        if current != Some(id) {
            self.previous = current;
            self.panels[self.focus.index()] = Some(id);
            if let Some(doc) = self.document(id) {
                tracing::info!("Switched to {}", doc.name);
            }
        }
    }

    // =========================================================================
    // Buffer commands
    // =========================================================================

    /// Open `path` in the focused panel.
    ///
    /// An already-open file is switched to. A missing file yields an empty
    /// document that creates it on save; any other load failure is returned.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<OpenOutcome, LoadError> {
        let path = path.as_ref();
        if let Some(id) = self.find_by_path(path) {
            self.show(id);
            return Ok(OpenOutcome::Switched);
        }

        let (doc, outcome) = match Document::load(path) {
            Ok(doc) => (doc, OpenOutcome::Loaded),
            Err(LoadError::NotFound) => {
                tracing::info!("{} does not exist, starting a new file", path.display());
                (Document::new_with_path(path), OpenOutcome::Created)
            }
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", path.display(), e);
                return Err(e);
            }
        };
        let id = self.add_document(doc);
        self.show(id);
        Ok(outcome)
    }

    pub fn save_active(&mut self) -> io::Result<()> {
        self.active_document_mut().save()
    }

    pub fn save_active_as(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        self.active_document_mut().save_as(path)
    }

    /// Show the document named `name`; returns `false` if none matches
    pub fn switch_to(&mut self, name: &str) -> bool {
        match self.find_by_name(name) {
            Some(id) => {
                self.show(id);
                true
            }
            None => false,
        }
    }

    /// Show the previously shown document
    pub fn switch_to_previous(&mut self) -> bool {
        match self.previous.filter(|&id| self.document(id).is_some()) {
            Some(id) => {
                self.show(id);
                true
            }
            None => false,
        }
    }

    /// Close the active document. Refuses to close the last one.
    pub fn kill_active(&mut self) -> bool {
        if self.documents.len() < 2 {
            return false;
        }
        let id = self.active_id();
        if self.active_document().is_dirty() {
            tracing::warn!("Killing modified buffer {}", self.active_document().name);
        }
        self.remove_document(id);
        true
    }

    fn remove_document(&mut self, id: DocumentId) {
        self.documents.retain(|doc| doc.id != Some(id));
        if self.previous == Some(id) {
            self.previous = None;
        }

        let replacement = self
            .previous
            .or_else(|| self.documents.first().and_then(|doc| doc.id));
        for panel in &mut self.panels {
            if *panel == Some(id) {
                *panel = replacement;
            }
        }
        if self.panels[ViewSlot::Left.index()].is_none() {
            self.panels[ViewSlot::Left.index()] = replacement;
        }
        if self.previous == replacement {
            self.previous = None;
        }
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    /// The window was resized to `width` x `height` pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.metrics.visible_width = width as f32;
        self.metrics.visible_height = height as f32;
        for doc in &mut self.documents {
            doc.metrics = self.metrics;
        }
    }

    /// True while any view is still scrolling toward its target
    pub fn is_scrolling(&self) -> bool {
        self.documents.iter().any(|doc| {
            ViewSlot::ALL
                .iter()
                .any(|&slot| !doc.view(slot).scroll.is_settled())
        })
    }

    /// Advance animations in every document
    pub fn tick(&mut self, dt: Duration) -> usize {
        self.documents.iter_mut().map(|doc| doc.tick(dt)).sum()
    }

    /// Modeline for a panel, if it shows a document
    pub fn modeline(&self, slot: ViewSlot) -> Option<String> {
        let id = self.panel(slot)?;
        self.document(id).map(|doc| doc.modeline(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_scratch() {
        let session = Session::default();
        assert_eq!(session.documents().len(), 1);
        assert_eq!(session.active_document().name, "*scratch*");
        assert!(!session.is_split());
    }

    #[test]
    fn test_with_document_replaces_scratch() {
        let session = Session::with_document(Document::with_text("hi"));
        assert_eq!(session.documents().len(), 1);
        assert_eq!(session.active_document().text(), "hi");
        assert_eq!(session.previous_id(), None);
    }

    #[test]
    fn test_kill_refuses_last_document() {
        let mut session = Session::default();
        assert!(!session.kill_active());
    }

    #[test]
    fn test_resize_reaches_later_documents() {
        let mut session = Session::default();
        session.resize(800, 400);
        let id = session.add_document(Document::with_text("x"));
        let doc = session.document(id).unwrap();
        assert_eq!(doc.metrics.visible_width, 800.0);
        assert_eq!(doc.metrics.visible_height, 400.0);
    }

    #[test]
    fn test_swap_focus_requires_split() {
        let mut session = Session::default();
        session.swap_focus();
        assert_eq!(session.active_slot(), ViewSlot::Left);
        session.split();
        session.swap_focus();
        assert_eq!(session.active_slot(), ViewSlot::Right);
        assert_eq!(session.panel(ViewSlot::Right), session.panel(ViewSlot::Left));
        session.unsplit();
        assert_eq!(session.active_slot(), ViewSlot::Left);
    }
}
