//! Document model - the line list, its two views, and structural edits
//!
//! Every edit keeps the invariants the rest of the editor relies on:
//! - line ordinals are contiguous from 0 in list order
//! - no view point (cursor, mark endpoints, search origin) refers to a
//!   removed line, and offsets stay within `[0, line.len()]`
//! - there is always at least one line

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::line::Line;
use super::line_store::{LineId, LineStore};
use super::mark::compare_points;
use super::session::DocumentId;
use super::view::{Point, View, ViewSlot, ViewportMetrics};
use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::undo::UndoHistory;
use crate::util::{buffer_name_for_path, split_lines, validate_file_for_loading, IndentStyle, LoadError};

/// Name given to documents that were not loaded from a file
pub const SCRATCH_NAME: &str = "*scratch*";

/// Per-document editing settings derived from the editor config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentSettings {
    /// Spaces inserted by Tab when indenting with spaces
    pub tab_width: usize,
    /// Lifetime of transient (fading) highlights
    pub highlight_fade: Duration,
    /// Lerp factor for animated scrolling
    pub scroll_smoothing: f32,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for DocumentSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            tab_width: config.tab_width,
            highlight_fade: Duration::from_millis(config.highlight_fade_ms),
            scroll_smoothing: config.scroll_smoothing,
        }
    }
}

/// A document: ordered lines, two views, and file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// Unique identifier (set when added to a Session)
    pub id: Option<DocumentId>,
    /// Buffer name shown in the modeline
    pub name: String,
    /// Path to the file on disk (None for scratch documents)
    pub file_path: Option<PathBuf>,
    /// Indent style inferred on load
    pub indent: IndentStyle,
    pub settings: DocumentSettings,
    /// Display metrics used to decide when to scroll
    pub metrics: ViewportMetrics,
    /// Coarse snapshot history
    pub undo: UndoHistory,
    pub(crate) lines: LineStore,
    pub(crate) views: [View; 2],
    pub(crate) edited: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty scratch document
    pub fn new() -> Self {
        Self::named(SCRATCH_NAME)
    }

    /// Create a new empty document with the given buffer name
    pub fn named(name: impl Into<String>) -> Self {
        Self::from_store(name.into(), LineStore::new(), IndentStyle::default())
    }

    /// Create a scratch document with initial text (split on `\n`, a final
    /// newline does not produce an extra line)
    pub fn with_text(text: &str) -> Self {
        let lines = split_lines(text);
        let indent = IndentStyle::detect(lines.iter().copied());
        Self::from_store(SCRATCH_NAME.to_string(), LineStore::from_texts(lines), indent)
    }

    /// Load a document from a file path
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        validate_file_for_loading(path)?;
        let content = std::fs::read_to_string(path)?;

        let lines = split_lines(&content);
        let indent = IndentStyle::detect(lines.iter().copied());
        let mut doc = Self::from_store(
            buffer_name_for_path(path),
            LineStore::from_texts(lines),
            indent,
        );
        doc.file_path = Some(path.to_path_buf());
        tracing::info!(
            "Loaded {} ({} lines, indent {:?})",
            path.display(),
            doc.line_count(),
            indent
        );
        Ok(doc)
    }

    /// Create a new empty document with a target file path
    ///
    /// Used when the requested file does not exist yet. The file is created
    /// on save, so the document starts out modified.
    pub fn new_with_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut doc = Self::named(buffer_name_for_path(path));
        doc.file_path = Some(path.to_path_buf());
        doc.edited = true;
        doc
    }

    fn from_store(name: String, lines: LineStore, indent: IndentStyle) -> Self {
        let head = lines.head();
        let config = EditorConfig::default();
        let mut doc = Self {
            id: None,
            name,
            file_path: None,
            indent,
            settings: DocumentSettings::from(&config),
            metrics: ViewportMetrics::default(),
            undo: UndoHistory::new(config.undo_interval, config.max_undo_snapshots),
            lines,
            views: [View::new(head), View::new(head)],
            edited: false,
        };
        let baseline = doc.snapshot(ViewSlot::Left);
        doc.undo.push(baseline);
        doc
    }

    /// Apply editor configuration (settings and undo limits)
    pub fn apply_config(&mut self, config: &EditorConfig) {
        self.settings = DocumentSettings::from(config);
        self.undo
            .configure(config.undo_interval, config.max_undo_snapshots);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn lines(&self) -> &LineStore {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, id: LineId) -> &Line {
        self.lines.get(id)
    }

    /// Text of line `n` (0-based)
    pub fn text_of_line(&self, n: usize) -> Option<String> {
        self.lines.id_at(n).map(|id| self.lines.get(id).text())
    }

    /// Full document text, lines joined by `\n`
    pub fn text(&self) -> String {
        self.lines.texts().join("\n")
    }

    pub fn is_dirty(&self) -> bool {
        self.edited
    }

    pub fn set_edited(&mut self, edited: bool) {
        if self.edited != edited {
            tracing::debug!("{}: edited = {}", self.name, edited);
        }
        self.edited = edited;
    }

    pub fn view(&self, slot: ViewSlot) -> &View {
        &self.views[slot.index()]
    }

    pub(crate) fn view_mut(&mut self, slot: ViewSlot) -> &mut View {
        &mut self.views[slot.index()]
    }

    pub fn cursor(&self, slot: ViewSlot) -> Point {
        self.view(slot).cursor
    }

    /// `(line ordinal, offset)` of a point
    pub fn position_of(&self, point: Point) -> (usize, usize) {
        (self.lines.get(point.line).y(), point.offset)
    }

    /// `(line ordinal, offset)` of a view's cursor
    pub fn cursor_position(&self, slot: ViewSlot) -> (usize, usize) {
        self.position_of(self.cursor(slot))
    }

    /// Point for `(line, offset)`, both clamped into the document
    pub fn point_at(&self, line: usize, offset: usize) -> Point {
        let id = self.lines.id_at_clamped(line);
        Point::new(id, offset.min(self.lines.get(id).len()))
    }

    /// Move a view's cursor to `(line, offset)`, clamped into the document
    pub fn set_cursor(&mut self, slot: ViewSlot, line: usize, offset: usize) {
        let point = self.point_at(line, offset);
        self.place_cursor(slot, point);
    }

    /// Modeline text: `"<name>[*]     L<line>/<count>"`
    pub fn modeline(&self, slot: ViewSlot) -> String {
        let (y, _) = self.cursor_position(slot);
        format!(
            "{}{}     L{}/{}",
            self.name,
            if self.edited { "*" } else { "" },
            y + 1,
            self.line_count()
        )
    }

    /// Check every document invariant, describing the first violation
    pub fn validate(&self) -> Result<(), String> {
        if self.lines.is_empty() {
            return Err("document has no lines".to_string());
        }
        if !self.lines.ordinals_are_contiguous() {
            return Err("line ordinals are not contiguous".to_string());
        }
        for slot in ViewSlot::ALL {
            let view = self.view(slot);
            let mut points = vec![("cursor", view.cursor)];
            if view.mark.is_active() {
                points.push(("mark anchor", view.mark.anchor()));
                points.push(("mark head", view.mark.head()));
            }
            for (what, point) in points {
                let Some(line) = self.lines.try_get(point.line) else {
                    return Err(format!("{:?} {} refers to a removed line", slot, what));
                };
                if point.offset > line.len() {
                    return Err(format!(
                        "{:?} {} offset {} past end of line {} (len {})",
                        slot,
                        what,
                        point.offset,
                        line.y(),
                        line.len()
                    ));
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Point bookkeeping
    // =========================================================================

    /// Set a view's cursor and let its mark follow
    pub(crate) fn place_cursor(&mut self, slot: ViewSlot, point: Point) {
        let len = self.lines.get(point.line).len();
        let point = Point::new(point.line, point.offset.min(len));
        let view = self.view_mut(slot);
        view.cursor = point;
        view.mark.track(point);
    }

    /// Rewrite every point held by either view
    fn map_points(&mut self, f: impl Fn(Point) -> Point) {
        for view in &mut self.views {
            view.cursor = f(view.cursor);
            view.mark.map_points(&f);
            view.search.map_point(&f);
        }
    }

    fn touch(&mut self) {
        self.set_edited(true);
    }

    // =========================================================================
    // Line-level edits
    // =========================================================================

    /// Insert `ch` at `at`. Returns the point just after it.
    pub fn insert_char_at(&mut self, at: Point, ch: char) -> Point {
        self.lines.get_mut(at.line).insert_char(at.offset, ch);
        self.map_points(|p| {
            if p.line == at.line && p.offset >= at.offset {
                Point::new(p.line, p.offset + 1)
            } else {
                p
            }
        });
        self.touch();
        Point::new(at.line, at.offset + 1)
    }

    /// Insert single-line `text` at `at`. Returns the point just after it.
    pub fn insert_str_at(&mut self, at: Point, text: &str) -> Point {
        let mut point = at;
        for ch in text.chars() {
            point = self.insert_char_at(point, ch);
        }
        point
    }

    /// Delete the character at `at`
    pub fn delete_char_at(&mut self, at: Point) -> Option<char> {
        let ch = self.lines.get_mut(at.line).delete_char(at.offset)?;
        self.shift_after_delete(at.line, at.offset, at.offset + 1);
        self.touch();
        Some(ch)
    }

    /// Delete `[start, end)` on one line, returning the removed text
    pub fn delete_range_at(&mut self, line: LineId, start: usize, end: usize) -> String {
        let removed = self.lines.get_mut(line).delete_range(start, end);
        if !removed.is_empty() {
            let end = start + removed.chars().count();
            self.shift_after_delete(line, start, end);
            self.touch();
        }
        removed
    }

    fn shift_after_delete(&mut self, line: LineId, start: usize, end: usize) {
        let width = end - start;
        self.map_points(|p| {
            if p.line != line {
                p
            } else if p.offset >= end {
                Point::new(line, p.offset - width)
            } else if p.offset > start {
                Point::new(line, start)
            } else {
                p
            }
        });
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    /// Split the cursor's line at the cursor. The text after the cursor moves
    /// to a new line spliced in after it, and the cursor moves to the start
    /// of that line.
    pub fn split_line_at(&mut self, slot: ViewSlot) {
        let at = self.cursor(slot);
        let (tail, highlights) = self.lines.get_mut(at.line).split_off(at.offset);

        let mut line = Line::new();
        line.append(&tail);
        line.adopt_highlights(highlights);
        let new_id = self.lines.insert_after(at.line, line);

        self.map_points(|p| {
            if p.line == at.line && p.offset >= at.offset {
                Point::new(new_id, p.offset - at.offset)
            } else {
                p
            }
        });
        self.place_cursor(slot, Point::new(new_id, 0));
        self.touch();
        tracing::trace!(
            "split line {} at {} ({} chars moved)",
            self.lines.get(new_id).y() - 1,
            at.offset,
            tail.len()
        );
    }

    /// Remove a line. Points on it move to the line that now has its ordinal
    /// (or the last line). Returns `false` if it is the only line.
    pub fn remove_line(&mut self, id: LineId) -> bool {
        if self.lines.len() == 1 {
            return false;
        }
        let y = self.lines.get(id).y();
        self.lines.remove(id);

        let fallback = self.lines.id_at_clamped(y);
        let fallback_len = self.lines.get(fallback).len();
        self.map_points(|p| {
            if p.line == id {
                Point::new(fallback, p.offset.min(fallback_len))
            } else {
                p
            }
        });
        self.touch();
        tracing::trace!("removed line {}", y);
        true
    }

    /// Join the cursor's line onto the end of the previous line (backspace at
    /// column 0). The cursor lands at the join point. Returns `false` on the
    /// first line.
    pub fn merge_with_previous(&mut self, slot: ViewSlot) -> bool {
        let at = self.cursor(slot);
        let Some(prev) = self.lines.prev(at.line) else {
            return false;
        };
        let join = self.lines.get(prev).len();
        let line = self.lines.remove(at.line);
        self.lines.get_mut(prev).absorb(line);

        self.map_points(|p| {
            if p.line == at.line {
                Point::new(prev, join + p.offset)
            } else {
                p
            }
        });
        self.place_cursor(slot, Point::new(prev, join));
        self.touch();
        true
    }

    /// Join the next line onto the end of the cursor's line (delete at end of
    /// line). Returns `false` on the last line.
    pub fn merge_with_next(&mut self, slot: ViewSlot) -> bool {
        let at = self.cursor(slot);
        let Some(next) = self.lines.next(at.line) else {
            return false;
        };
        let join = self.lines.get(at.line).len();
        let line = self.lines.remove(next);
        self.lines.get_mut(at.line).absorb(line);

        self.map_points(|p| {
            if p.line == next {
                Point::new(at.line, join + p.offset)
            } else {
                p
            }
        });
        self.touch();
        true
    }

    // =========================================================================
    // Typing
    // =========================================================================

    /// Type a character at the cursor (`'\n'` splits the line)
    pub fn insert_char(&mut self, slot: ViewSlot, ch: char) {
        if ch == '\n' {
            self.split_line_at(slot);
            return;
        }
        let after = self.insert_char_at(self.cursor(slot), ch);
        self.place_cursor(slot, after);
    }

    /// Insert text at the cursor. `\n`, `\r\n` and a lone `\r` each start a
    /// new line. The cursor ends up after the inserted text.
    pub fn insert_text(&mut self, slot: ViewSlot, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    self.split_line_at(slot);
                }
                '\n' => self.split_line_at(slot),
                _ => self.insert_char(slot, ch),
            }
        }
    }

    /// Indent at the cursor according to the document's indent style
    pub fn insert_tab(&mut self, slot: ViewSlot) {
        match self.indent {
            IndentStyle::Tabs => self.insert_char(slot, '\t'),
            IndentStyle::Spaces => {
                let spaces = " ".repeat(self.settings.tab_width);
                self.insert_text(slot, &spaces);
            }
        }
    }

    /// Delete the character before the cursor, or join with the previous
    /// line at column 0. Returns `false` at the start of the document.
    pub fn backspace(&mut self, slot: ViewSlot) -> bool {
        let at = self.cursor(slot);
        if at.offset > 0 {
            let before = Point::new(at.line, at.offset - 1);
            self.delete_char_at(before);
            self.place_cursor(slot, before);
            true
        } else {
            self.merge_with_previous(slot)
        }
    }

    /// Delete the character at the cursor, or join the next line at end of
    /// line. Returns `false` at the end of the document.
    pub fn delete_forward(&mut self, slot: ViewSlot) -> bool {
        let at = self.cursor(slot);
        if at.offset < self.lines.get(at.line).len() {
            self.delete_char_at(at).is_some()
        } else {
            self.merge_with_next(slot)
        }
    }

    // =========================================================================
    // Cursor motion
    // =========================================================================

    pub fn move_left(&mut self, slot: ViewSlot) {
        let at = self.cursor(slot);
        self.place_cursor(slot, Point::new(at.line, at.offset.saturating_sub(1)));
    }

    pub fn move_right(&mut self, slot: ViewSlot) {
        let at = self.cursor(slot);
        self.place_cursor(slot, Point::new(at.line, at.offset + 1));
    }

    pub fn move_up(&mut self, slot: ViewSlot) {
        let at = self.cursor(slot);
        if let Some(prev) = self.lines.prev(at.line) {
            self.place_cursor(slot, Point::new(prev, at.offset));
            self.reveal_cursor(slot);
        }
    }

    pub fn move_down(&mut self, slot: ViewSlot) {
        let at = self.cursor(slot);
        if let Some(next) = self.lines.next(at.line) {
            self.place_cursor(slot, Point::new(next, at.offset));
            self.reveal_cursor(slot);
        }
    }

    pub fn move_line_start(&mut self, slot: ViewSlot) {
        let at = self.cursor(slot);
        self.place_cursor(slot, Point::new(at.line, 0));
    }

    pub fn move_line_end(&mut self, slot: ViewSlot) {
        let at = self.cursor(slot);
        let len = self.lines.get(at.line).len();
        self.place_cursor(slot, Point::new(at.line, len));
    }

    pub fn move_document_start(&mut self, slot: ViewSlot) {
        let head = self.lines.head();
        self.place_cursor(slot, Point::new(head, 0));
        self.view_mut(slot).scroll.target_y = 0.0;
    }

    pub fn move_document_end(&mut self, slot: ViewSlot) {
        let tail = self.lines.tail();
        let len = self.lines.get(tail).len();
        self.place_cursor(slot, Point::new(tail, len));
        self.reveal_cursor(slot);
    }

    /// Skip break characters, then the word after them. At end of line the
    /// cursor moves to the start of the next line.
    pub fn move_word_forward(&mut self, slot: ViewSlot) {
        let at = self.cursor(slot);
        match self.lines.get(at.line).next_word_end(at.offset) {
            Some(offset) => self.place_cursor(slot, Point::new(at.line, offset)),
            None => {
                if let Some(next) = self.lines.next(at.line) {
                    self.place_cursor(slot, Point::new(next, 0));
                    self.reveal_cursor(slot);
                }
            }
        }
    }

    /// Skip break characters backwards, then the word before them. At the
    /// start of a line the cursor moves to the end of the previous line.
    pub fn move_word_backward(&mut self, slot: ViewSlot) {
        let at = self.cursor(slot);
        match self.lines.get(at.line).prev_word_start(at.offset) {
            Some(offset) => self.place_cursor(slot, Point::new(at.line, offset)),
            None => {
                if let Some(prev) = self.lines.prev(at.line) {
                    let len = self.lines.get(prev).len();
                    self.place_cursor(slot, Point::new(prev, len));
                    self.reveal_cursor(slot);
                }
            }
        }
    }

    /// Move to the start of line `line_number` (1-based, clamped)
    pub fn goto_line(&mut self, slot: ViewSlot, line_number: usize) {
        let id = self.lines.id_at_clamped(line_number.saturating_sub(1));
        self.place_cursor(slot, Point::new(id, 0));
        self.reveal_cursor(slot);
    }

    /// Scroll one page down (the cursor stays put)
    pub fn page_down(&mut self, slot: ViewSlot) {
        let page = self.metrics.visible_height - self.metrics.cell_height * 2.0;
        self.view_mut(slot).scroll.target_y -= page;
    }

    /// Scroll one page up (the cursor stays put)
    pub fn page_up(&mut self, slot: ViewSlot) {
        let page = self.metrics.visible_height - self.metrics.cell_height * 2.0;
        let scroll = &mut self.view_mut(slot).scroll;
        scroll.target_y = (scroll.target_y + page).min(0.0);
    }

    /// Request a scroll if `line`'s ordinal is off screen for this view
    pub(crate) fn reveal_line(&mut self, slot: ViewSlot, line: LineId) {
        let y = self.lines.get(line).y();
        let metrics = self.metrics;
        let scroll = &mut self.view_mut(slot).scroll;
        if metrics.is_line_offscreen(y, scroll.y) {
            scroll.target_y = metrics.reveal_target(y);
        }
    }

    pub(crate) fn reveal_cursor(&mut self, slot: ViewSlot) {
        let line = self.cursor(slot).line;
        self.reveal_line(slot, line);
    }

    // =========================================================================
    // Mark / selection
    // =========================================================================

    /// Start a selection at the cursor
    pub fn set_mark(&mut self, slot: ViewSlot, shift_extend: bool) {
        let cursor = self.cursor(slot);
        self.view_mut(slot).mark.set(cursor, shift_extend);
    }

    pub fn unset_mark(&mut self, slot: ViewSlot) {
        self.view_mut(slot).mark.unset();
    }

    /// Ordered `(first, second)` endpoints of the selection, if any
    pub fn selection(&self, slot: ViewSlot) -> Option<(Point, Point)> {
        self.view(slot).mark.ordered_endpoints(&self.lines)
    }

    /// Text between two ordered points, lines joined by `\n`
    pub fn text_between(&self, first: Point, second: Point) -> String {
        if first.line == second.line {
            return self.lines.get(first.line).slice(first.offset, second.offset);
        }
        let mut parts = Vec::new();
        for id in self.lines.ids_from(first.line) {
            let line = self.lines.get(id);
            if id == first.line {
                parts.push(line.slice(first.offset, line.len()));
            } else if id == second.line {
                parts.push(line.slice(0, second.offset));
                break;
            } else {
                parts.push(line.text());
            }
        }
        parts.join("\n")
    }

    /// Text covered by the selection
    pub fn selection_text(&self, slot: ViewSlot) -> Option<String> {
        self.selection(slot)
            .map(|(first, second)| self.text_between(first, second))
    }

    /// Delete the text between two ordered points; returns what was removed.
    ///
    /// Produces the same text and point positions as backspacing from
    /// `second` until reaching `first`.
    pub fn delete_between(&mut self, first: Point, second: Point) -> String {
        debug_assert!(compare_points(&self.lines, first, second).is_le());
        let removed = self.text_between(first, second);

        if first.line == second.line {
            self.delete_range_at(first.line, first.offset, second.offset);
            return removed;
        }

        let mut tail = self.lines.get(second.line).clone();
        tail.delete_range(0, second.offset);
        let mut doomed = Vec::new();
        let mut cursor = self.lines.next(first.line);
        while let Some(id) = cursor {
            doomed.push(id);
            if id == second.line {
                break;
            }
            cursor = self.lines.next(id);
        }

        let first_line = self.lines.get_mut(first.line);
        let len = first_line.len();
        first_line.delete_range(first.offset, len);
        first_line.absorb(tail);
        for &id in &doomed {
            self.lines.remove(id);
        }

        self.map_points(|p| {
            if p.line == first.line {
                if p.offset > first.offset {
                    first
                } else {
                    p
                }
            } else if p.line == second.line {
                if p.offset >= second.offset {
                    Point::new(first.line, first.offset + p.offset - second.offset)
                } else {
                    first
                }
            } else if doomed.contains(&p.line) {
                first
            } else {
                p
            }
        });
        self.touch();
        tracing::trace!("deleted {} lines spanning selection", doomed.len());
        removed
    }

    /// Delete the selected text, leaving the cursor at its start. Returns
    /// `false` when there is no selection.
    pub fn delete_selection(&mut self, slot: ViewSlot) -> bool {
        let Some((first, second)) = self.selection(slot) else {
            return false;
        };
        self.delete_between(first, second);
        self.place_cursor(slot, first);
        self.unset_mark(slot);
        true
    }

    /// Copy the selection to the clipboard
    pub fn copy_selection(&mut self, slot: ViewSlot, clipboard: &mut dyn Clipboard) -> bool {
        match self.selection_text(slot) {
            Some(text) => {
                clipboard.set_text(&text);
                true
            }
            None => false,
        }
    }

    /// Copy the selection to the clipboard, then delete it
    pub fn cut_selection(&mut self, slot: ViewSlot, clipboard: &mut dyn Clipboard) -> bool {
        if !self.copy_selection(slot, clipboard) {
            return false;
        }
        self.delete_selection(slot)
    }

    /// Insert the clipboard text at the cursor
    pub fn paste(&mut self, slot: ViewSlot, clipboard: &mut dyn Clipboard) -> bool {
        match clipboard.get_text() {
            Some(text) if !text.is_empty() => {
                self.insert_text(slot, &text);
                self.reveal_cursor(slot);
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Advance highlight fades and scroll animation by `dt`. Returns the
    /// number of transient highlights still fading.
    pub fn tick(&mut self, dt: Duration) -> usize {
        let smoothing = self.settings.scroll_smoothing;
        for view in &mut self.views {
            view.scroll.step(smoothing);
        }
        self.lines
            .lines_mut_unordered()
            .map(|line| line.tick_highlights(dt))
            .sum()
    }

    /// Number of transient highlights currently fading
    pub fn animated_highlights(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|(_, line)| line.highlights())
            .filter(|hl| hl.is_transient())
            .count()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write every line followed by `\n` to the document's file
    pub fn save(&mut self) -> io::Result<()> {
        let Some(path) = self.file_path.clone() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", self.name),
            ));
        };
        let mut writer = BufWriter::new(File::create(&path)?);
        for (_, line) in self.lines.iter() {
            writer.write_all(line.text().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        self.set_edited(false);
        tracing::info!("Saved {} ({} lines)", path.display(), self.line_count());
        Ok(())
    }

    /// Save under a new path; the buffer takes the path's file name
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        self.file_path = Some(path.to_path_buf());
        self.name = buffer_name_for_path(path);
        self.save()
    }
}
