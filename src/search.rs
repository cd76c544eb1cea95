//! Incremental, case-insensitive search
//!
//! Search is forward-only from the cursor and never wraps to the start of
//! the document. A match starting exactly at the cursor is skipped so that
//! repeated searches advance.

use crate::model::document::Document;
use crate::model::line::{Highlight, HighlightTone};
use crate::model::view::{Point, ViewSlot};
use crate::util::find_ignore_case;

/// Per-view incremental search state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    /// Collecting a query; `origin` is where the cursor was when the search
    /// began
    Searching { query: String, origin: Point },
}

impl SearchState {
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching { .. })
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Searching { query, .. } => Some(query),
            SearchState::Idle => None,
        }
    }

    pub(crate) fn map_point(&mut self, f: impl Fn(Point) -> Point) {
        if let SearchState::Searching { origin, .. } = self {
            *origin = f(*origin);
        }
    }
}

impl Document {
    /// Find the next case-insensitive match of `query` at or after `from`.
    ///
    /// With `inclusive == false` the scan on `from`'s line starts at
    /// `from.offset + 1`. Later lines are scanned from offset 0.
    pub fn find_from(&self, query: &str, from: Point, inclusive: bool) -> Option<Point> {
        let needle: Vec<char> = query.chars().collect();
        if needle.is_empty() {
            return None;
        }
        let mut start = from.offset + usize::from(!inclusive);
        for id in self.lines.ids_from(from.line) {
            let line = self.lines.get(id);
            if start < line.len() {
                if let Some(offset) = find_ignore_case(line.chars(), &needle, start) {
                    return Some(Point::new(id, offset));
                }
            }
            start = 0;
        }
        None
    }

    /// Next match after the cursor of `slot`
    pub fn find_next(&self, slot: ViewSlot, query: &str) -> Option<Point> {
        self.find_from(query, self.cursor(slot), false)
    }

    /// Move the cursor to the next match and flash it with a fading
    /// highlight. Returns `false` (cursor unchanged) when nothing matches.
    pub fn go_to_next_match(&mut self, slot: ViewSlot, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }
        self.clear_transient_from_cursor(slot);

        let Some(found) = self.find_next(slot, query) else {
            tracing::debug!("search {:?}: no match after cursor", query);
            return false;
        };
        let len = query.chars().count();
        let fade = self.settings.highlight_fade;
        self.lines.get_mut(found.line).add_highlight(Highlight::transient(
            slot,
            found.offset,
            len,
            HighlightTone::Match,
            fade,
        ));
        self.place_cursor(slot, found);
        self.reveal_line(slot, found.line);
        tracing::debug!(
            "search {:?}: match at {:?}",
            query,
            self.position_of(found)
        );
        true
    }

    /// Highlight every match after the cursor without moving it. The first
    /// match is marked primary and the rest secondary. Returns the count.
    pub fn mark_all_matches(&mut self, slot: ViewSlot, query: &str) -> usize {
        let from = self.cursor(slot);
        self.mark_matches_from(slot, query, from, false)
    }

    pub(crate) fn mark_matches_from(
        &mut self,
        slot: ViewSlot,
        query: &str,
        from: Point,
        inclusive: bool,
    ) -> usize {
        let ids: Vec<_> = self.lines.ids().collect();
        for &id in &ids {
            self.lines
                .get_mut(id)
                .clear_highlights(slot, |hl| !hl.is_transient());
        }

        let needle: Vec<char> = query.chars().collect();
        if needle.is_empty() {
            return 0;
        }

        let mut count = 0;
        let mut start = from.offset + usize::from(!inclusive);
        let scan: Vec<_> = self.lines.ids_from(from.line).collect();
        for id in scan {
            let line = self.lines.get_mut(id);
            while let Some(offset) = find_ignore_case(line.chars(), &needle, start) {
                let tone = if count == 0 {
                    HighlightTone::Primary
                } else {
                    HighlightTone::Secondary
                };
                line.add_highlight(Highlight::persistent(slot, offset, needle.len(), tone));
                count += 1;
                start = offset + needle.len();
            }
            start = 0;
        }
        tracing::trace!("marked {} matches of {:?}", count, query);
        count
    }

    /// Remove every highlight this view owns
    pub fn clear_highlights(&mut self, slot: ViewSlot) {
        let ids: Vec<_> = self.lines.ids().collect();
        for id in ids {
            self.lines.get_mut(id).clear_highlights(slot, |_| true);
        }
    }

    fn clear_transient_from_cursor(&mut self, slot: ViewSlot) {
        let ids: Vec<_> = self.lines.ids_from(self.cursor(slot).line).collect();
        for id in ids {
            self.lines
                .get_mut(id)
                .clear_highlights(slot, |hl| hl.is_transient());
        }
    }

    // =========================================================================
    // Incremental search session
    // =========================================================================

    /// Enter incremental search, remembering where the cursor was
    pub fn begin_search(&mut self, slot: ViewSlot) {
        let origin = self.cursor(slot);
        self.view_mut(slot).search = SearchState::Searching {
            query: String::new(),
            origin,
        };
    }

    /// Append to the query and search again from the origin
    pub fn search_input(&mut self, slot: ViewSlot, ch: char) -> bool {
        match &mut self.view_mut(slot).search {
            SearchState::Searching { query, .. } => query.push(ch),
            SearchState::Idle => return false,
        }
        self.rerun_search(slot)
    }

    /// Drop the last query character and search again from the origin
    pub fn search_backspace(&mut self, slot: ViewSlot) -> bool {
        match &mut self.view_mut(slot).search {
            SearchState::Searching { query, .. } => {
                query.pop();
            }
            SearchState::Idle => return false,
        }
        self.rerun_search(slot)
    }

    /// Advance to the match after the current one
    pub fn search_next(&mut self, slot: ViewSlot) -> bool {
        let Some(query) = self.view(slot).search.query().map(str::to_owned) else {
            return false;
        };
        self.go_to_next_match(slot, &query)
    }

    /// Leave search with the cursor where the last match put it
    pub fn end_search(&mut self, slot: ViewSlot) {
        self.view_mut(slot).search = SearchState::Idle;
    }

    /// Leave search, restoring the cursor and clearing this view's highlights
    pub fn abort_search(&mut self, slot: ViewSlot) {
        let state = std::mem::take(&mut self.view_mut(slot).search);
        if let SearchState::Searching { origin, .. } = state {
            self.place_cursor(slot, origin);
            self.reveal_line(slot, origin.line);
        }
        self.clear_highlights(slot);
    }

    fn rerun_search(&mut self, slot: ViewSlot) -> bool {
        let SearchState::Searching { query, origin } = self.view(slot).search.clone() else {
            return false;
        };
        self.place_cursor(slot, origin);
        if query.is_empty() {
            self.clear_transient_from_cursor(slot);
            return false;
        }
        self.go_to_next_match(slot, &query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const L: ViewSlot = ViewSlot::Left;

    #[test]
    fn test_match_at_cursor_is_skipped() {
        let mut doc = Document::with_text("abab");
        assert!(doc.go_to_next_match(L, "ab"));
        assert_eq!(doc.cursor_position(L), (0, 2));
        assert!(!doc.go_to_next_match(L, "ab"));
        assert_eq!(doc.cursor_position(L), (0, 2));
    }

    #[test]
    fn test_search_continues_on_later_lines_from_offset_zero() {
        let mut doc = Document::with_text("x\nfoo\nFOO");
        doc.set_cursor(L, 1, 0);
        assert!(doc.go_to_next_match(L, "foo"));
        assert_eq!(doc.cursor_position(L), (2, 0));
    }

    #[test]
    fn test_empty_query_is_noop() {
        let mut doc = Document::with_text("abc");
        assert!(!doc.go_to_next_match(L, ""));
        assert_eq!(doc.mark_all_matches(L, ""), 0);
    }

    #[test]
    fn test_mark_all_replaces_previous_marks() {
        let mut doc = Document::with_text("a a a\na");
        assert_eq!(doc.mark_all_matches(L, "a"), 3);
        let tones: Vec<_> = doc
            .lines()
            .iter()
            .flat_map(|(_, line)| line.highlights().iter().map(|hl| hl.tone))
            .collect();
        assert_eq!(
            tones,
            vec![
                HighlightTone::Primary,
                HighlightTone::Secondary,
                HighlightTone::Secondary
            ]
        );
        assert_eq!(doc.cursor_position(L), (0, 0));

        doc.set_cursor(L, 1, 0);
        assert_eq!(doc.mark_all_matches(L, "a"), 0);
        assert_eq!(doc.lines().iter().map(|(_, l)| l.highlights().len()).sum::<usize>(), 0);
    }

    #[test]
    fn test_abort_restores_origin() {
        let mut doc = Document::with_text("one two two");
        doc.begin_search(L);
        assert!(doc.search_input(L, 't'));
        assert!(doc.search_input(L, 'w'));
        assert_eq!(doc.cursor_position(L), (0, 4));
        assert!(doc.search_next(L));
        assert_eq!(doc.cursor_position(L), (0, 8));
        doc.abort_search(L);
        assert_eq!(doc.cursor_position(L), (0, 0));
        assert!(!doc.view(L).search.is_searching());
        assert_eq!(doc.animated_highlights(), 0);
    }

    #[test]
    fn test_backspace_reruns_from_origin() {
        let mut doc = Document::with_text("ab ax");
        doc.begin_search(L);
        doc.search_input(L, 'a');
        assert_eq!(doc.cursor_position(L), (0, 3));
        assert!(!doc.search_input(L, 'b'));
        assert_eq!(doc.cursor_position(L), (0, 0));
        assert!(doc.search_backspace(L));
        assert_eq!(doc.cursor_position(L), (0, 3));
        doc.end_search(L);
        assert_eq!(doc.cursor_position(L), (0, 3));
    }
}
