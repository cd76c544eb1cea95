//! Replace, replace-all, and the interactive query-replace protocol

use crate::model::document::Document;
use crate::model::session::DocumentId;
use crate::model::line::{Highlight, HighlightTone};
use crate::model::view::{Point, ViewSlot};

impl Document {
    /// Substitute `len` characters at `at` with `replacement` and flash the
    /// result. Leaves the cursor of `slot` after the replacement, which is
    /// also returned.
    pub(crate) fn replace_match(
        &mut self,
        slot: ViewSlot,
        at: Point,
        len: usize,
        replacement: &str,
    ) -> Point {
        self.delete_range_at(at.line, at.offset, at.offset + len);
        self.place_cursor(slot, at);
        self.insert_text(slot, replacement);

        let visible = replacement
            .split(['\r', '\n'])
            .next()
            .map_or(0, |first| first.chars().count());
        if visible > 0 {
            let fade = self.settings.highlight_fade;
            self.lines.get_mut(at.line).add_highlight(Highlight::transient(
                slot,
                at.offset,
                visible,
                HighlightTone::Replaced,
                fade,
            ));
        }
        self.cursor(slot)
    }

    /// Replace the next match after the cursor. The cursor is left at the
    /// start of the replaced text. Returns `false` when nothing matches.
    pub fn replace_next(&mut self, slot: ViewSlot, query: &str, replacement: &str) -> bool {
        let Some(found) = self.find_next(slot, query) else {
            return false;
        };
        self.replace_match(slot, found, query.chars().count(), replacement);
        self.place_cursor(slot, found);
        self.reveal_line(slot, found.line);
        true
    }

    /// Replace every match from the cursor to the end of the document,
    /// including one that starts exactly at the cursor. Returns the count.
    pub fn replace_all(&mut self, slot: ViewSlot, query: &str, replacement: &str) -> usize {
        let from = self.cursor(slot);
        let count = self.replace_from(slot, query, replacement, from);
        tracing::info!("{}: replaced {} occurrences of {:?}", self.name, count, query);
        count
    }

    /// Replace matches at or after `from`. Each scan resumes at the end of
    /// the previous replacement so replacements are never rescanned.
    fn replace_from(&mut self, slot: ViewSlot, query: &str, replacement: &str, from: Point) -> usize {
        let len = query.chars().count();
        let mut from = from;
        let mut last = None;
        let mut count = 0;
        while let Some(found) = self.find_from(query, from, true) {
            from = self.replace_match(slot, found, len, replacement);
            last = Some(found);
            count += 1;
        }
        if let Some(found) = last {
            self.place_cursor(slot, found);
            self.reveal_line(slot, found.line);
        }
        count
    }
}

/// Where a query-replace session stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryReplaceState {
    /// Waiting for the search string
    CollectQuery,
    /// Waiting for the replacement string
    CollectReplacement { query: String },
    /// `candidate` is a match awaiting yes/no
    Confirm {
        query: String,
        replacement: String,
        candidate: Point,
    },
    /// Finished; highlights have been cleared
    Done { replaced: usize },
}

/// Interactive query-replace driven one answer at a time.
///
/// The session is bound to one document and view. The candidate is
/// checked again before each answer is applied: if edits or cursor moves in
/// between mean it no longer matches, the answer is dropped and the next
/// match is offered instead. After accepting, scanning resumes at the end
/// of the replacement; after declining, just past the candidate's start.
#[derive(Debug, Clone)]
pub struct QueryReplace {
    document: DocumentId,
    slot: ViewSlot,
    state: QueryReplaceState,
    replaced: usize,
}

impl QueryReplace {
    pub fn new(document: DocumentId, slot: ViewSlot) -> Self {
        Self {
            document,
            slot,
            state: QueryReplaceState::CollectQuery,
            replaced: 0,
        }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn slot(&self) -> ViewSlot {
        self.slot
    }

    pub fn state(&self) -> &QueryReplaceState {
        &self.state
    }

    pub fn replaced(&self) -> usize {
        self.replaced
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, QueryReplaceState::Done { .. })
    }

    /// Prompt text for the current step
    pub fn prompt(&self) -> String {
        match &self.state {
            QueryReplaceState::CollectQuery => "Query replace: ".to_string(),
            QueryReplaceState::CollectReplacement { query } => {
                format!("Query replace {} with: ", query)
            }
            QueryReplaceState::Confirm {
                query, replacement, ..
            } => {
                format!("Replace {} with {}? (y/n/!)", query, replacement)
            }
            QueryReplaceState::Done { replaced } => format!("Replaced {} occurrences", replaced),
        }
    }

    /// Accept the search string. An empty query ends the session.
    pub fn submit_query(&mut self, doc: &mut Document, query: &str) {
        if !matches!(self.state, QueryReplaceState::CollectQuery) {
            return;
        }
        if query.is_empty() {
            self.finish(doc);
            return;
        }
        self.state = QueryReplaceState::CollectReplacement {
            query: query.to_string(),
        };
    }

    /// Accept the replacement string and move to the first candidate
    pub fn submit_replacement(&mut self, doc: &mut Document, replacement: &str) {
        let QueryReplaceState::CollectReplacement { query } = &self.state else {
            return;
        };
        let query = query.clone();
        let from = doc.cursor(self.slot);
        self.advance(doc, query, replacement.to_string(), from, false);
    }

    /// Answer for the current candidate: replace it (`yes`) or skip it
    pub fn confirm(&mut self, doc: &mut Document, yes: bool) {
        let QueryReplaceState::Confirm {
            query,
            replacement,
            candidate,
        } = &self.state
        else {
            return;
        };
        let (query, replacement, candidate) = (query.clone(), replacement.clone(), *candidate);

        if !self.still_matches(doc, &query, candidate) {
            tracing::debug!("query replace candidate moved; offering the next match");
            let from = self.resume_point(doc, candidate);
            self.advance(doc, query, replacement, from, true);
            return;
        }

        if yes {
            let end = doc.replace_match(self.slot, candidate, query.chars().count(), &replacement);
            self.replaced += 1;
            self.advance(doc, query, replacement, end, true);
        } else {
            self.advance(doc, query, replacement, candidate, false);
        }
    }

    /// Replace the current candidate and every later match, then finish
    pub fn replace_rest(&mut self, doc: &mut Document) {
        let QueryReplaceState::Confirm {
            query,
            replacement,
            candidate,
        } = &self.state
        else {
            return;
        };
        let (query, replacement) = (query.clone(), replacement.clone());
        let from = self.resume_point(doc, *candidate);
        self.replaced += doc.replace_from(self.slot, &query, &replacement, from);
        self.finish(doc);
    }

    /// Stop, keeping replacements already made
    pub fn abort(&mut self, doc: &mut Document) {
        if !self.is_done() {
            tracing::debug!("query replace aborted after {} replacements", self.replaced);
            self.finish(doc);
        }
    }

    /// Whether the text at `candidate` is still an occurrence of `query`
    fn still_matches(&self, doc: &Document, query: &str, candidate: Point) -> bool {
        doc.lines().contains(candidate.line)
            && doc.find_from(query, candidate, true) == Some(candidate)
    }

    /// Where to rescan from when the candidate may be stale. A removed line
    /// falls back to the cursor of the session's view.
    fn resume_point(&self, doc: &Document, candidate: Point) -> Point {
        if doc.lines().contains(candidate.line) {
            candidate
        } else {
            doc.cursor(self.slot)
        }
    }

    fn advance(
        &mut self,
        doc: &mut Document,
        query: String,
        replacement: String,
        from: Point,
        inclusive: bool,
    ) {
        match doc.find_from(&query, from, inclusive) {
            Some(candidate) => {
                doc.place_cursor(self.slot, candidate);
                doc.reveal_line(self.slot, candidate.line);
                doc.mark_matches_from(self.slot, &query, candidate, true);
                self.state = QueryReplaceState::Confirm {
                    query,
                    replacement,
                    candidate,
                };
            }
            None => self.finish(doc),
        }
    }

    fn finish(&mut self, doc: &mut Document) {
        doc.clear_highlights(self.slot);
        tracing::info!("query replace finished: {} replaced", self.replaced);
        self.state = QueryReplaceState::Done {
            replaced: self.replaced,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const L: ViewSlot = ViewSlot::Left;
    const DOC: DocumentId = DocumentId(1);

    #[test]
    fn test_replace_next_skips_match_at_cursor() {
        let mut doc = Document::with_text("cat cat");
        assert!(doc.replace_next(L, "cat", "dog"));
        assert_eq!(doc.text(), "cat dog");
        assert_eq!(doc.cursor_position(L), (0, 4));
        assert!(!doc.replace_next(L, "cat", "dog"));
    }

    #[test]
    fn test_replace_all_does_not_rescan_replacement() {
        let mut doc = Document::with_text("a a");
        assert_eq!(doc.replace_all(L, "a", "aa"), 2);
        assert_eq!(doc.text(), "aa aa");
    }

    #[test]
    fn test_replace_all_with_empty_replacement() {
        let mut doc = Document::with_text("xxabx");
        assert_eq!(doc.replace_all(L, "x", ""), 3);
        assert_eq!(doc.text(), "ab");
    }

    #[test]
    fn test_query_replace_yes_no_sequence() {
        let mut doc = Document::with_text("x foo foo foo");
        let mut qr = QueryReplace::new(DOC, L);
        qr.submit_query(&mut doc, "foo");
        qr.submit_replacement(&mut doc, "bar");
        assert_eq!(doc.cursor_position(L), (0, 2));
        assert!(matches!(qr.state(), QueryReplaceState::Confirm { .. }));

        qr.confirm(&mut doc, true);
        assert_eq!(doc.cursor_position(L), (0, 6));
        qr.confirm(&mut doc, false);
        assert_eq!(doc.cursor_position(L), (0, 10));
        qr.confirm(&mut doc, true);

        assert_eq!(doc.text(), "x bar foo bar");
        assert_eq!(qr.state(), &QueryReplaceState::Done { replaced: 2 });
        let highlights: usize = doc.lines().iter().map(|(_, l)| l.highlights().len()).sum();
        assert_eq!(highlights, 0);
    }

    #[test]
    fn test_query_replace_abort_keeps_committed() {
        let mut doc = Document::with_text("x a a a");
        let mut qr = QueryReplace::new(DOC, L);
        qr.submit_query(&mut doc, "a");
        qr.submit_replacement(&mut doc, "b");
        qr.confirm(&mut doc, true);
        qr.abort(&mut doc);
        assert_eq!(doc.text(), "x b a a");
        assert!(qr.is_done());
        assert_eq!(qr.replaced(), 1);
    }

    #[test]
    fn test_query_replace_rest() {
        let mut doc = Document::with_text("x\na\na");
        let mut qr = QueryReplace::new(DOC, L);
        qr.submit_query(&mut doc, "a");
        qr.submit_replacement(&mut doc, "z");
        qr.replace_rest(&mut doc);
        assert_eq!(doc.text(), "x\nz\nz");
        assert_eq!(qr.replaced(), 2);
    }

    #[test]
    fn test_query_replace_ignores_cursor_moves() {
        let mut doc = Document::with_text("x foo\nkeep this");
        let mut qr = QueryReplace::new(DOC, L);
        qr.submit_query(&mut doc, "foo");
        qr.submit_replacement(&mut doc, "bar");
        doc.goto_line(L, 2);
        qr.confirm(&mut doc, true);
        assert_eq!(doc.text(), "x bar\nkeep this");
        assert_eq!(qr.replaced(), 1);
        assert!(qr.is_done());
    }

    #[test]
    fn test_query_replace_reoffers_after_candidate_edited() {
        let mut doc = Document::with_text("x foo foo");
        let mut qr = QueryReplace::new(DOC, L);
        qr.submit_query(&mut doc, "foo");
        qr.submit_replacement(&mut doc, "bar");
        doc.delete_range_at(doc.cursor(L).line, 2, 3);
        assert_eq!(doc.text(), "x oo foo");

        qr.confirm(&mut doc, true);
        assert_eq!(doc.text(), "x oo foo");
        assert_eq!(qr.replaced(), 0);
        assert_eq!(doc.cursor_position(L), (0, 5));

        qr.confirm(&mut doc, true);
        assert_eq!(doc.text(), "x oo bar");
        assert_eq!(qr.replaced(), 1);
    }

    #[test]
    fn test_empty_query_finishes_immediately() {
        let mut doc = Document::with_text("abc");
        let mut qr = QueryReplace::new(DOC, L);
        qr.submit_query(&mut doc, "");
        assert_eq!(qr.state(), &QueryReplaceState::Done { replaced: 0 });
    }
}
