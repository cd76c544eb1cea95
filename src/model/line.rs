//! A single mutable line of text plus its highlight spans

use std::time::Duration;

use super::view::ViewSlot;
use crate::util::is_break_char;

/// Capacity a fresh line starts with
pub const INITIAL_LINE_CAPACITY: usize = 16;

/// What a highlight is for; renderers map this to a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightTone {
    /// Current incremental-search match
    Match,
    /// First match of a mark-all scan (the next candidate)
    Primary,
    /// Every other match of a mark-all scan
    Secondary,
    /// Text that was just substituted by a replace
    Replaced,
}

/// How long a highlight lives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifetime {
    /// Stays until explicitly cleared
    Persistent,
    /// Fades out and is removed once `remaining` reaches zero
    Transient { remaining: Duration, total: Duration },
}

/// A line-relative `(offset, len)` span owned by one view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub view: ViewSlot,
    pub offset: usize,
    pub len: usize,
    pub tone: HighlightTone,
    pub lifetime: Lifetime,
}

impl Highlight {
    pub fn persistent(view: ViewSlot, offset: usize, len: usize, tone: HighlightTone) -> Self {
        Self {
            view,
            offset,
            len,
            tone,
            lifetime: Lifetime::Persistent,
        }
    }

    pub fn transient(
        view: ViewSlot,
        offset: usize,
        len: usize,
        tone: HighlightTone,
        duration: Duration,
    ) -> Self {
        Self {
            view,
            offset,
            len,
            tone,
            lifetime: Lifetime::Transient {
                remaining: duration,
                total: duration,
            },
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self.lifetime, Lifetime::Transient { .. })
    }

    /// Remaining strength in `[0, 1]`; persistent highlights are always 1
    pub fn opacity(&self) -> f32 {
        match self.lifetime {
            Lifetime::Persistent => 1.0,
            Lifetime::Transient { remaining, total } => {
                if total.is_zero() {
                    0.0
                } else {
                    (remaining.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
                }
            }
        }
    }

    /// Advance the fade by `dt`. Returns `false` once the highlight has expired.
    pub fn decay(&mut self, dt: Duration) -> bool {
        match &mut self.lifetime {
            Lifetime::Persistent => true,
            Lifetime::Transient { remaining, .. } => {
                *remaining = remaining.saturating_sub(dt);
                !remaining.is_zero()
            }
        }
    }

    fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// A line of text.
///
/// Text is stored as a character array so offsets are character offsets.
/// Backing storage grows by doubling and never shrinks on delete.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) y: usize,
    chars: Vec<char>,
    /// Label drawn before the text (prompt lines only)
    pub pre_text: String,
    highlights: Vec<Highlight>,
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Line {
    pub fn new() -> Self {
        Self {
            y: 0,
            chars: Vec::with_capacity(INITIAL_LINE_CAPACITY),
            pre_text: String::new(),
            highlights: Vec::new(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut line = Self::new();
        line.append(&text.chars().collect::<Vec<_>>());
        line
    }

    /// Position of this line in its document (0-based)
    pub fn y(&self) -> usize {
        self.y
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.chars.capacity()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Text in `[start, end)`, clamped to the line
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// True if the line has no characters or only whitespace
    pub fn is_empty_or_whitespace(&self) -> bool {
        self.chars.iter().all(|c| c.is_whitespace())
    }

    fn reserve_one(&mut self) {
        if self.chars.len() == self.chars.capacity() {
            let extra = self.chars.capacity().max(INITIAL_LINE_CAPACITY);
            self.chars.reserve_exact(extra);
        }
    }

    /// Insert `ch` at `offset`, shifting trailing characters right.
    pub fn insert_char(&mut self, offset: usize, ch: char) {
        assert!(
            offset <= self.len(),
            "insert offset {} past end of line {} (len {})",
            offset,
            self.y,
            self.len()
        );
        debug_assert!(ch != '\n', "newlines split lines, they are never stored");
        self.reserve_one();
        self.chars.insert(offset, ch);
        self.shift_highlights(offset, 1);
    }

    /// Insert `text` at `offset`. Returns the number of characters inserted.
    pub fn insert_str(&mut self, offset: usize, text: &str) -> usize {
        let mut count = 0;
        for ch in text.chars() {
            self.insert_char(offset + count, ch);
            count += 1;
        }
        count
    }

    /// Delete the character at `offset`, shifting trailing characters left.
    pub fn delete_char(&mut self, offset: usize) -> Option<char> {
        if offset >= self.len() {
            return None;
        }
        let ch = self.chars.remove(offset);
        self.cut_highlights(offset, offset + 1);
        Some(ch)
    }

    /// Delete characters in `[start, end)`, clamped to the line.
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if start >= end {
            return String::new();
        }
        let removed: String = self.chars.drain(start..end).collect();
        self.cut_highlights(start, end);
        removed
    }

    /// Cut the line at `offset`, returning the tail and the highlights that
    /// lay in it (rebased to the tail).
    pub(crate) fn split_off(&mut self, offset: usize) -> (Vec<char>, Vec<Highlight>) {
        let offset = offset.min(self.len());
        let tail = self.chars[offset..].to_vec();
        self.chars.truncate(offset);

        let mut moved = Vec::new();
        self.highlights.retain_mut(|hl| {
            if hl.offset >= offset {
                moved.push(Highlight {
                    offset: hl.offset - offset,
                    ..*hl
                });
                false
            } else {
                hl.len = hl.len.min(offset - hl.offset);
                true
            }
        });
        (tail, moved)
    }

    /// Append characters to the end of the line
    pub(crate) fn append(&mut self, chars: &[char]) {
        for &ch in chars {
            let end = self.len();
            self.insert_char(end, ch);
        }
    }

    /// Append another line's text and highlights (used when merging lines)
    pub(crate) fn absorb(&mut self, other: Line) {
        let base = self.len();
        self.append(&other.chars);
        self.highlights
            .extend(other.highlights.into_iter().map(|hl| Highlight {
                offset: hl.offset + base,
                ..hl
            }));
    }

    pub(crate) fn add_highlight(&mut self, hl: Highlight) {
        self.highlights.push(hl);
    }

    pub(crate) fn adopt_highlights(&mut self, hls: Vec<Highlight>) {
        self.highlights.extend(hls);
    }

    /// Drop this view's highlights matching `pred`
    pub(crate) fn clear_highlights(&mut self, view: ViewSlot, pred: impl Fn(&Highlight) -> bool) {
        self.highlights.retain(|hl| hl.view != view || !pred(hl));
    }

    /// Decay transient highlights; returns how many are still animating
    pub(crate) fn tick_highlights(&mut self, dt: Duration) -> usize {
        self.highlights.retain_mut(|hl| hl.decay(dt));
        self.highlights.iter().filter(|hl| hl.is_transient()).count()
    }

    fn shift_highlights(&mut self, offset: usize, by: usize) {
        for hl in &mut self.highlights {
            if hl.offset >= offset {
                hl.offset += by;
            }
        }
    }

    fn cut_highlights(&mut self, start: usize, end: usize) {
        let width = end - start;
        self.highlights
            .retain(|hl| hl.end() <= start || hl.offset >= end);
        for hl in &mut self.highlights {
            if hl.offset >= end {
                hl.offset -= width;
            }
        }
    }

    /// Offset reached by a forward word motion from `offset`, or `None` at
    /// end of line (the motion crosses to the next line).
    pub fn next_word_end(&self, offset: usize) -> Option<usize> {
        let len = self.len();
        if offset >= len {
            return None;
        }
        let mut i = offset;
        while i < len && is_break_char(self.chars[i]) {
            i += 1;
        }
        while i < len && !is_break_char(self.chars[i]) {
            i += 1;
        }
        Some(i)
    }

    /// Offset reached by a backward word motion from `offset`, or `None` at
    /// start of line (the motion crosses to the previous line).
    pub fn prev_word_start(&self, offset: usize) -> Option<usize> {
        let mut i = offset.min(self.len());
        if i == 0 {
            return None;
        }
        while i > 0 && is_break_char(self.chars[i - 1]) {
            i -= 1;
        }
        while i > 0 && !is_break_char(self.chars[i - 1]) {
            i -= 1;
        }
        Some(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_char_shifts_tail() {
        let mut line = Line::from_text("hllo");
        line.insert_char(1, 'e');
        assert_eq!(line.text(), "hello");
        line.insert_char(5, '!');
        assert_eq!(line.text(), "hello!");
    }

    #[test]
    fn test_capacity_doubles() {
        let mut line = Line::new();
        assert_eq!(line.capacity(), INITIAL_LINE_CAPACITY);
        for i in 0..INITIAL_LINE_CAPACITY {
            line.insert_char(i, 'x');
        }
        assert_eq!(line.capacity(), INITIAL_LINE_CAPACITY);
        line.insert_char(0, 'y');
        assert!(line.capacity() >= INITIAL_LINE_CAPACITY * 2);
    }

    #[test]
    fn test_delete_does_not_shrink() {
        let mut line = Line::from_text(&"a".repeat(40));
        let cap = line.capacity();
        line.delete_range(0, 39);
        assert_eq!(line.text(), "a");
        assert_eq!(line.capacity(), cap);
    }

    #[test]
    fn test_delete_char_and_range() {
        let mut line = Line::from_text("hello world");
        assert_eq!(line.delete_char(5), Some(' '));
        assert_eq!(line.text(), "helloworld");
        assert_eq!(line.delete_char(10), None);
        assert_eq!(line.delete_range(5, 100), "world");
        assert_eq!(line.text(), "hello");
    }

    #[test]
    fn test_is_empty_or_whitespace() {
        assert!(Line::new().is_empty_or_whitespace());
        assert!(Line::from_text(" \t ").is_empty_or_whitespace());
        assert!(!Line::from_text("  x").is_empty_or_whitespace());
    }

    #[test]
    fn test_word_motion_within_line() {
        let line = Line::from_text("foo.bar  baz");
        assert_eq!(line.next_word_end(0), Some(3));
        assert_eq!(line.next_word_end(3), Some(7));
        assert_eq!(line.next_word_end(7), Some(12));
        assert_eq!(line.next_word_end(12), None);

        assert_eq!(line.prev_word_start(12), Some(9));
        assert_eq!(line.prev_word_start(9), Some(4));
        assert_eq!(line.prev_word_start(4), Some(0));
        assert_eq!(line.prev_word_start(0), None);
    }

    #[test]
    fn test_highlights_follow_edits() {
        let mut line = Line::from_text("foo bar baz");
        line.add_highlight(Highlight::persistent(
            ViewSlot::Left,
            8,
            3,
            HighlightTone::Secondary,
        ));
        line.insert_str(0, ">>");
        assert_eq!(line.highlights()[0].offset, 10);
        line.delete_range(0, 2);
        assert_eq!(line.highlights()[0].offset, 8);
        line.delete_range(7, 9);
        assert!(line.highlights().is_empty());
    }

    #[test]
    fn test_transient_highlight_decays() {
        let mut hl = Highlight::transient(
            ViewSlot::Left,
            0,
            3,
            HighlightTone::Match,
            Duration::from_millis(1000),
        );
        assert!(hl.decay(Duration::from_millis(400)));
        assert!((hl.opacity() - 0.6).abs() < 0.001);
        assert!(!hl.decay(Duration::from_millis(600)));
    }
}
