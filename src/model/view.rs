//! Per-panel view state - cursor, scroll, mark, and search

use super::line_store::LineId;
use super::mark::Mark;
use crate::search::SearchState;

/// Vertical gap between lines in pixels
pub const LINE_SPACING: f32 = 3.0;

/// Which of a document's two views (left or right panel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSlot {
    Left,
    Right,
}

impl ViewSlot {
    pub const ALL: [ViewSlot; 2] = [ViewSlot::Left, ViewSlot::Right];

    pub fn index(self) -> usize {
        match self {
            ViewSlot::Left => 0,
            ViewSlot::Right => 1,
        }
    }

    pub fn other(self) -> ViewSlot {
        match self {
            ViewSlot::Left => ViewSlot::Right,
            ViewSlot::Right => ViewSlot::Left,
        }
    }
}

/// A line plus a character offset into it (`0 <= offset <= line.len()`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub line: LineId,
    pub offset: usize,
}

impl Point {
    pub const fn new(line: LineId, offset: usize) -> Self {
        Self { line, offset }
    }
}

/// Current and target scroll offsets in pixels (content moves up as `y`
/// goes negative)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scroll {
    pub x: f32,
    pub y: f32,
    pub target_x: f32,
    pub target_y: f32,
}

impl Scroll {
    /// Move the current offsets toward the targets by `factor` (0..=1)
    pub fn step(&mut self, factor: f32) {
        self.x += (self.target_x - self.x) * factor;
        self.y += (self.target_y - self.y) * factor;
    }

    pub fn is_settled(&self) -> bool {
        (self.target_x - self.x).abs() < 0.5 && (self.target_y - self.y).abs() < 0.5
    }
}

/// Read-only display metrics used to decide when the cursor is off screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub cell_width: f32,
    pub cell_height: f32,
    pub visible_width: f32,
    pub visible_height: f32,
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self {
            cell_width: 10.0,
            cell_height: 20.0,
            visible_width: 900.0,
            visible_height: 600.0,
        }
    }
}

impl ViewportMetrics {
    /// Pixel offset of the top of line `y` in unscrolled content
    pub fn line_top(&self, y: usize) -> f32 {
        y as f32 * (self.cell_height + LINE_SPACING)
    }

    /// True if line `y` lies outside the viewport for scroll offset `scroll_y`
    /// (the bottom two cell rows are reserved for the modeline and prompt)
    pub fn is_line_offscreen(&self, y: usize, scroll_y: f32) -> bool {
        let top = self.line_top(y);
        top < -self.cell_height - scroll_y
            || top > self.visible_height - scroll_y - self.cell_height * 2.0
    }

    /// Scroll target that brings line `y` to the bottom of the text area
    pub fn reveal_target(&self, y: usize) -> f32 {
        -self.cell_height + (self.visible_height - self.cell_height * 2.0) - self.line_top(y)
    }
}

/// One cursor/scroll/mark/search context on a document
#[derive(Debug, Clone)]
pub struct View {
    pub cursor: Point,
    pub mark: Mark,
    pub search: SearchState,
    pub scroll: Scroll,
}

impl View {
    pub fn new(line: LineId) -> Self {
        let cursor = Point::new(line, 0);
        Self {
            cursor,
            mark: Mark::new(cursor),
            search: SearchState::Idle,
            scroll: Scroll::default(),
        }
    }
}
