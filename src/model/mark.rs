//! The mark - a selection between a fixed anchor and the view's cursor

use std::cmp::Ordering;

use super::line_store::LineStore;
use super::view::Point;

/// Compare two points in document order: line ordinal first, then offset
pub fn compare_points(lines: &LineStore, a: Point, b: Point) -> Ordering {
    if a.line == b.line {
        return a.offset.cmp(&b.offset);
    }
    lines
        .get(a.line)
        .y()
        .cmp(&lines.get(b.line).y())
        .then(a.offset.cmp(&b.offset))
}

/// Selection state for a view.
///
/// `anchor` stays where the mark was set; `head` follows the cursor while
/// the mark is active. Which of the two comes first in the document is
/// computed on demand by [`Mark::ordered_endpoints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    anchor: Point,
    head: Point,
    active: bool,
    shift_extend: bool,
}

impl Mark {
    /// An inactive mark parked at `at`
    pub fn new(at: Point) -> Self {
        Self {
            anchor: at,
            head: at,
            active: false,
            shift_extend: false,
        }
    }

    /// Start a selection at `cursor`. `shift_extend` marks a selection
    /// started by a shifted motion, which ends when the cursor moves
    /// without shift.
    pub fn set(&mut self, cursor: Point, shift_extend: bool) {
        self.anchor = cursor;
        self.head = cursor;
        self.active = true;
        self.shift_extend = shift_extend;
    }

    pub fn unset(&mut self) {
        self.active = false;
        self.shift_extend = false;
        self.anchor = self.head;
    }

    /// Follow a cursor move
    pub fn track(&mut self, cursor: Point) {
        if self.active {
            self.head = cursor;
        } else {
            self.anchor = cursor;
            self.head = cursor;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_shift_extend(&self) -> bool {
        self.shift_extend
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn head(&self) -> Point {
        self.head
    }

    /// `(first, second)` in document order, or `None` when inactive
    pub fn ordered_endpoints(&self, lines: &LineStore) -> Option<(Point, Point)> {
        if !self.active {
            return None;
        }
        match compare_points(lines, self.anchor, self.head) {
            Ordering::Greater => Some((self.head, self.anchor)),
            _ => Some((self.anchor, self.head)),
        }
    }

    pub(crate) fn map_points(&mut self, mut f: impl FnMut(Point) -> Point) {
        self.anchor = f(self.anchor);
        self.head = f(self.head);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_endpoints_recomputes_on_demand() {
        let lines = LineStore::from_texts(["abc", "def"]);
        let l0 = lines.id_at(0).unwrap();
        let l1 = lines.id_at(1).unwrap();

        let mut mark = Mark::new(Point::new(l0, 0));
        assert_eq!(mark.ordered_endpoints(&lines), None);

        mark.set(Point::new(l1, 2), false);
        mark.track(Point::new(l0, 1));
        assert_eq!(
            mark.ordered_endpoints(&lines),
            Some((Point::new(l0, 1), Point::new(l1, 2)))
        );
        // the anchor never moves
        assert_eq!(mark.anchor(), Point::new(l1, 2));

        mark.track(Point::new(l1, 3));
        assert_eq!(
            mark.ordered_endpoints(&lines),
            Some((Point::new(l1, 2), Point::new(l1, 3)))
        );
    }

    #[test]
    fn test_same_line_orders_by_offset() {
        let lines = LineStore::from_texts(["hello"]);
        let l0 = lines.head();
        let mut mark = Mark::new(Point::new(l0, 0));
        mark.set(Point::new(l0, 4), true);
        mark.track(Point::new(l0, 1));
        assert_eq!(
            mark.ordered_endpoints(&lines),
            Some((Point::new(l0, 1), Point::new(l0, 4)))
        );
        assert!(mark.is_shift_extend());
        mark.unset();
        assert!(!mark.is_active());
        assert!(!mark.is_shift_extend());
    }
}
