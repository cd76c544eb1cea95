//! Coarse-grained undo
//!
//! Typing is coalesced: a snapshot of the whole document is taken every
//! `interval` keystrokes. Undo drops the newest snapshot and rebuilds the
//! document from the one before it. There is no redo.

use crate::model::document::Document;
use crate::model::mark::Mark;
use crate::model::view::ViewSlot;

/// Full document text plus the cursor position at capture time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoSnapshot {
    pub text: String,
    /// `(line ordinal, offset)`; line handles do not survive a rebuild
    pub cursor: (usize, usize),
}

/// Snapshot stack, newest last
#[derive(Debug, Clone)]
pub struct UndoHistory {
    snapshots: Vec<UndoSnapshot>,
    interval: usize,
    max_snapshots: usize,
    pending: usize,
}

impl UndoHistory {
    /// `interval` keystrokes per snapshot; `max_snapshots == 0` is unbounded
    pub fn new(interval: usize, max_snapshots: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
            max_snapshots,
            pending: 0,
        }
    }

    pub fn configure(&mut self, interval: usize, max_snapshots: usize) {
        self.interval = interval.max(1);
        self.max_snapshots = max_snapshots;
        self.trim();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&UndoSnapshot> {
        self.snapshots.last()
    }

    /// Keystrokes counted since the last snapshot
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn push(&mut self, snapshot: UndoSnapshot) {
        self.snapshots.push(snapshot);
        self.pending = 0;
        self.trim();
    }

    /// Count a keystroke. Returns `true` when a snapshot is due.
    pub fn record_keystroke(&mut self) -> bool {
        self.pending += 1;
        self.pending >= self.interval
    }

    /// Discard the newest snapshot and return the one now on top, or `None`
    /// when there is nothing to go back to
    pub fn step_back(&mut self) -> Option<&UndoSnapshot> {
        if self.snapshots.len() < 2 {
            return None;
        }
        self.snapshots.pop();
        self.pending = 0;
        self.snapshots.last()
    }

    fn trim(&mut self) {
        // Keep at least two so one undo step always remains possible
        let cap = if self.max_snapshots == 0 {
            usize::MAX
        } else {
            self.max_snapshots.max(2)
        };
        if self.snapshots.len() > cap {
            let excess = self.snapshots.len() - cap;
            self.snapshots.drain(..excess);
        }
    }
}

impl Document {
    /// Snapshot the text and the cursor of `slot`
    pub fn snapshot(&self, slot: ViewSlot) -> UndoSnapshot {
        UndoSnapshot {
            text: self.text(),
            cursor: self.cursor_position(slot),
        }
    }

    /// Push a restore point now
    pub fn capture_snapshot(&mut self, slot: ViewSlot) {
        let snapshot = self.snapshot(slot);
        tracing::debug!(
            "{}: undo snapshot #{} at {:?}",
            self.name,
            self.undo.len() + 1,
            snapshot.cursor
        );
        self.undo.push(snapshot);
    }

    /// Count an editing keystroke, capturing a snapshot every `interval`
    pub fn record_keystroke(&mut self, slot: ViewSlot) {
        if self.undo.record_keystroke() {
            self.capture_snapshot(slot);
        }
    }

    /// Capture a snapshot if keystrokes were counted since the last one
    pub fn flush_keystrokes(&mut self, slot: ViewSlot) {
        if self.undo.pending() > 0 {
            self.capture_snapshot(slot);
        }
    }

    /// Restore the previous snapshot. Returns `false` when fewer than two
    /// snapshots exist.
    ///
    /// The document is rebuilt from the snapshot text, so every line handle
    /// is replaced. The acting view's cursor comes from the snapshot; the
    /// other view keeps its line ordinal and offset, clamped. Marks and
    /// search state are reset in both views.
    pub fn undo(&mut self, slot: ViewSlot) -> bool {
        let Some(snapshot) = self.undo.step_back().cloned() else {
            tracing::debug!("{}: nothing to undo", self.name);
            return false;
        };

        let other = slot.other();
        let other_position = self.cursor_position(other);
        self.lines.reset(snapshot.text.split('\n'));

        for (view_slot, (y, offset)) in [(slot, snapshot.cursor), (other, other_position)] {
            let point = self.point_at(y, offset);
            let view = self.view_mut(view_slot);
            view.cursor = point;
            view.mark = Mark::new(point);
            view.search = Default::default();
        }
        self.set_edited(true);
        tracing::debug!(
            "{}: undo to {:?} ({} snapshots left)",
            self.name,
            snapshot.cursor,
            self.undo.len()
        );
        true
    }
}
