//! Ordered line storage
//!
//! Lines live in an arena of slots linked into a doubly-linked list by
//! index. Removed slots go on a free list and are reused; each slot carries a
//! generation counter so a `LineId` held past its line's removal is detected
//! instead of silently aliasing the slot's next occupant.
//!
//! Invariants:
//! - there is always at least one line
//! - ordinals (`Line::y`) are `0..len` in list order

use super::line::Line;

/// Stable handle to a line in a [`LineStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node {
    line: Line,
    prev: Option<u32>,
    next: Option<u32>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Clone)]
pub struct LineStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: u32,
    tail: u32,
    len: usize,
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LineStore {
    /// A store holding one empty line
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node {
                    line: Line::new(),
                    prev: None,
                    next: None,
                }),
            }],
            free: Vec::new(),
            head: 0,
            tail: 0,
            len: 1,
        }
    }

    /// A store holding the given lines in order (one empty line if none)
    pub fn from_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut store = Self::new();
        store.reset(texts);
        store
    }

    /// Destroy every line and rebuild from `texts`. All previously issued
    /// handles become stale.
    pub fn reset<'a>(&mut self, texts: impl IntoIterator<Item = &'a str>) {
        for slot in &mut self.slots {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.free = (0..self.slots.len() as u32).rev().collect();

        let mut texts = texts.into_iter();
        let first = Line::from_text(texts.next().unwrap_or(""));
        let head = self.alloc(first);
        self.head = head;
        self.tail = head;
        self.len = 1;
        self.node_mut(head).line.y = 0;

        let mut last = self.id_of(head);
        for text in texts {
            last = self.link_after(last, Line::from_text(text));
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true; a store always holds at least one line
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> LineId {
        self.id_of(self.head)
    }

    pub fn tail(&self) -> LineId {
        self.id_of(self.tail)
    }

    /// True if `id` refers to a line currently in the store
    pub fn contains(&self, id: LineId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.generation == id.generation && slot.node.is_some())
    }

    pub fn try_get(&self, id: LineId) -> Option<&Line> {
        self.contains(id).then(|| &self.node(id.index).line)
    }

    /// The line behind `id`.
    ///
    /// # Panics
    /// If `id` refers to a removed line.
    pub fn get(&self, id: LineId) -> &Line {
        self.check(id);
        &self.node(id.index).line
    }

    /// Mutable access to the line behind `id`.
    ///
    /// # Panics
    /// If `id` refers to a removed line.
    pub fn get_mut(&mut self, id: LineId) -> &mut Line {
        self.check(id);
        &mut self.node_mut(id.index).line
    }

    pub fn next(&self, id: LineId) -> Option<LineId> {
        self.check(id);
        self.node(id.index).next.map(|i| self.id_of(i))
    }

    pub fn prev(&self, id: LineId) -> Option<LineId> {
        self.check(id);
        self.node(id.index).prev.map(|i| self.id_of(i))
    }

    /// Handle of the line with ordinal `y`
    pub fn id_at(&self, y: usize) -> Option<LineId> {
        if y >= self.len {
            return None;
        }
        // Walk from whichever end is closer
        if y < self.len / 2 {
            self.ids().nth(y)
        } else {
            let mut id = self.tail();
            for _ in 0..(self.len - 1 - y) {
                id = self.prev(id)?;
            }
            Some(id)
        }
    }

    /// Handle of the line with ordinal `y`, clamped to the last line
    pub fn id_at_clamped(&self, y: usize) -> LineId {
        self.id_at(y.min(self.len - 1)).unwrap_or_else(|| self.tail())
    }

    /// Iterate line handles in document order
    pub fn ids(&self) -> LineIds<'_> {
        LineIds {
            store: self,
            cursor: Some(self.head),
        }
    }

    /// Iterate lines in document order
    pub fn iter(&self) -> impl Iterator<Item = (LineId, &Line)> + '_ {
        self.ids().map(move |id| (id, &self.node(id.index).line))
    }

    /// Iterate handles from `id` (inclusive) to the end of the document
    pub fn ids_from(&self, id: LineId) -> LineIds<'_> {
        self.check(id);
        LineIds {
            store: self,
            cursor: Some(id.index),
        }
    }

    /// Splice `line` in after `after`. The new line takes the ordinal its
    /// successor had and every later line is renumbered.
    pub fn insert_after(&mut self, after: LineId, line: Line) -> LineId {
        self.check(after);
        self.link_after(after, line)
    }

    /// Unlink and return the line behind `id`, then renumber from the head.
    ///
    /// # Panics
    /// If `id` is the only line left.
    pub fn remove(&mut self, id: LineId) -> Line {
        self.check(id);
        assert!(self.len > 1, "cannot remove the last line of a document");

        let node = self.slots[id.index as usize]
            .node
            .take()
            .unwrap_or_else(|| unreachable!("checked above"));
        let slot = &mut self.slots[id.index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => {
                if let Some(next) = node.next {
                    self.head = next;
                }
            }
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => {
                if let Some(prev) = node.prev {
                    self.tail = prev;
                }
            }
        }
        self.len -= 1;
        self.renumber_from(self.head, 0);

        node.line
    }

    /// Mutable access to every line, in slot order rather than document order
    pub(crate) fn lines_mut_unordered(&mut self) -> impl Iterator<Item = &mut Line> + '_ {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.node.as_mut())
            .map(|node| &mut node.line)
    }

    /// True if ordinals run `0..len` in list order
    pub fn ordinals_are_contiguous(&self) -> bool {
        self.iter()
            .enumerate()
            .all(|(expected, (_, line))| line.y == expected)
            && self.iter().count() == self.len
    }

    /// All line texts in order
    pub fn texts(&self) -> Vec<String> {
        self.iter().map(|(_, line)| line.text()).collect()
    }

    fn link_after(&mut self, after: LineId, mut line: Line) -> LineId {
        let after_y = self.node(after.index).line.y;
        let old_next = self.node(after.index).next;
        line.y = after_y + 1;

        let index = self.alloc(line);
        {
            let node = self.node_mut(index);
            node.prev = Some(after.index);
            node.next = old_next;
        }
        self.node_mut(after.index).next = Some(index);
        match old_next {
            Some(next) => {
                self.node_mut(next).prev = Some(index);
                self.renumber_from(next, after_y + 2);
            }
            None => self.tail = index,
        }
        self.len += 1;
        self.id_of(index)
    }

    fn renumber_from(&mut self, start: u32, first_y: usize) {
        let mut cursor = Some(start);
        let mut y = first_y;
        while let Some(index) = cursor {
            let node = self.node_mut(index);
            node.line.y = y;
            cursor = node.next;
            y += 1;
        }
    }

    fn alloc(&mut self, line: Line) -> u32 {
        let node = Node {
            line,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                (self.slots.len() - 1) as u32
            }
        }
    }

    fn check(&self, id: LineId) {
        assert!(
            self.contains(id),
            "stale line handle {:?}: the line was removed from the document",
            id
        );
    }

    fn id_of(&self, index: u32) -> LineId {
        LineId {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    fn node(&self, index: u32) -> &Node {
        self.slots[index as usize]
            .node
            .as_ref()
            .unwrap_or_else(|| panic!("line slot {} is vacant", index))
    }

    fn node_mut(&mut self, index: u32) -> &mut Node {
        self.slots[index as usize]
            .node
            .as_mut()
            .unwrap_or_else(|| panic!("line slot {} is vacant", index))
    }
}

/// Iterator over line handles in document order
pub struct LineIds<'a> {
    store: &'a LineStore,
    cursor: Option<u32>,
}

impl Iterator for LineIds<'_> {
    type Item = LineId;

    fn next(&mut self) -> Option<LineId> {
        let index = self.cursor?;
        self.cursor = self.store.node(index).next;
        Some(self.store.id_of(index))
    }
}
