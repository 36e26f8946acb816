use crate::{DocId, Position};

/// Position of a child cursor captured when it was queued.
///
/// Queues hold these snapshots instead of the cursors themselves, so an entry
/// must be refreshed (`replace_top` or a new `put`) every time its cursor moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorKey {
    pub doc: DocId,
    pub start: Position,
    pub end: Position,
    /// Ordinal of the child among its siblings.
    pub index: usize,
}

/// Binary min-heap ordered by a `less` comparator.
pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    heap: Vec<T>,
    less: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(less: F) -> Self {
        Self { heap: Vec::new(), less }
    }

    pub fn with_capacity(capacity: usize, less: F) -> Self {
        Self { heap: Vec::with_capacity(capacity), less }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Least element, without removing it.
    pub fn top(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn put(&mut self, element: T) {
        self.heap.push(element);
        self.up_heap(self.heap.len() - 1);
    }

    /// Remove and return the least element.
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.down_heap(0);
        }
        Some(top)
    }

    /// Swap the least element for `element` and restore heap order.
    /// Cheaper than `pop` followed by `put`.
    pub fn replace_top(&mut self, element: T) -> Option<T> {
        if self.heap.is_empty() {
            self.heap.push(element);
            return None;
        }
        let old = std::mem::replace(&mut self.heap[0], element);
        self.down_heap(0);
        Some(old)
    }

    fn up_heap(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if (self.less)(&self.heap[i], &self.heap[parent]) {
                self.heap.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn down_heap(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && (self.less)(&self.heap[right], &self.heap[left]) {
                right
            } else {
                left
            };
            if (self.less)(&self.heap[smaller], &self.heap[i]) {
                self.heap.swap(i, smaller);
                i = smaller;
            } else {
                break;
            }
        }
    }
}
