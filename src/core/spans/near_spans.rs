use std::collections::VecDeque;

use log::{debug, trace};

use super::{
    CursorKey, CursorState, PriorityQueue, SpanCursor, SpanCursors, NO_MORE_DOCS, NO_MORE_POSITIONS,
};
use crate::core::IndexReadError;
use crate::{DocId, Position};

type CellQueue = PriorityQueue<CursorKey, fn(&CursorKey, &CursorKey) -> bool>;

/// `(doc, start, end)` ascending, the higher clause index first on full ties.
fn cell_less(a: &CursorKey, b: &CursorKey) -> bool {
    if (a.doc, a.start, a.end) == (b.doc, b.start, b.end) {
        return a.index > b.index;
    }
    (a.doc, a.start, a.end) < (b.doc, b.start, b.end)
}

/// One clause of a near match.
struct Cell<'a> {
    cursor: SpanCursors<'a>,
    /// Width of the cursor's current span, 0 until positioned.
    length: u32,
    positioned: bool,
}

impl Cell<'_> {
    fn doc_end(&self) -> (DocId, Position) {
        (self.cursor.doc(), self.cursor.end())
    }
}

/// Matches where every clause occurs in one doc within `slop` extra positions,
/// optionally in clause order.
///
/// The cells are viewed two ways: `doc_list` ordered by doc only, used to align
/// all cells on one doc, and `queue` ordered by position, whose top is the
/// current minimum. Both hold snapshots, the cursors stay authoritative.
pub struct NearSpanCursor<'a> {
    cells: Vec<Cell<'a>>,
    doc_list: VecDeque<usize>,
    queue: CellQueue,
    slop: u32,
    in_order: bool,
    /// Sum of the current widths of all cells.
    total_length: u64,
    /// Cell holding the greatest `(doc, end)`.
    max: Option<usize>,
    state: CursorState,
}

impl<'a> NearSpanCursor<'a> {
    pub fn new(clauses: Vec<SpanCursors<'a>>, slop: u32, in_order: bool) -> Self {
        let num_cells = clauses.len();
        let cells = clauses
            .into_iter()
            .map(|cursor| Cell { cursor, length: 0, positioned: false })
            .collect();
        Self {
            cells,
            doc_list: VecDeque::with_capacity(num_cells),
            queue: PriorityQueue::with_capacity(
                num_cells,
                cell_less as fn(&CursorKey, &CursorKey) -> bool,
            ),
            slop,
            in_order,
            total_length: 0,
            max: None,
            state: CursorState::Unpositioned,
        }
    }

    pub fn slop(&self) -> u32 {
        self.slop
    }

    pub fn is_in_order(&self) -> bool {
        self.in_order
    }

    fn exhaust(&mut self) -> bool {
        self.state = CursorState::Exhausted;
        self.queue.clear();
        self.doc_list.clear();
        false
    }

    fn key(&self, index: usize) -> CursorKey {
        self.cells[index].cursor.key(index)
    }

    /// Least cell, the queue must be fresh.
    fn min(&self) -> Option<CursorKey> {
        self.queue.top().copied()
    }

    /// Advance (`None`) or seek cell `index`, keeping `total_length` and `max` in sync.
    fn move_cell(&mut self, index: usize, target: Option<DocId>) -> Result<bool, IndexReadError> {
        let cell = &mut self.cells[index];
        let moved = match target {
            None => cell.cursor.advance()?,
            Some(target) => cell.cursor.seek(target)?,
        };
        self.total_length -= cell.length as u64;
        if !moved {
            cell.length = 0;
            cell.positioned = false;
            return Ok(false);
        }
        cell.length = cell.cursor.width();
        cell.positioned = true;
        self.total_length += cell.length as u64;
        self.update_max(index);
        Ok(true)
    }

    fn update_max(&mut self, moved: usize) {
        match self.max {
            // the old max moved and may have shrunk
            Some(max) if max == moved => {
                self.max = self
                    .cells
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.positioned)
                    .max_by_key(|(_, cell)| cell.doc_end())
                    .map(|(index, _)| index);
            }
            Some(max) => {
                if self.cells[moved].doc_end() > self.cells[max].doc_end() {
                    self.max = Some(moved);
                }
            }
            None => self.max = Some(moved),
        }
    }

    fn max_doc_end(&self) -> (DocId, Position) {
        match self.max {
            Some(max) => self.cells[max].doc_end(),
            None => (NO_MORE_DOCS, NO_MORE_POSITIONS),
        }
    }

    fn list_to_queue(&mut self) {
        self.queue.clear();
        for i in 0..self.doc_list.len() {
            let key = self.key(self.doc_list[i]);
            self.queue.put(key);
        }
    }

    fn queue_to_list(&mut self) {
        self.doc_list.clear();
        while let Some(key) = self.queue.pop() {
            self.doc_list.push_back(key.index);
        }
    }

    /// Bring every cell onto one doc: the cell on the earliest doc keeps seeking
    /// to the latest doc and moves to the back of the list.
    fn align(&mut self) -> Result<bool, IndexReadError> {
        let min_doc = match self.min() {
            Some(min) => min.doc,
            None => return Ok(false),
        };
        if min_doc == self.max_doc_end().0 {
            return Ok(true);
        }

        self.queue_to_list();
        while let (Some(&first), Some(&last)) = (self.doc_list.front(), self.doc_list.back()) {
            let last_doc = self.cells[last].cursor.doc();
            if self.cells[first].cursor.doc() >= last_doc {
                break;
            }
            if !self.move_cell(first, Some(last_doc))? {
                return Ok(false);
            }
            self.doc_list.pop_front();
            self.doc_list.push_back(first);
        }
        self.list_to_queue();
        Ok(true)
    }

    /// Extra positions of the candidate window fit within the slop.
    fn check_slop(&self) -> bool {
        let (min, (_, max_end)) = match self.min() {
            Some(min) => (min, self.max_doc_end()),
            None => return false,
        };
        let window = max_end as i64 - min.start as i64;
        window - self.total_length as i64 <= self.slop as i64
    }

    /// Clause starts are strictly increasing in clause order.
    fn match_is_ordered(&self) -> bool {
        self.cells.windows(2).all(|pair| pair[0].cursor.start() < pair[1].cursor.start())
    }

    fn advance_min(&mut self) -> Result<bool, IndexReadError> {
        let min = match self.min() {
            Some(min) => min.index,
            None => return Ok(false),
        };
        if !self.move_cell(min, None)? {
            return Ok(false);
        }
        let key = self.key(min);
        self.queue.replace_top(key);
        Ok(true)
    }

    /// Within slop but out of clause order: advance the first cell, in position
    /// order, that is out of clause order, then requeue everything popped.
    fn repair_order(&mut self) -> Result<bool, IndexReadError> {
        let mut partial = Vec::with_capacity(self.cells.len());
        let mut expected = 0;
        let mut out_of_order = None;
        while let Some(key) = self.queue.pop() {
            partial.push(key.index);
            if key.index != expected {
                out_of_order = Some(key.index);
                break;
            }
            expected += 1;
        }

        let to_advance = match out_of_order {
            Some(index) => index,
            None => {
                // Positions follow clause order, yet two clauses share a start:
                // the later clause can never start after its predecessor here.
                let index = (1..self.cells.len())
                    .find(|&i| self.cells[i].cursor.start() <= self.cells[i - 1].cursor.start())
                    .unwrap_or(0);
                debug!(
                    "[NearSpanCursor] clauses in order with a shared start, advancing clause {}",
                    index
                );
                index
            }
        };

        trace!("[NearSpanCursor] repairing order by advancing clause {}", to_advance);
        if !self.move_cell(to_advance, None)? {
            return Ok(false);
        }
        for index in partial {
            let key = self.key(index);
            self.queue.put(key);
        }
        Ok(true)
    }

    /// Scan forward from the current cell positions until a match is found.
    fn find_match(&mut self) -> Result<bool, IndexReadError> {
        loop {
            if !self.align()? {
                return Ok(self.exhaust());
            }
            let moved = if self.check_slop() {
                if !self.in_order || self.match_is_ordered() {
                    self.state = CursorState::Positioned;
                    return Ok(true);
                }
                self.repair_order()?
            } else {
                self.advance_min()?
            };
            if !moved {
                return Ok(self.exhaust());
            }
        }
    }

    /// Position every cell for the first time.
    fn init_cells(&mut self, target: Option<DocId>) -> Result<bool, IndexReadError> {
        if self.cells.is_empty() {
            return Ok(false);
        }
        self.doc_list.clear();
        for index in 0..self.cells.len() {
            if !self.move_cell(index, target)? {
                return Ok(false);
            }
            self.doc_list.push_back(index);
        }
        self.list_to_queue();
        Ok(true)
    }
}

impl<'a> SpanCursor for NearSpanCursor<'a> {
    fn advance(&mut self) -> Result<bool, IndexReadError> {
        let moved = match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Unpositioned => self.init_cells(None)?,
            CursorState::Positioned => self.advance_min()?,
        };
        if !moved {
            return Ok(self.exhaust());
        }
        self.find_match()
    }

    fn seek(&mut self, target: DocId) -> Result<bool, IndexReadError> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Unpositioned => {
                if !self.init_cells(Some(target))? {
                    return Ok(self.exhaust());
                }
            }
            CursorState::Positioned => {
                while let Some(min) = self.min() {
                    if min.doc >= target {
                        break;
                    }
                    if !self.move_cell(min.index, Some(target))? {
                        return Ok(self.exhaust());
                    }
                    let key = self.key(min.index);
                    self.queue.replace_top(key);
                }
            }
        }
        self.find_match()
    }

    fn doc(&self) -> DocId {
        match (self.state, self.min()) {
            (CursorState::Positioned, Some(min)) => min.doc,
            _ => NO_MORE_DOCS,
        }
    }

    fn start(&self) -> Position {
        match (self.state, self.min()) {
            (CursorState::Positioned, Some(min)) => min.start,
            _ => NO_MORE_POSITIONS,
        }
    }

    fn end(&self) -> Position {
        match self.state {
            CursorState::Positioned => self.max_doc_end().1,
            _ => NO_MORE_POSITIONS,
        }
    }
}
