use log::debug;

use super::PostingListIterator;
use crate::{DocId, Position};

/// All positions of one term inside one doc.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionsElement {
    pub doc: DocId,
    /// Ascending, no duplicates.
    pub positions: Vec<Position>,
}

impl PositionsElement {
    pub fn new(doc: DocId, positions: Vec<Position>) -> Self {
        Self { doc, positions }
    }

    pub fn term_freq(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Insert one position keeping the list sorted. Returns `false` when it was already present.
    fn insert_position(&mut self, position: Position) -> bool {
        // sequential insert
        match self.positions.last() {
            None => {
                self.positions.push(position);
                return true;
            }
            Some(&last) if last < position => {
                self.positions.push(position);
                return true;
            }
            _ => {}
        }
        match self.positions.binary_search(&position) {
            Ok(_) => false,
            Err(insert_idx) => {
                self.positions.insert(insert_idx, position);
                true
            }
        }
    }
}

/// Postings of one term, sorted by doc.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostingList {
    pub elements: Vec<PositionsElement>,
}

impl std::fmt::Display for PostingList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Posting[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{:?}", element.doc, element.positions)?;
        }
        write!(f, "]")
    }
}

impl PostingList {
    pub fn new() -> Self {
        Self { elements: vec![] }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, doc: DocId) -> Option<&PositionsElement> {
        self.elements.binary_search_by_key(&doc, |e| e.doc).ok().map(|idx| &self.elements[idx])
    }

    pub fn iter(&self) -> PostingListIterator<'_> {
        PostingListIterator::new(&self.elements)
    }

    /// Record `position` for `doc`.
    ///
    /// Returns `(index, inserted)`: where the doc lives in `elements`, and whether
    /// the position was new.
    pub fn upsert(&mut self, doc: DocId, position: Position) -> (usize, bool) {
        // boundary
        if self.elements.is_empty() {
            self.elements.push(PositionsElement::new(doc, vec![position]));
            return (0, true);
        }

        // sequential insert
        if let Some(last_element) = self.elements.last_mut() {
            if last_element.doc < doc {
                self.elements.push(PositionsElement::new(doc, vec![position]));
                return (self.elements.len() - 1, true);
            } else if last_element.doc == doc {
                let inserted = last_element.insert_position(position);
                return (self.elements.len() - 1, inserted);
            }
        }

        // binary search to insert or update. (slower than sequential upsert)
        debug!("Inserting positions for doc {} before the last doc of the posting.", doc);
        match self.elements.binary_search_by_key(&doc, |e| e.doc) {
            Ok(found_idx) => {
                let inserted = self.elements[found_idx].insert_position(position);
                (found_idx, inserted)
            }
            Err(insert_idx) => {
                self.elements.insert(insert_idx, PositionsElement::new(doc, vec![position]));
                (insert_idx, true)
            }
        }
    }
}
