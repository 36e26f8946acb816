use crate::core::posting_list::traits::PostingsEnum;
use crate::core::IndexReadError;
use crate::{DocId, Position};

use super::PositionsElement;

/// Cursor over an in-memory posting list.
#[derive(Debug, Clone)]
pub struct PostingListIterator<'a> {
    pub posting: &'a [PositionsElement],
    /// `None` before the first `next_doc`/`seek`.
    pub cursor: Option<usize>,
}

impl<'a> PostingListIterator<'a> {
    pub fn new(posting: &'a [PositionsElement]) -> PostingListIterator<'a> {
        PostingListIterator { posting, cursor: None }
    }

    fn current(&self) -> Option<&'a PositionsElement> {
        self.cursor.and_then(|c| self.posting.get(c))
    }
}

impl<'a> PostingsEnum for PostingListIterator<'a> {
    fn next_doc(&mut self) -> Result<bool, IndexReadError> {
        let next = match self.cursor {
            None => 0,
            Some(c) => (c + 1).min(self.posting.len()),
        };
        self.cursor = Some(next);
        Ok(next < self.posting.len())
    }

    fn seek(&mut self, target: DocId) -> Result<bool, IndexReadError> {
        let start = match self.cursor {
            None => 0,
            Some(c) => {
                if c >= self.posting.len() {
                    return Ok(false);
                }
                if self.posting[c].doc >= target {
                    return Ok(true);
                }
                c
            }
        };

        // first element with doc >= target
        let offset = self.posting[start..].partition_point(|e| e.doc < target);
        let next = start + offset;
        self.cursor = Some(next);
        Ok(next < self.posting.len())
    }

    fn doc(&self) -> DocId {
        self.current().map(|e| e.doc).unwrap_or(DocId::MAX)
    }

    fn term_freq(&self) -> u32 {
        self.current().map(|e| e.term_freq()).unwrap_or(0)
    }

    fn positions(&self) -> &[Position] {
        self.current().map(|e| e.positions.as_slice()).unwrap_or(&[])
    }
}
