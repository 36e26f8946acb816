use std::sync::Arc;

use log::trace;

use super::Similarity;
use crate::common::ScoreType;
use crate::core::inverted_index::IndexReader;
use crate::core::spans::{CursorState, SpanCursor, SpanCursors, NO_MORE_DOCS};
use crate::core::IndexReadError;
use crate::DocId;

/// Scores the docs matched by a span cursor, one doc at a time in ascending order.
///
/// Each match contributes `sloppy_freq(end - start)` to the doc's frequency.
/// Collecting a doc leaves the underlying cursor on the first match of the
/// next doc.
pub struct SpanScorer<'a> {
    spans: SpanCursors<'a>,
    reader: &'a dyn IndexReader,
    similarity: Arc<dyn Similarity>,
    field: String,
    weight_value: ScoreType,
    more: bool,
    state: CursorState,
    doc: DocId,
    freq: ScoreType,
}

impl<'a> SpanScorer<'a> {
    pub fn new(
        spans: SpanCursors<'a>,
        reader: &'a dyn IndexReader,
        similarity: Arc<dyn Similarity>,
        field: &str,
        weight_value: ScoreType,
    ) -> Self {
        Self {
            spans,
            reader,
            similarity,
            field: field.to_string(),
            weight_value,
            more: false,
            state: CursorState::Unpositioned,
            doc: NO_MORE_DOCS,
            freq: 0.0,
        }
    }

    /// Move to the next matching doc.
    pub fn next_doc(&mut self) -> Result<bool, IndexReadError> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Unpositioned => self.more = self.spans.advance()?,
            CursorState::Positioned => {}
        }
        self.collect_current_doc()
    }

    /// Move to the first matching doc `>= target`; a no-op when already there.
    pub fn seek_doc(&mut self, target: DocId) -> Result<bool, IndexReadError> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Positioned if self.doc >= target => return Ok(true),
            CursorState::Unpositioned => self.more = self.spans.seek(target)?,
            CursorState::Positioned => {
                if self.more {
                    self.more = self.spans.seek(target)?;
                }
            }
        }
        self.collect_current_doc()
    }

    fn collect_current_doc(&mut self) -> Result<bool, IndexReadError> {
        if !self.more {
            self.state = CursorState::Exhausted;
            self.doc = NO_MORE_DOCS;
            self.freq = 0.0;
            return Ok(false);
        }
        self.doc = self.spans.doc();
        self.freq = 0.0;
        while self.more && self.spans.doc() == self.doc {
            self.freq += self.similarity.sloppy_freq(self.spans.width());
            self.more = self.spans.advance()?;
        }
        self.state = CursorState::Positioned;
        trace!("[SpanScorer] doc {} freq {}", self.doc, self.freq);
        Ok(true)
    }

    pub fn doc(&self) -> DocId {
        self.doc
    }

    /// Summed sloppy frequency of the current doc.
    pub fn freq(&self) -> ScoreType {
        self.freq
    }

    pub fn field_norm(&self) -> ScoreType {
        self.reader.norm(&self.field, self.doc)
    }

    pub fn score(&self) -> ScoreType {
        self.similarity.tf(self.freq) * self.weight_value * self.field_norm()
    }
}
