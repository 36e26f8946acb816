#[macro_use]
mod macros;
pub mod common;
pub mod config;
pub mod core;

pub type DocId = u32;
pub type Position = u32;

pub use crate::common::{ScoreType, ScoredDoc};
pub use crate::config::SpanSearchConfig;
pub use crate::core::{
    IndexReader, InvertedIndexRam, InvertedIndexRamBuilder, Span, SpanCursor, SpanQuery,
    SpanQueryBuilder, SpanQueryOps, SpanSearcher,
};
