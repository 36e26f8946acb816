pub mod common;
pub mod inverted_index;
pub mod posting_list;
pub mod query;
pub mod scorer;
pub mod searcher;
pub mod spans;

pub use common::*;
pub use inverted_index::*;
pub use posting_list::*;
pub use query::*;
pub use scorer::*;
pub use searcher::SpanSearcher;
pub use spans::{
    EmptySpanCursor, FirstSpanCursor, NearSpanCursor, NotSpanCursor, OrSpanCursor, Span, SpanCursor,
    SpanCursors, TermSpanCursor, NO_MORE_DOCS, NO_MORE_POSITIONS,
};
