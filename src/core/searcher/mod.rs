mod span_searcher;

pub use span_searcher::SpanSearcher;
