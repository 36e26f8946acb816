mod span_search_config;

pub use span_search_config::SpanSearchConfig;
