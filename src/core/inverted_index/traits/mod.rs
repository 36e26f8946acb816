mod index_reader;

pub use index_reader::IndexReader;
