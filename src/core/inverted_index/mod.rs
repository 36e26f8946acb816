mod errors;
mod inverted_index_ram;
mod inverted_index_ram_builder;
mod traits;

pub use errors::{IndexReadError, InvertedIndexError};
pub use inverted_index_ram::InvertedIndexRam;
pub use inverted_index_ram_builder::InvertedIndexRamBuilder;
pub use traits::*;
