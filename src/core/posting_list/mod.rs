mod errors;
mod simple;
mod traits;

pub use errors::PostingListError;
pub use simple::{PositionsElement, PostingList, PostingListBuilder, PostingListIterator};
pub use traits::*;
