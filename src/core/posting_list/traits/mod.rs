mod iterator;

pub use iterator::PostingsEnum;
