pub mod constants;
pub mod errors;
pub mod file_operations;
pub mod logger;
mod top_k;
mod types;

pub use top_k::TopK;
pub use types::*;
