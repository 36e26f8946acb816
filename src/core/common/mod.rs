mod term;

pub use term::Term;
