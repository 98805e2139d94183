pub mod evaluation;
pub mod splitters;
