pub mod entry;
pub mod frequency;
pub mod index;

pub use entry::SeriesEntry;
pub use frequency::{FreqUnit, Frequency, Period};
pub use index::{IndexKind, TimeIndex};
