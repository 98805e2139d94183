pub mod base;
pub mod date;
pub mod offset;
pub mod types;

pub use base::DataSplitter;
pub use date::DateSplitter;
pub use offset::OffsetSplitter;
pub use types::{SplitPoint, TrainingDataset};

use crate::data::{Period, SeriesEntry};
use crate::engines::evaluation::TestTemplate;
use crate::error::Result;

impl SplitPoint {
    pub fn splitter(&self) -> Box<dyn DataSplitter> {
        match *self {
            SplitPoint::Offset(offset) => Box::new(OffsetSplitter::new(offset)),
            SplitPoint::Date(date) => Box::new(DateSplitter::new(date)),
        }
    }

    pub fn split<'a>(
        &self,
        dataset: &'a [SeriesEntry],
    ) -> Result<(TrainingDataset, TestTemplate<'a>)> {
        self.splitter().split(dataset)
    }
}

/// Split `dataset` at exactly one of `offset` or `date`.
pub fn split<'a>(
    dataset: &'a [SeriesEntry],
    offset: Option<i64>,
    date: Option<Period>,
) -> Result<(TrainingDataset, TestTemplate<'a>)> {
    SplitPoint::from_options(offset, date)?.split(dataset)
}
