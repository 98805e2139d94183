use crate::data::{Period, SeriesEntry};
use crate::error::{Result, TsplitError};
use serde::{Deserialize, Serialize};

/// Where to cut each series: a step offset or a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPoint {
    /// Non-negative: counted from the first observation. Negative: counted
    /// back from the series end.
    Offset(i64),
    /// Absolute period on the dataset's frequency.
    Date(Period),
}

impl SplitPoint {
    /// Builds a split point from the two optional arguments, exactly one of
    /// which must be set.
    pub fn from_options(offset: Option<i64>, date: Option<Period>) -> Result<Self> {
        match (offset, date) {
            (Some(offset), None) => Ok(Self::Offset(offset)),
            (None, Some(date)) => Ok(Self::Date(date)),
            (Some(_), Some(_)) => Err(TsplitError::Configuration(
                "only one of offset and date may be given".to_string(),
            )),
            (None, None) => Err(TsplitError::Configuration(
                "one of offset or date must be given".to_string(),
            )),
        }
    }
}

/// Series truncated to their training prefixes, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingDataset {
    entries: Vec<SeriesEntry>,
}

impl TrainingDataset {
    pub fn new(entries: Vec<SeriesEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SeriesEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeriesEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for TrainingDataset {
    type Item = SeriesEntry;
    type IntoIter = std::vec::IntoIter<SeriesEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a TrainingDataset {
    type Item = &'a SeriesEntry;
    type IntoIter = std::slice::Iter<'a, SeriesEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
