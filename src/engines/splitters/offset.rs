use super::base::DataSplitter;
use super::types::SplitPoint;
use crate::data::{IndexKind, SeriesEntry};
use crate::error::{Result, TsplitError};

/// Splits offset-indexed series a fixed number of steps from their start
/// (non-negative offset) or from their end (negative offset).
pub struct OffsetSplitter {
    offset: i64,
}

impl OffsetSplitter {
    pub fn new(offset: i64) -> Self {
        Self { offset }
    }
}

impl DataSplitter for OffsetSplitter {
    fn split_point(&self) -> SplitPoint {
        SplitPoint::Offset(self.offset)
    }

    fn check_kind(&self, kind: IndexKind) -> Result<()> {
        match kind {
            IndexKind::Offset => Ok(()),
            IndexKind::Period(_) => Err(TsplitError::mismatch(
                IndexKind::Offset.to_string(),
                kind.to_string(),
            )),
        }
    }

    fn resolve(&self, entry: &SeriesEntry) -> Result<i64> {
        if self.offset >= 0 {
            Ok(self.offset)
        } else {
            Ok(entry.len() as i64 + self.offset)
        }
    }
}
