use super::base::DataSplitter;
use super::types::SplitPoint;
use crate::data::{IndexKind, Period, SeriesEntry, TimeIndex};
use crate::error::{Result, TsplitError};

/// Splits period-indexed series at a calendar date; the date itself belongs
/// to the training side.
pub struct DateSplitter {
    date: Period,
}

impl DateSplitter {
    pub fn new(date: Period) -> Self {
        Self { date }
    }
}

impl DataSplitter for DateSplitter {
    fn split_point(&self) -> SplitPoint {
        SplitPoint::Date(self.date)
    }

    fn check_kind(&self, kind: IndexKind) -> Result<()> {
        let expected = IndexKind::Period(self.date.freq());
        if kind != expected {
            return Err(TsplitError::mismatch(expected.to_string(), kind.to_string()));
        }
        Ok(())
    }

    fn resolve(&self, entry: &SeriesEntry) -> Result<i64> {
        entry.relative_index(&TimeIndex::Period(self.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Frequency;

    fn hourly(ordinal: i64, len: usize) -> SeriesEntry {
        SeriesEntry::new(
            Period::new(ordinal, Frequency::hourly()),
            (0..len).map(|v| v as f64).collect(),
        )
    }

    #[test]
    fn test_date_is_inclusive_on_training_side() {
        let dataset = vec![hourly(0, 100)];
        let date = Period::new(50, Frequency::hourly());
        let (train, _) = DateSplitter::new(date).split(&dataset).unwrap();
        assert_eq!(train.entries()[0].len(), 51);
        assert_eq!(train.entries()[0].target()[50], 50.0);
    }

    #[test]
    fn test_date_resolves_per_entry_start() {
        let dataset = vec![hourly(0, 100), hourly(40, 100), hourly(80, 10)];
        let date = Period::new(50, Frequency::hourly());
        let (train, _) = DateSplitter::new(date).split(&dataset).unwrap();
        let lens: Vec<usize> = train.iter().map(|e| e.len()).collect();
        assert_eq!(lens, vec![51, 11, 0]);
    }

    #[test]
    fn test_frequency_mismatch_is_rejected() {
        let dataset = vec![hourly(0, 10)];
        let date = Period::new(5, Frequency::daily());
        assert!(matches!(
            DateSplitter::new(date).split(&dataset),
            Err(TsplitError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_offset_indexed_dataset_is_rejected() {
        let dataset = vec![SeriesEntry::new(0, vec![1.0; 10])];
        let date = Period::new(5, Frequency::hourly());
        assert!(matches!(
            DateSplitter::new(date).split(&dataset),
            Err(TsplitError::TypeMismatch { .. })
        ));
    }
}
