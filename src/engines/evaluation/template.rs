use super::instances::{InsufficientDataPolicy, TestData, WindowParams};
use crate::data::{SeriesEntry, TimeIndex};
use crate::error::{Result, TsplitError};

/// A full series together with where it was split.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRecord<'a> {
    entry: &'a SeriesEntry,
    split_index: i64,
}

impl<'a> TemplateRecord<'a> {
    pub(crate) fn new(entry: &'a SeriesEntry, split_index: i64) -> Self {
        Self { entry, split_index }
    }

    pub fn entry(&self) -> &'a SeriesEntry {
        self.entry
    }

    /// Split point relative to the entry start, in `-1..len`.
    pub fn split_index(&self) -> i64 {
        self.split_index
    }

    pub fn split_point(&self) -> TimeIndex {
        self.entry.start().advance(self.split_index)
    }

    /// Observations after the split point.
    pub fn held_out(&self) -> usize {
        self.entry.len() - (self.split_index + 1) as usize
    }

    /// Number of leading windows of `params` that fit inside the entry.
    pub(crate) fn feasible_windows(&self, params: &WindowParams) -> usize {
        let pl = params.prediction_length();
        let held_out = self.held_out();
        if held_out < pl {
            return 0;
        }
        ((held_out - pl) / params.effective_distance() + 1).min(params.window_count())
    }
}

/// Full series plus split points, reused to generate test windows on demand.
#[derive(Debug, Clone)]
pub struct TestTemplate<'a> {
    records: Vec<TemplateRecord<'a>>,
}

impl<'a> TestTemplate<'a> {
    pub(crate) fn new(records: Vec<TemplateRecord<'a>>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TemplateRecord<'a>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Windows of `prediction_length` steps starting right after each split
    /// point, `distance` steps apart (defaults to `prediction_length`).
    ///
    /// Windows running past the end of their series are dropped from the
    /// sequence, not padded; see [`TestData::dropped`].
    pub fn generate_instances(
        &self,
        prediction_length: usize,
        windows: usize,
        distance: Option<usize>,
    ) -> Result<TestData<'_, 'a>> {
        let mut params = WindowParams::new(prediction_length).windows(windows);
        if let Some(distance) = distance {
            params = params.distance(distance);
        }
        self.generate_with(params)
    }

    pub fn generate_with(&self, params: WindowParams) -> Result<TestData<'_, 'a>> {
        params.validate()?;

        if params.insufficient_data_policy() == InsufficientDataPolicy::Strict {
            for (item, record) in self.records.iter().enumerate() {
                let feasible = record.feasible_windows(&params);
                if feasible < params.window_count() {
                    let required_end = (record.split_index + 1) as usize
                        + feasible * params.effective_distance()
                        + params.prediction_length();
                    return Err(TsplitError::InsufficientData {
                        item,
                        window: feasible,
                        required_end,
                        available: record.entry.len(),
                    });
                }
            }
        }

        Ok(TestData::new(self, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entry: &SeriesEntry, split_index: i64) -> TemplateRecord<'_> {
        TemplateRecord::new(entry, split_index)
    }

    #[test]
    fn test_feasible_windows_counts_leading_windows() {
        let entry = SeriesEntry::new(0, vec![0.0; 20]);
        let rec = record(&entry, 9);
        assert_eq!(rec.held_out(), 10);

        let params = WindowParams::new(3).windows(5);
        // starts 10, 13, 16 fit; 19 would need index 21
        assert_eq!(rec.feasible_windows(&params), 3);
        assert_eq!(rec.feasible_windows(&params.distance(1)), 5);
        assert_eq!(rec.feasible_windows(&WindowParams::new(11)), 0);
    }

    #[test]
    fn test_split_point_follows_entry_start() {
        let entry = SeriesEntry::new(7, vec![0.0; 5]);
        assert_eq!(record(&entry, -1).split_point(), TimeIndex::Offset(6));
        assert_eq!(record(&entry, -1).held_out(), 5);
    }

    #[test]
    fn test_strict_policy_fails_before_generating() {
        let entries = vec![
            SeriesEntry::new(0, vec![0.0; 20]),
            SeriesEntry::new(0, vec![0.0; 12]),
        ];
        let template = TestTemplate::new(vec![record(&entries[0], 9), record(&entries[1], 9)]);
        let params = WindowParams::new(2)
            .windows(2)
            .policy(InsufficientDataPolicy::Strict);

        match template.generate_with(params) {
            Err(TsplitError::InsufficientData {
                item,
                window,
                required_end,
                available,
            }) => {
                assert_eq!((item, window, required_end, available), (1, 1, 14, 12));
            }
            other => panic!("expected InsufficientData, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_invalid_parameters_are_configuration_errors() {
        let entries = vec![SeriesEntry::new(0, vec![0.0; 5])];
        let template = TestTemplate::new(vec![record(&entries[0], 2)]);
        assert!(matches!(
            template.generate_instances(0, 1, None),
            Err(TsplitError::Configuration(_))
        ));
        assert!(matches!(
            template.generate_instances(1, 0, None),
            Err(TsplitError::Configuration(_))
        ));
        assert!(matches!(
            template.generate_instances(1, 1, Some(0)),
            Err(TsplitError::Configuration(_))
        ));
    }
}
