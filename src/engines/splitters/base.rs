use super::types::{SplitPoint, TrainingDataset};
use crate::data::{IndexKind, SeriesEntry};
use crate::engines::evaluation::{TemplateRecord, TestTemplate};
use crate::error::{Result, TsplitError};

pub trait DataSplitter: Send + Sync {
    /// Split point this splitter cuts at
    fn split_point(&self) -> SplitPoint;

    /// Fails unless the dataset's index kind can be cut at this split point
    fn check_kind(&self, kind: IndexKind) -> Result<()>;

    /// Split point of `entry` relative to its start, before clipping
    fn resolve(&self, entry: &SeriesEntry) -> Result<i64>;

    /// Split every entry into a training prefix and a test-template record.
    ///
    /// The training prefix holds every observation up to and including the
    /// split point. The split point is clipped to `[-1, len - 1]`: before the
    /// start nothing is trained on, past the end nothing is left for testing.
    /// All checks run before any output is built.
    fn split<'a>(
        &self,
        dataset: &'a [SeriesEntry],
    ) -> Result<(TrainingDataset, TestTemplate<'a>)> {
        let first = dataset.first().ok_or(TsplitError::EmptyDataset)?;
        let kind = first.start().kind();
        self.check_kind(kind)?;

        for entry in dataset {
            entry.start().ensure_kind(kind)?;
            entry.validate()?;
        }

        let mut training = Vec::with_capacity(dataset.len());
        let mut records = Vec::with_capacity(dataset.len());

        for (item, entry) in dataset.iter().enumerate() {
            let last = entry.len() as i64 - 1;
            let split_index = self.resolve(entry)?.clamp(-1, last);
            let train_len = (split_index + 1) as usize;

            if train_len == 0 {
                log::warn!("series {} has no observations before the split point", item);
            } else if split_index == last {
                log::warn!("series {} lies entirely in the training range", item);
            }
            log::debug!(
                "series {}: {} training / {} held-out observations",
                item,
                train_len,
                entry.len() - train_len
            );

            training.push(entry.slice(0..train_len, train_len));
            records.push(TemplateRecord::new(entry, split_index));
        }

        log::info!(
            "Split {} series at {:?}",
            dataset.len(),
            self.split_point()
        );

        Ok((TrainingDataset::new(training), TestTemplate::new(records)))
    }
}
