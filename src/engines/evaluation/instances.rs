//! Test-window generation over a [`TestTemplate`].
//!
//! For a record split at relative index `s`, window `w` starts at
//! `s + 1 + w * distance` and its label covers the next `prediction_length`
//! observations. The input runs from the series start (or from
//! `max_history` steps back) up to the window start. A window whose label
//! would run past the series end is dropped, and because window starts only
//! increase, so is every later window of that series.

use super::template::{TemplateRecord, TestTemplate};
use crate::data::SeriesEntry;
use crate::error::{Result, TsplitError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// What to do with windows that run past the end of their series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientDataPolicy {
    /// Omit the window and keep going.
    #[default]
    Drop,
    /// Refuse to generate anything if any window is short.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    prediction_length: usize,
    windows: usize,
    distance: Option<usize>,
    max_history: Option<usize>,
    policy: InsufficientDataPolicy,
}

impl WindowParams {
    pub fn new(prediction_length: usize) -> Self {
        Self {
            prediction_length,
            windows: 1,
            distance: None,
            max_history: None,
            policy: InsufficientDataPolicy::Drop,
        }
    }

    pub fn windows(mut self, windows: usize) -> Self {
        self.windows = windows;
        self
    }

    pub fn distance(mut self, distance: usize) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self
    }

    pub fn policy(mut self, policy: InsufficientDataPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn prediction_length(&self) -> usize {
        self.prediction_length
    }

    pub fn window_count(&self) -> usize {
        self.windows
    }

    pub fn effective_distance(&self) -> usize {
        self.distance.unwrap_or(self.prediction_length)
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.max_history
    }

    pub fn insufficient_data_policy(&self) -> InsufficientDataPolicy {
        self.policy
    }

    pub fn validate(&self) -> Result<()> {
        if self.prediction_length == 0 {
            return Err(TsplitError::Configuration(
                "prediction_length must be positive".to_string(),
            ));
        }
        if self.windows == 0 {
            return Err(TsplitError::Configuration(
                "windows must be at least 1".to_string(),
            ));
        }
        if self.distance == Some(0) {
            return Err(TsplitError::Configuration(
                "distance must be positive".to_string(),
            ));
        }
        if self.max_history == Some(0) {
            return Err(TsplitError::Configuration(
                "max_history must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One evaluation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestInstance {
    /// Position of the series in the dataset.
    pub item: usize,
    /// Window number within the series.
    pub window: usize,
    /// History up to, not including, the window start.
    pub input: SeriesEntry,
    /// The `prediction_length` observations starting at the window start.
    pub label: SeriesEntry,
}

impl TestInstance {
    pub fn into_pair(self) -> (SeriesEntry, SeriesEntry) {
        (self.input, self.label)
    }
}

/// Iterator over one side of each generated window.
pub type Projection<'t, 'a> = std::iter::Map<TestInstances<'t, 'a>, fn(TestInstance) -> SeriesEntry>;

fn input_of(instance: TestInstance) -> SeriesEntry {
    instance.input
}

fn label_of(instance: TestInstance) -> SeriesEntry {
    instance.label
}

fn build_instance(
    item: usize,
    record: &TemplateRecord<'_>,
    window: usize,
    params: &WindowParams,
) -> TestInstance {
    let entry = record.entry();
    let window_start =
        (record.split_index() + 1) as usize + window * params.effective_distance();
    let label_end = window_start + params.prediction_length();
    let history_start = params
        .history_limit()
        .map_or(0, |limit| window_start.saturating_sub(limit));

    TestInstance {
        item,
        window,
        input: entry.slice(history_start..window_start, label_end),
        label: entry.slice(window_start..label_end, label_end),
    }
}

/// Lazily generated test windows of a template.
///
/// Cheap to copy and restartable: every call to [`TestData::iter`] starts a
/// fresh pass, and nothing is shared between passes.
#[derive(Debug, Clone, Copy)]
pub struct TestData<'t, 'a> {
    template: &'t TestTemplate<'a>,
    params: WindowParams,
}

impl<'t, 'a> TestData<'t, 'a> {
    pub(crate) fn new(template: &'t TestTemplate<'a>, params: WindowParams) -> Self {
        Self { template, params }
    }

    pub fn params(&self) -> &WindowParams {
        &self.params
    }

    pub fn iter(&self) -> TestInstances<'t, 'a> {
        TestInstances {
            records: self.template.records(),
            params: self.params,
            item: 0,
            window: 0,
            remaining: self.len(),
        }
    }

    pub fn input(&self) -> Projection<'t, 'a> {
        self.iter().map(input_of as fn(TestInstance) -> SeriesEntry)
    }

    pub fn label(&self) -> Projection<'t, 'a> {
        self.iter().map(label_of as fn(TestInstance) -> SeriesEntry)
    }

    /// Number of windows the sequence yields.
    pub fn len(&self) -> usize {
        self.template
            .records()
            .iter()
            .map(|record| record.feasible_windows(&self.params))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of requested windows omitted for lack of data, saturating at
    /// `usize::MAX`.
    pub fn dropped(&self) -> usize {
        self.params
            .window_count()
            .saturating_mul(self.template.len())
            - self.len()
    }

    /// Materializes every window in sequence order, series in parallel.
    pub fn par_collect(&self) -> Vec<TestInstance> {
        let params = self.params;
        self.template
            .records()
            .par_iter()
            .enumerate()
            .flat_map_iter(move |(item, record)| {
                (0..record.feasible_windows(&params))
                    .map(move |window| build_instance(item, record, window, &params))
            })
            .collect()
    }
}

impl<'t, 'a> IntoIterator for TestData<'t, 'a> {
    type Item = TestInstance;
    type IntoIter = TestInstances<'t, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pull-based cursor over the windows of a [`TestData`], ordered by series
/// then by window number.
#[derive(Debug, Clone)]
pub struct TestInstances<'t, 'a> {
    records: &'t [TemplateRecord<'a>],
    params: WindowParams,
    item: usize,
    window: usize,
    remaining: usize,
}

impl Iterator for TestInstances<'_, '_> {
    type Item = TestInstance;

    fn next(&mut self) -> Option<TestInstance> {
        loop {
            let record = self.records.get(self.item)?;
            let feasible = record.feasible_windows(&self.params);

            if self.window < feasible {
                let instance = build_instance(self.item, record, self.window, &self.params);
                self.window += 1;
                self.remaining -= 1;
                return Some(instance);
            }

            let dropped = self.params.window_count() - feasible;
            if dropped > 0 {
                log::debug!(
                    "series {}: dropped {} of {} windows for insufficient data",
                    self.item,
                    dropped,
                    self.params.window_count()
                );
            }
            self.item += 1;
            self.window = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for TestInstances<'_, '_> {}
