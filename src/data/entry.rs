use super::index::TimeIndex;
use crate::error::{Result, TsplitError};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One time series record.
///
/// Entries are never mutated by the splitter; every slice is a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    start: TimeIndex,
    target: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    feat_static_cat: Vec<i64>,
    /// Time-aligned covariate rows, each as long as `target`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    feat_dynamic_real: Vec<Vec<f64>>,
}

impl SeriesEntry {
    pub fn new(start: impl Into<TimeIndex>, target: Vec<f64>) -> Self {
        Self {
            start: start.into(),
            target,
            item_id: None,
            feat_static_cat: Vec::new(),
            feat_dynamic_real: Vec::new(),
        }
    }

    pub fn with_item_id(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn with_static_cat(mut self, cats: Vec<i64>) -> Self {
        self.feat_static_cat = cats;
        self
    }

    pub fn with_dynamic_real(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.feat_dynamic_real = rows;
        self
    }

    pub fn start(&self) -> TimeIndex {
        self.start
    }

    /// One past the last observation.
    pub fn end(&self) -> TimeIndex {
        self.start.advance(self.len() as i64)
    }

    pub fn target(&self) -> &[f64] {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    pub fn feat_static_cat(&self) -> &[i64] {
        &self.feat_static_cat
    }

    pub fn feat_dynamic_real(&self) -> &[Vec<f64>] {
        &self.feat_dynamic_real
    }

    /// Position of `index` relative to `start` (may be negative or past the end).
    pub fn relative_index(&self, index: &TimeIndex) -> Result<i64> {
        index.difference(&self.start)
    }

    /// Checks that covariate rows line up with the target.
    pub fn validate(&self) -> Result<()> {
        if let Some(row) = self
            .feat_dynamic_real
            .iter()
            .position(|row| row.len() != self.target.len())
        {
            return Err(TsplitError::Configuration(format!(
                "series {}: feat_dynamic_real row {} has length {}, target has {}",
                self.label(),
                row,
                self.feat_dynamic_real[row].len(),
                self.target.len()
            )));
        }
        Ok(())
    }

    /// New entry holding `range` of the target, with covariates kept up to
    /// `covariate_end` (clamped to the series length).
    pub(crate) fn slice(&self, range: Range<usize>, covariate_end: usize) -> SeriesEntry {
        let covariate_end = covariate_end.clamp(range.start, self.len());
        SeriesEntry {
            start: self.start.advance(range.start as i64),
            target: self.target[range.clone()].to_vec(),
            item_id: self.item_id.clone(),
            feat_static_cat: self.feat_static_cat.clone(),
            feat_dynamic_real: self
                .feat_dynamic_real
                .iter()
                .map(|row| row[range.start..covariate_end].to_vec())
                .collect(),
        }
    }

    fn label(&self) -> String {
        self.item_id
            .clone()
            .unwrap_or_else(|| format!("starting at {}", self.start))
    }
}
