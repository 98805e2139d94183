//! Train/test splitting of time-series datasets.
//!
//! A dataset is a slice of [`SeriesEntry`] records sharing one [`TimeIndex`]
//! kind. [`split`] cuts every entry at an offset or a date, returning the
//! training prefixes and a [`TestTemplate`] that can generate aligned
//! `(input, label)` evaluation windows as many times as needed.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;

pub use data::{Frequency, Period, SeriesEntry, TimeIndex};
pub use engines::evaluation::{
    InsufficientDataPolicy, TestData, TestInstance, TestTemplate, WindowParams,
};
pub use engines::splitters::{split, DataSplitter, SplitPoint, TrainingDataset};
pub use error::{Result, TsplitError};
