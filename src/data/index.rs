use super::frequency::{Frequency, Period};
use crate::error::{Result, TsplitError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// Position axis of a series: a unit-less offset counter or a calendar period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeIndex {
    Offset(i64),
    Period(Period),
}

/// Kind of axis an index lives on; two indices are comparable iff their kinds match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Offset,
    Period(Frequency),
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset => write!(f, "offset"),
            Self::Period(freq) => write!(f, "period[{}]", freq),
        }
    }
}

impl TimeIndex {
    pub fn kind(&self) -> IndexKind {
        match self {
            Self::Offset(_) => IndexKind::Offset,
            Self::Period(p) => IndexKind::Period(p.freq()),
        }
    }

    pub fn advance(&self, n: i64) -> Self {
        match self {
            Self::Offset(i) => Self::Offset(i.saturating_add(n)),
            Self::Period(p) => Self::Period(p.advance(n)),
        }
    }

    /// Signed number of steps from `other` to `self`.
    pub fn difference(&self, other: &TimeIndex) -> Result<i64> {
        match (self, other) {
            (Self::Offset(a), Self::Offset(b)) => a.checked_sub(*b).ok_or_else(|| {
                TsplitError::Configuration(format!("distance from {} to {} overflows", b, a))
            }),
            (Self::Period(a), Self::Period(b)) => a.difference(b),
            _ => Err(TsplitError::mismatch(
                self.kind().to_string(),
                other.kind().to_string(),
            )),
        }
    }

    pub fn compare(&self, other: &TimeIndex) -> Result<Ordering> {
        match (self, other) {
            (Self::Offset(a), Self::Offset(b)) => Ok(a.cmp(b)),
            (Self::Period(a), Self::Period(b)) => a.compare(b),
            _ => Err(TsplitError::mismatch(
                self.kind().to_string(),
                other.kind().to_string(),
            )),
        }
    }

    pub fn ensure_kind(&self, expected: IndexKind) -> Result<()> {
        if self.kind() != expected {
            return Err(TsplitError::mismatch(
                expected.to_string(),
                self.kind().to_string(),
            ));
        }
        Ok(())
    }
}

impl Add<i64> for TimeIndex {
    type Output = TimeIndex;

    fn add(self, n: i64) -> TimeIndex {
        self.advance(n)
    }
}

impl Sub<i64> for TimeIndex {
    type Output = TimeIndex;

    fn sub(self, n: i64) -> TimeIndex {
        self.advance(-n)
    }
}

impl From<Period> for TimeIndex {
    fn from(p: Period) -> Self {
        Self::Period(p)
    }
}

impl From<i64> for TimeIndex {
    fn from(i: i64) -> Self {
        Self::Offset(i)
    }
}

impl fmt::Display for TimeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(i) => write!(f, "{}", i),
            Self::Period(p) => write!(f, "{}", p),
        }
    }
}
