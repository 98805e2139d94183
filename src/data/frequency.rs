//! Calendar frequencies and the periods laid out on them.
//!
//! A [`Period`] is stored as an integer ordinal counted from the unix epoch in
//! steps of its [`Frequency`], so advancing and differencing periods is exact
//! integer arithmetic. Weekly periods are anchored on Mondays (1969-12-29).

use crate::error::{Result, TsplitError};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const WEEK_ANCHOR_SHIFT_SECS: i64 = 3 * 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreqUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl FreqUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "D",
            Self::Week => "W",
            Self::Month => "M",
            Self::Quarter => "Q",
            Self::Year => "Y",
        }
    }

    /// Accepted spellings, pandas-style aliases included.
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Second => vec!["s", "S", "sec"],
            Self::Minute => vec!["min", "T", "m"],
            Self::Hour => vec!["h", "H"],
            Self::Day => vec!["D", "d"],
            Self::Week => vec!["W", "w"],
            Self::Month => vec!["M", "MS", "mo"],
            Self::Quarter => vec!["Q", "QS", "q"],
            Self::Year => vec!["Y", "YS", "A", "y"],
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Second,
            Self::Minute,
            Self::Hour,
            Self::Day,
            Self::Week,
            Self::Month,
            Self::Quarter,
            Self::Year,
        ]
    }

    fn step(&self) -> Step {
        match self {
            Self::Second => Step::Seconds(1),
            Self::Minute => Step::Seconds(60),
            Self::Hour => Step::Seconds(3_600),
            Self::Day => Step::Seconds(86_400),
            Self::Week => Step::Seconds(7 * 86_400),
            Self::Month => Step::Months(1),
            Self::Quarter => Step::Months(3),
            Self::Year => Step::Months(12),
        }
    }
}

enum Step {
    Seconds(i64),
    Months(i64),
}

/// Fixed sampling frequency such as `"1h"`, `"15min"` or `"M"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Frequency {
    multiple: u32,
    unit: FreqUnit,
}

impl Frequency {
    pub fn new(multiple: u32, unit: FreqUnit) -> Result<Self> {
        if multiple == 0 {
            return Err(TsplitError::InvalidFrequency(
                "frequency multiple must be positive".to_string(),
            ));
        }
        Ok(Self { multiple, unit })
    }

    pub fn hourly() -> Self {
        Self {
            multiple: 1,
            unit: FreqUnit::Hour,
        }
    }

    pub fn daily() -> Self {
        Self {
            multiple: 1,
            unit: FreqUnit::Day,
        }
    }

    pub fn multiple(&self) -> u32 {
        self.multiple
    }

    pub fn unit(&self) -> FreqUnit {
        self.unit
    }

    /// Ordinal of the period containing `dt`.
    pub fn ordinal_of(&self, dt: NaiveDateTime) -> i64 {
        let multiple = i64::from(self.multiple);
        match self.unit.step() {
            Step::Seconds(secs) => {
                let mut since_epoch = dt.and_utc().timestamp();
                if self.unit == FreqUnit::Week {
                    since_epoch += WEEK_ANCHOR_SHIFT_SECS;
                }
                since_epoch.div_euclid(secs * multiple)
            }
            Step::Months(months) => {
                let since_epoch =
                    i64::from(dt.year() - 1970) * 12 + i64::from(dt.month0());
                since_epoch.div_euclid(months * multiple)
            }
        }
    }

    /// First instant of the period with the given ordinal.
    pub fn start_of(&self, ordinal: i64) -> Result<NaiveDateTime> {
        let multiple = i64::from(self.multiple);
        let out_of_range =
            || TsplitError::Configuration(format!("period ordinal {} out of range for {}", ordinal, self));
        match self.unit.step() {
            Step::Seconds(secs) => {
                let mut ts = ordinal
                    .checked_mul(secs * multiple)
                    .ok_or_else(out_of_range)?;
                if self.unit == FreqUnit::Week {
                    ts -= WEEK_ANCHOR_SHIFT_SECS;
                }
                DateTime::from_timestamp(ts, 0)
                    .map(|dt| dt.naive_utc())
                    .ok_or_else(out_of_range)
            }
            Step::Months(months) => {
                let since_epoch = ordinal
                    .checked_mul(months * multiple)
                    .ok_or_else(out_of_range)?;
                let year = i32::try_from(1970 + since_epoch.div_euclid(12))
                    .map_err(|_| out_of_range())?;
                let month = since_epoch.rem_euclid(12) as u32 + 1;
                NaiveDate::from_ymd_opt(year, month, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .ok_or_else(out_of_range)
            }
        }
    }

    fn render_format(&self) -> &'static str {
        match self.unit {
            FreqUnit::Second => "%Y-%m-%d %H:%M:%S",
            FreqUnit::Minute | FreqUnit::Hour => "%Y-%m-%d %H:%M",
            FreqUnit::Day | FreqUnit::Week => "%Y-%m-%d",
            FreqUnit::Month | FreqUnit::Quarter => "%Y-%m",
            FreqUnit::Year => "%Y",
        }
    }
}

impl FromStr for Frequency {
    type Err = TsplitError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let num_end = s
            .chars()
            .position(|c| !c.is_ascii_digit())
            .unwrap_or(s.len());

        let multiple = if num_end == 0 {
            1
        } else {
            s[..num_end].parse::<u32>().map_err(|_| {
                TsplitError::InvalidFrequency(format!("'{}' has an invalid multiple", s))
            })?
        };

        let unit_str = &s[num_end..];
        let unit = FreqUnit::all()
            .into_iter()
            .find(|unit| unit.aliases().iter().any(|alias| *alias == unit_str))
            .ok_or_else(|| {
                TsplitError::InvalidFrequency(format!(
                    "unknown unit '{}' in '{}' (expected s, min, h, D, W, M, Q or Y)",
                    unit_str, s
                ))
            })?;

        Self::new(multiple, unit)
    }
}

impl TryFrom<String> for Frequency {
    type Error = TsplitError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        freq.to_string()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.multiple, self.unit.as_str())
    }
}

/// One calendar period at a fixed frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    ordinal: i64,
    freq: Frequency,
}

impl Period {
    pub fn new(ordinal: i64, freq: Frequency) -> Self {
        Self { ordinal, freq }
    }

    pub fn from_datetime(dt: NaiveDateTime, freq: Frequency) -> Self {
        Self {
            ordinal: freq.ordinal_of(dt),
            freq,
        }
    }

    /// Parse a timestamp such as `2021-01-01 05:00`, `2021-01-01` or `2021-03`
    /// into the period containing it.
    pub fn parse(s: &str, freq: Frequency) -> Result<Self> {
        let s = s.trim();
        const DATETIME_FORMATS: [&str; 4] = [
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M",
        ];

        let parsed = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d"))
                    .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01-01", s), "%Y-%m-%d"))
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(|| TsplitError::Configuration(format!("cannot parse date '{}'", s)))?;

        Ok(Self::from_datetime(parsed, freq))
    }

    pub fn ordinal(&self) -> i64 {
        self.ordinal
    }

    pub fn freq(&self) -> Frequency {
        self.freq
    }

    /// Moves `n` periods, saturating at the ends of the ordinal range.
    pub fn advance(&self, n: i64) -> Self {
        Self {
            ordinal: self.ordinal.saturating_add(n),
            freq: self.freq,
        }
    }

    /// Number of periods from `other` to `self`.
    pub fn difference(&self, other: &Period) -> Result<i64> {
        self.ensure_same_freq(other)?;
        self.ordinal.checked_sub(other.ordinal).ok_or_else(|| {
            TsplitError::Configuration(format!(
                "distance from {} to {} overflows",
                other.ordinal, self.ordinal
            ))
        })
    }

    pub fn compare(&self, other: &Period) -> Result<Ordering> {
        self.ensure_same_freq(other)?;
        Ok(self.ordinal.cmp(&other.ordinal))
    }

    pub fn start_time(&self) -> Result<NaiveDateTime> {
        self.freq.start_of(self.ordinal)
    }

    fn ensure_same_freq(&self, other: &Period) -> Result<()> {
        if self.freq != other.freq {
            return Err(TsplitError::mismatch(
                format!("period[{}]", self.freq),
                format!("period[{}]", other.freq),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start_time() {
            Ok(dt) => write!(f, "{}", dt.format(self.freq.render_format())),
            Err(_) => write!(f, "#{}@{}", self.ordinal, self.freq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_frequency_aliases() {
        assert_eq!("H".parse::<Frequency>().unwrap(), Frequency::hourly());
        assert_eq!("1h".parse::<Frequency>().unwrap(), Frequency::hourly());
        assert_eq!(
            "15T".parse::<Frequency>().unwrap(),
            Frequency::new(15, FreqUnit::Minute).unwrap()
        );
        assert_eq!("M".parse::<Frequency>().unwrap().unit(), FreqUnit::Month);
        assert_eq!("m".parse::<Frequency>().unwrap().unit(), FreqUnit::Minute);
        assert!("0h".parse::<Frequency>().is_err());
        assert!("3fortnights".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_hourly_ordinals_step_by_one_per_hour() {
        let freq = Frequency::hourly();
        let a = Period::from_datetime(datetime(2021, 1, 1, 0), freq);
        let b = Period::from_datetime(datetime(2021, 1, 3, 5), freq);
        assert_eq!(b.difference(&a).unwrap(), 53);
        assert_eq!(a.advance(53), b);
        assert_eq!(b.to_string(), "2021-01-03 05:00");
    }

    #[test]
    fn test_monthly_periods_cross_year_boundaries() {
        let freq: Frequency = "M".parse().unwrap();
        let nov = Period::parse("2020-11", freq).unwrap();
        let feb = nov.advance(3);
        assert_eq!(feb.to_string(), "2021-02");
        assert_eq!(feb.start_time().unwrap(), datetime(2021, 2, 1, 0));
    }

    #[test]
    fn test_weeks_start_on_monday() {
        let freq: Frequency = "W".parse().unwrap();
        // 2021-01-06 is a Wednesday.
        let p = Period::from_datetime(datetime(2021, 1, 6, 12), freq);
        assert_eq!(p.start_time().unwrap(), datetime(2021, 1, 4, 0));
    }

    #[test]
    fn test_periods_before_epoch() {
        let freq = Frequency::daily();
        let p = Period::parse("1969-12-31", freq).unwrap();
        assert_eq!(p.ordinal(), -1);
        assert_eq!(p.to_string(), "1969-12-31");
    }

    #[test]
    fn test_mixed_frequencies_are_rejected() {
        let hourly = Period::new(10, Frequency::hourly());
        let daily = Period::new(10, Frequency::daily());
        assert!(matches!(
            hourly.difference(&daily),
            Err(TsplitError::TypeMismatch { .. })
        ));
        assert!(hourly.compare(&daily).is_err());
    }

    #[test]
    fn test_distant_ordinals_error_instead_of_overflowing() {
        let far = Period::new(i64::MAX, Frequency::hourly());
        let before = Period::new(-10, Frequency::hourly());
        assert!(matches!(
            far.difference(&before),
            Err(TsplitError::Configuration(_))
        ));
        assert_eq!(far.advance(1), far);
        assert_eq!(before.compare(&far).unwrap(), std::cmp::Ordering::Less);
    }

    #[test]
    fn test_frequency_serde_uses_string_form() {
        let freq = Frequency::new(2, FreqUnit::Hour).unwrap();
        let json = serde_json::to_string(&freq).unwrap();
        assert_eq!(json, "\"2h\"");
        let back: Frequency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, freq);
    }
}
