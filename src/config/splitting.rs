use super::traits::ConfigSection;
use crate::data::{Frequency, Period};
use crate::engines::splitters::SplitPoint;
use crate::error::TsplitError;
use serde::{Deserialize, Serialize};

/// `[split]` section: exactly one of `offset` or `date`; `date` needs `freq`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<String>,
}

impl Default for SplitSection {
    fn default() -> Self {
        Self {
            offset: Some(-24),
            date: None,
            freq: None,
        }
    }
}

impl SplitSection {
    pub fn to_split_point(&self) -> Result<SplitPoint, TsplitError> {
        let date = match &self.date {
            Some(date) => {
                let freq: Frequency = self
                    .freq
                    .as_deref()
                    .ok_or_else(|| {
                        TsplitError::Configuration(
                            "split.date requires split.freq".to_string(),
                        )
                    })?
                    .parse()?;
                Some(Period::parse(date, freq)?)
            }
            None => None,
        };
        SplitPoint::from_options(self.offset, date)
    }
}

impl ConfigSection for SplitSection {
    fn section_name() -> &'static str {
        "split"
    }

    fn validate(&self) -> Result<(), TsplitError> {
        self.to_split_point().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_section_resolves_to_period() {
        let section = SplitSection {
            offset: None,
            date: Some("2021-01-03 02:00".to_string()),
            freq: Some("H".to_string()),
        };
        match section.to_split_point().unwrap() {
            SplitPoint::Date(p) => assert_eq!(p.to_string(), "2021-01-03 02:00"),
            other => panic!("expected a date split, got {:?}", other),
        }
    }

    #[test]
    fn test_date_without_freq_is_rejected() {
        let section = SplitSection {
            offset: None,
            date: Some("2021-01-03".to_string()),
            freq: None,
        };
        assert!(section.validate().is_err());
    }

    #[test]
    fn test_offset_and_date_together_are_rejected() {
        let section = SplitSection {
            offset: Some(5),
            date: Some("2021-01-03".to_string()),
            freq: Some("D".to_string()),
        };
        assert!(matches!(
            section.validate(),
            Err(TsplitError::Configuration(_))
        ));
    }
}
