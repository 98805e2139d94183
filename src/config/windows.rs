use super::traits::ConfigSection;
use crate::engines::evaluation::{InsufficientDataPolicy, WindowParams};
use crate::error::TsplitError;
use serde::{Deserialize, Serialize};

/// `[windows]` section: parameters for test-window generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub prediction_length: usize,
    pub windows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<usize>,
    pub policy: InsufficientDataPolicy,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            prediction_length: 24,
            windows: 1,
            distance: None,
            max_history: None,
            policy: InsufficientDataPolicy::Drop,
        }
    }
}

impl WindowSection {
    pub fn to_params(&self) -> WindowParams {
        let mut params = WindowParams::new(self.prediction_length)
            .windows(self.windows)
            .policy(self.policy);
        if let Some(distance) = self.distance {
            params = params.distance(distance);
        }
        if let Some(max_history) = self.max_history {
            params = params.max_history(max_history);
        }
        params
    }
}

impl ConfigSection for WindowSection {
    fn section_name() -> &'static str {
        "windows"
    }

    fn validate(&self) -> Result<(), TsplitError> {
        self.to_params().validate()
    }
}
