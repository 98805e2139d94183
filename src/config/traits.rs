use crate::error::TsplitError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    /// Table name in the config file (`split`, `windows`); also prefixes
    /// validation messages.
    fn section_name() -> &'static str;

    /// Checks the section resolves to a usable split point or window set.
    fn validate(&self) -> Result<(), TsplitError>;
}
