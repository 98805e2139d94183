use super::{splitting::SplitSection, traits::ConfigSection, windows::WindowSection};
use crate::error::TsplitError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub split: SplitSection,
    #[serde(default)]
    pub windows: WindowSection,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), TsplitError> {
        self.split.validate().map_err(section_error::<SplitSection>)?;
        self.windows.validate().map_err(section_error::<WindowSection>)?;
        Ok(())
    }
}

fn section_error<S: ConfigSection>(err: TsplitError) -> TsplitError {
    match err {
        TsplitError::Configuration(msg) => {
            TsplitError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub const ENV_PREFIX: &'static str = "TSPLIT";

    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Loads a TOML or JSON file (by extension), with `TSPLIT__<SECTION>__<KEY>`
    /// environment variables taking precedence.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TsplitError> {
        let path = path.as_ref();
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(
                ::config::Environment::with_prefix(Self::ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::info!("Loaded configuration from {}", path.display());
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TsplitError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Applies `f` and keeps the result only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), TsplitError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}
