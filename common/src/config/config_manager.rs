use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigSource, FileConfigSource, Validate};

/// Loads, validates and caches a YAML config of type `TConfig`.
pub struct ConfigManager<TSource, TConfig>
where
    TSource: ConfigSource,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    source: TSource,
    cached: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileConfigSource, TConfig>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileConfigSource::new(path))
    }
}

impl<TSource, TConfig> ConfigManager<TSource, TConfig>
where
    TSource: ConfigSource,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn new(source: TSource) -> Self {
        Self {
            source,
            cached: Mutex::new(None),
        }
    }

    /// Falls back to `TConfig::default()` when the source holds nothing.
    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.source.read()? else {
            return Ok(TConfig::default());
        };

        let config: TConfig = serde_yaml_ng::from_str(&content)?;
        config.validate().map_err(ConfigError::Invalid)?;

        *cached = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let content = serde_yaml_ng::to_string(config)?;
        self.source.write(&content)?;

        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        Ok(())
    }
}
