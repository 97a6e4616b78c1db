use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use super::ConfigError;

/// Where raw config text comes from. `Ok(None)` means nothing has been stored yet.
pub trait ConfigSource {
    fn read(&self) -> Result<Option<String>, ConfigError>;
    fn write(&self, content: &str) -> Result<(), ConfigError>;
}

pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for FileConfigSource {
    fn read(&self) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, content: &str) -> Result<(), ConfigError> {
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryConfigSource {
    content: Mutex<Option<String>>,
}

impl MemoryConfigSource {
    pub fn new(content: Option<String>) -> Self {
        Self {
            content: Mutex::new(content),
        }
    }
}

impl ConfigSource for MemoryConfigSource {
    fn read(&self) -> Result<Option<String>, ConfigError> {
        Ok(self.content.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn write(&self, content: &str) -> Result<(), ConfigError> {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = Some(content.to_string());
        Ok(())
    }
}
