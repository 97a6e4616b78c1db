mod config_error;
mod config_manager;
mod config_source;
mod validate;

pub use config_error::ConfigError;
pub use config_manager::ConfigManager;
pub use config_source::{ConfigSource, FileConfigSource, MemoryConfigSource};
pub use validate::Validate;
