use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file [{}] could not be read: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration is invalid: {0}")]
    Invalid(String)
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
