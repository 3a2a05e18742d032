use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Could not read transactions from [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Transaction page on line [{line}] is malformed: {source}")]
    MalformedPage {
        line: usize,
        #[source]
        source: serde_json::Error
    }
}

impl EngineError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
