use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while reading or writing the CLI settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config file {} is malformed: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("config could not be encoded: {0}")]
    Encode(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| ConfigError::Io { path, source }
    }

    /// Path of the file involved, when the failure touched one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigError::Io { path, .. } | ConfigError::Malformed { path, .. } => Some(path),
            ConfigError::Encode(_) => None,
        }
    }
}
