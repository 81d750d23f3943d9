use std::path::PathBuf;

use thiserror::Error;

/// Invalid gallery configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{key} must be a finite, non-negative pixel width (got {value})")]
    InvalidWidth { key: &'static str, value: f32 },
    #[error("{0} must not be empty")]
    EmptyClass(&'static str),
}

/// Failure while building a container from a directory.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("not a directory: {0:?}")]
    NotADirectory(PathBuf),
    #[error("failed to walk {path:?}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
