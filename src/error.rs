//! Crate-wide error type.
//!
//! The metering overlay itself never fails; everything that touches files,
//! camera devices or user-entered calibration values reports through
//! [`MeterError`].

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MeterError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("no camera devices available")]
    NoCameras,

    #[error("unknown camera device '{0}'")]
    UnknownDevice(String),

    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    #[error("HOME environment variable is not set")]
    NoHomeDir,
}

impl MeterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeterError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MeterError>;
