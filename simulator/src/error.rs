use shared::image_proc::ImageIoError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration faults detected while building a scan session.
///
/// These are fatal: a session with an invalid configuration is never built.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Objective power with no calibration image.
    #[error("unsupported magnification: {0}x")]
    UnsupportedMagnification(u32),

    /// A quantity that must be strictly positive was not.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Requested scan square larger than the configured maximum.
    #[error("scan length {requested} µm exceeds the maximum of {max} µm")]
    ScanLengthExceedsMax {
        /// Requested edge length.
        requested: f64,
        /// Configured maximum.
        max: f64,
    },

    /// Actuator voltage range with `min >= max`.
    #[error("invalid voltage range [{min}, {max}]")]
    VoltageRange {
        /// Lower rail.
        min: f64,
        /// Upper rail.
        max: f64,
    },

    /// Calibration image that is not a non-empty `(height, width, 3)` array.
    #[error("calibration image must have shape (height, width, 3), got {0:?}")]
    ImageShape(Vec<usize>),

    /// Calibration image could not be read.
    #[error("failed to load calibration image {path}: {source}")]
    ImageLoad {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: ImageIoError,
    },

    /// Session description file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Session description file is not valid JSON for the expected schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fail with [`ConfigError::NonPositive`] unless `value > 0`.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
