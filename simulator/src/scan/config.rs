//! Scan geometry configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{require_positive, ConfigError};
use crate::hardware::GalvoConfig;

/// Default (and maximum) scan edge length in microns
pub const DEFAULT_SCAN_LENGTH_UM: f64 = 10.0;

/// Galvo voltage per degree of mirror deflection
pub const DEFAULT_SCALING_FACTOR_V_PER_DEG: f64 = 0.8;

/// Distance from the galvo mirror to the sample in microns
pub const DEFAULT_SAMPLE_DISTANCE_UM: f64 = 1000.0;

/// Geometry of the galvo-to-sample path and the requested scan square.
///
/// `nominal_sample_distance_um` is the distance the controller *assumes*
/// when turning lengths into voltages; `real_sample_distance_um` is the
/// distance the beam actually travels when voltages are turned back into a
/// position on the sample. Keeping them separate models a calibration error
/// between the two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Edge length of the square scan region in microns
    pub scan_length_um: f64,
    /// Largest scan length the session accepts
    pub max_scan_length_um: f64,
    /// Volts per degree of deflection
    pub scaling_factor_v_per_deg: f64,
    /// Assumed galvo-to-sample distance in microns
    pub nominal_sample_distance_um: f64,
    /// Actual galvo-to-sample distance in microns
    pub real_sample_distance_um: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_length_um: DEFAULT_SCAN_LENGTH_UM,
            max_scan_length_um: DEFAULT_SCAN_LENGTH_UM,
            scaling_factor_v_per_deg: DEFAULT_SCALING_FACTOR_V_PER_DEG,
            nominal_sample_distance_um: DEFAULT_SAMPLE_DISTANCE_UM,
            real_sample_distance_um: DEFAULT_SAMPLE_DISTANCE_UM,
        }
    }
}

impl ScanConfig {
    /// Default geometry with distinct nominal and real sample distances
    pub fn with_sample_distances(nominal_um: f64, real_um: f64) -> Self {
        Self {
            nominal_sample_distance_um: nominal_um,
            real_sample_distance_um: real_um,
            ..Self::default()
        }
    }

    /// Check every distance and the scaling factor are positive and the scan
    /// length does not exceed its maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("scan length", self.scan_length_um)?;
        require_positive("maximum scan length", self.max_scan_length_um)?;
        require_positive("scaling factor", self.scaling_factor_v_per_deg)?;
        require_positive("nominal sample distance", self.nominal_sample_distance_um)?;
        require_positive("real sample distance", self.real_sample_distance_um)?;
        if self.scan_length_um > self.max_scan_length_um {
            return Err(ConfigError::ScanLengthExceedsMax {
                requested: self.scan_length_um,
                max: self.max_scan_length_um,
            });
        }
        Ok(())
    }

    /// Scan length limited to `max_scan_length_um`
    pub fn clamped_scan_length(&self, requested_um: f64) -> f64 {
        requested_um.min(self.max_scan_length_um)
    }
}

/// Everything needed to configure a scan session, as stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub scan: ScanConfig,
    pub galvo: GalvoConfig,
}

impl SessionConfig {
    /// Read and validate a JSON session description
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SessionConfig = serde_json::from_str(&text)?;
        config.scan.validate()?;
        config.galvo.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scaling_factor_v_per_deg, 0.8);
        assert_eq!(config.nominal_sample_distance_um, config.real_sample_distance_um);
    }

    #[test]
    fn test_non_positive_distance_rejected() {
        let config = ScanConfig::with_sample_distances(1000.0, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "real sample distance",
                ..
            })
        ));
        assert!(ScanConfig::with_sample_distances(-1.0, 1000.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_scan_length_above_maximum_rejected() {
        let config = ScanConfig {
            scan_length_um: 12.0,
            ..ScanConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ScanLengthExceedsMax { .. })
        ));
        assert_eq!(config.clamped_scan_length(50.0), 10.0);
        assert_eq!(config.clamped_scan_length(4.0), 4.0);
    }

    #[test]
    fn test_load_session_with_partial_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"scan": {{"real_sample_distance_um": 1010.0}}, "galvo": {{"angular_resolution_deg": 0.001}}}}"#
        )
        .unwrap();

        let session = SessionConfig::load(file.path()).unwrap();
        assert_eq!(session.scan.real_sample_distance_um, 1010.0);
        assert_eq!(session.scan.nominal_sample_distance_um, 1000.0);
        assert_eq!(session.galvo.angular_resolution_deg, 0.001);
        assert_eq!(session.galvo.voltage_max, 10.0);
    }

    #[test]
    fn test_load_session_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"scan": {{"scaling_factor_v_per_deg": 0.0}}}}"#).unwrap();
        assert!(matches!(
            SessionConfig::load(file.path()),
            Err(ConfigError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_load_session_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            SessionConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
