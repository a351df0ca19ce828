//! Galvanometer mirror model
//!
//! The galvo is steered by an analog voltage pair, one per axis. This module
//! holds its fixed electrical/mechanical limits and the actuator capability
//! the scan engine drives.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, ConfigError};

/// Smallest angular step the galvo can reliably execute, in degrees (~15 µrad).
pub const DEFAULT_ANGULAR_RESOLUTION_DEG: f64 = 0.0008;

/// Rated control-voltage rail of the galvo driver, in volts.
pub const DEFAULT_VOLTAGE_LIMIT: f64 = 10.0;

/// Fixed limits of the galvo hardware
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalvoConfig {
    /// Angular resolution in degrees
    pub angular_resolution_deg: f64,
    /// Lowest commandable voltage
    pub voltage_min: f64,
    /// Highest commandable voltage
    pub voltage_max: f64,
}

impl Default for GalvoConfig {
    fn default() -> Self {
        Self {
            angular_resolution_deg: DEFAULT_ANGULAR_RESOLUTION_DEG,
            voltage_min: -DEFAULT_VOLTAGE_LIMIT,
            voltage_max: DEFAULT_VOLTAGE_LIMIT,
        }
    }
}

impl GalvoConfig {
    /// Default rails with a custom angular resolution
    pub fn with_resolution(angular_resolution_deg: f64) -> Self {
        Self {
            angular_resolution_deg,
            ..Self::default()
        }
    }

    /// Check resolution is positive and the voltage range is non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("angular resolution", self.angular_resolution_deg)?;
        if !(self.voltage_min < self.voltage_max) {
            return Err(ConfigError::VoltageRange {
                min: self.voltage_min,
                max: self.voltage_max,
            });
        }
        Ok(())
    }

    /// Saturate a voltage to the driver rails
    pub fn clamp_voltage(&self, volts: f64) -> f64 {
        volts.clamp(self.voltage_min, self.voltage_max)
    }
}

/// Something that accepts galvo voltage commands.
///
/// Writing has no return value; the simulated optical readback is derived
/// from the commanded voltages, not from actuator state.
pub trait GalvoActuator {
    /// Command both axes to the given voltages
    fn write(&mut self, x_volts: f64, y_volts: f64);
}

/// Actuator that ignores every command
#[derive(Debug, Clone, Copy, Default)]
pub struct NullActuator;

impl GalvoActuator for NullActuator {
    fn write(&mut self, _x_volts: f64, _y_volts: f64) {}
}

/// Actuator that keeps every command it receives, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    commands: Vec<(f64, f64)>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far as `(x_volts, y_volts)`
    pub fn commands(&self) -> &[(f64, f64)] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl GalvoActuator for RecordingActuator {
    fn write(&mut self, x_volts: f64, y_volts: f64) {
        self.commands.push((x_volts, y_volts));
    }
}

impl<A: GalvoActuator + ?Sized> GalvoActuator for &mut A {
    fn write(&mut self, x_volts: f64, y_volts: f64) {
        (**self).write(x_volts, y_volts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let galvo = GalvoConfig::default();
        assert_eq!(galvo.angular_resolution_deg, 0.0008);
        assert_eq!(galvo.clamp_voltage(12.0), 10.0);
        assert_eq!(galvo.clamp_voltage(-42.0), -10.0);
        assert_eq!(galvo.clamp_voltage(3.5), 3.5);
        assert!(galvo.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        assert!(GalvoConfig::with_resolution(0.0).validate().is_err());
        let inverted = GalvoConfig {
            voltage_min: 5.0,
            voltage_max: -5.0,
            ..GalvoConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::VoltageRange { .. })
        ));
    }

    #[test]
    fn test_recording_actuator_keeps_order() {
        fn drive<A: GalvoActuator>(mut actuator: A) {
            actuator.write(-1.0, 0.5);
        }

        let mut actuator = RecordingActuator::new();
        actuator.write(1.0, 2.0);
        drive(&mut actuator);
        assert_eq!(actuator.commands(), &[(1.0, 2.0), (-1.0, 0.5)]);
        actuator.clear();
        assert!(actuator.commands().is_empty());
    }
}
