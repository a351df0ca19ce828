//! Objective lenses and their calibration images

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Available objective magnifications.
///
/// Each power has a pre-captured calibration image of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Magnification {
    /// 20x objective
    #[value(name = "20")]
    X20,
    /// 50x objective
    #[value(name = "50")]
    X50,
    /// 100x objective
    #[value(name = "100")]
    X100,
}

impl Magnification {
    /// All supported objectives, lowest power first
    pub const ALL: [Magnification; 3] = [Magnification::X20, Magnification::X50, Magnification::X100];

    /// Objective power
    pub fn power(&self) -> u32 {
        match self {
            Magnification::X20 => 20,
            Magnification::X50 => 50,
            Magnification::X100 => 100,
        }
    }

    /// File name of the calibration image captured with this objective
    pub fn calibration_file_name(&self) -> &'static str {
        match self {
            Magnification::X20 => "image_array.png",
            Magnification::X50 => "image_array2.5.png",
            Magnification::X100 => "image_array5.png",
        }
    }

    /// Path of the calibration image inside `dir`
    pub fn calibration_path(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(self.calibration_file_name())
    }
}

impl TryFrom<u32> for Magnification {
    type Error = ConfigError;

    fn try_from(power: u32) -> Result<Self, Self::Error> {
        Magnification::ALL
            .into_iter()
            .find(|m| m.power() == power)
            .ok_or(ConfigError::UnsupportedMagnification(power))
    }
}

impl fmt::Display for Magnification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.power())
    }
}
