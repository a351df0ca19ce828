//! Camera sensor geometry used to calibrate captured microscope images

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use shared::PixelShape;

/// Physical description of the camera that captured the calibration images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Name/model of the camera
    pub name: String,
    /// Width of sensor in pixels
    pub width_px: u32,
    /// Height of sensor in pixels
    pub height_px: u32,
    /// Pixel pitch in microns
    pub pixel_size_um: f64,
}

impl CameraConfig {
    /// Create a new camera configuration
    pub fn new(name: impl Into<String>, width_px: u32, height_px: u32, pixel_size_um: f64) -> Self {
        Self {
            name: name.into(),
            width_px,
            height_px,
            pixel_size_um,
        }
    }

    /// Sensor dimensions in pixels
    pub fn shape(&self) -> PixelShape {
        PixelShape::new(self.width_px as usize, self.height_px as usize)
    }

    /// Get sensor dimensions in microns
    pub fn dimensions_um(&self) -> (f64, f64) {
        (
            self.width_px as f64 * self.pixel_size_um,
            self.height_px as f64 * self.pixel_size_um,
        )
    }
}

/// Standard camera models
pub mod models {
    use super::*;

    /// 1792x1024 sensor with 2.2 µm pixels used for the bundled calibration images
    pub static DEFAULT_CAMERA: Lazy<CameraConfig> =
        Lazy::new(|| CameraConfig::new("Microscope Camera", 1792, 1024, 2.2));
}
