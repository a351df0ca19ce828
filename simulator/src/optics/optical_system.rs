//! Calibrated sample image seen through a given objective.
//!
//! The optical system pairs the image array captured through an objective
//! with the [`CalibrationModel`] that gives it real-world extent. It is the
//! read-only sample the scan engine probes.

use ndarray::{s, Array3};
use shared::image_proc::load_rgb_array;
use shared::{PixelRegion, PixelShape};
use std::path::Path;

use super::CalibrationModel;
use crate::error::ConfigError;
use crate::hardware::{CameraConfig, Magnification};

/// A 3-channel reading at one image pixel
pub type SampledValue = [f64; 3];

/// Calibration image plus its real-world geometry
#[derive(Debug, Clone)]
pub struct OpticalSystem {
    calibration: CalibrationModel,
    image: Array3<f64>,
}

impl OpticalSystem {
    /// Wrap an in-memory `(height, width, 3)` image.
    ///
    /// # Errors
    /// [`ConfigError::ImageShape`] if the array is empty or does not have
    /// exactly three channels.
    pub fn new(calibration: CalibrationModel, image: Array3<f64>) -> Result<Self, ConfigError> {
        let (height, width, channels) = image.dim();
        if height == 0 || width == 0 || channels != 3 {
            return Err(ConfigError::ImageShape(image.shape().to_vec()));
        }
        Ok(Self { calibration, image })
    }

    /// Load the calibration image for `objective` from `dir`.
    pub fn load(
        camera: &CameraConfig,
        objective: Magnification,
        dir: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let calibration = CalibrationModel::for_objective(camera, objective)?;
        let path = objective.calibration_path(dir);
        let image = load_rgb_array(&path).map_err(|source| ConfigError::ImageLoad {
            path: path.clone(),
            source,
        })?;
        log::info!(
            "Loaded {} calibration image {} ({:.2} x {:.2} µm)",
            objective,
            path.display(),
            calibration.real_width_um(),
            calibration.real_height_um()
        );
        Self::new(calibration, image)
    }

    pub fn calibration(&self) -> &CalibrationModel {
        &self.calibration
    }

    /// Read-only view of the image array
    pub fn image(&self) -> &Array3<f64> {
        &self.image
    }

    /// Image dimensions in pixels
    pub fn image_shape(&self) -> PixelShape {
        PixelShape::from_dim(self.image.shape())
    }

    /// Real-world center of the image, see [`CalibrationModel::real_center_um`]
    pub fn real_center_um(&self) -> (f64, f64) {
        self.calibration.real_center_um()
    }

    /// Value at integer pixel `(x, y)`; indices are clamped to the image bounds.
    pub fn sample(&self, x: usize, y: usize) -> SampledValue {
        let shape = self.image_shape();
        let x = x.min(shape.width - 1);
        let y = y.min(shape.height - 1);
        let px = self.image.slice(s![y, x, ..]);
        [px[0], px[1], px[2]]
    }

    /// Pixel-space square of side `size_um` centered on the image, clipped to bounds.
    pub fn center_region_pixels(&self, size_um: f64) -> PixelRegion {
        let shape = self.image_shape();
        let px_per_um_x = shape.width as f64 / self.calibration.real_width_um();
        let px_per_um_y = shape.height as f64 / self.calibration.real_height_um();
        let (cx, cy) = self.real_center_um();

        let side = (size_um.max(0.0) * px_per_um_x) as usize;
        let x0 = (cx * px_per_um_x - side as f64 / 2.0).max(0.0) as usize;
        let y0 = (cy * px_per_um_y - side as f64 / 2.0).max(0.0) as usize;

        PixelRegion {
            x: x0,
            y: y0,
            width: side,
            height: side,
        }
        .clipped_to(shape)
    }
}
