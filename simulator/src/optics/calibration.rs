//! Real-world geometry of a calibration image.
//!
//! A calibration image is captured through an objective of known power onto
//! a camera of known pixel pitch, so every image pixel covers
//! `pixel_size / magnification` micrometers of sample:
//!
//! - `real_width  = sensor_width_px  * pixel_size_um / magnification`
//! - `real_height = sensor_height_px * pixel_size_um / magnification`
//!
//! The model is fixed at construction and never mutated.

use crate::error::{require_positive, ConfigError};
use crate::hardware::{CameraConfig, Magnification};

/// Immutable camera + objective geometry
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationModel {
    pixel_size_um: f64,
    sensor_width_px: u32,
    sensor_height_px: u32,
    magnification: f64,
    real_width_um: f64,
    real_height_um: f64,
}

impl CalibrationModel {
    /// Build a model for an arbitrary (positive) magnification.
    ///
    /// # Errors
    /// [`ConfigError::NonPositive`] when the magnification, pixel size or
    /// either sensor dimension is not strictly positive.
    pub fn new(camera: &CameraConfig, magnification: f64) -> Result<Self, ConfigError> {
        let magnification = require_positive("magnification", magnification)?;
        let pixel_size_um = require_positive("pixel size", camera.pixel_size_um)?;
        require_positive("sensor width", camera.width_px as f64)?;
        require_positive("sensor height", camera.height_px as f64)?;

        let (sensor_width_um, sensor_height_um) = camera.dimensions_um();
        Ok(Self {
            pixel_size_um,
            sensor_width_px: camera.width_px,
            sensor_height_px: camera.height_px,
            magnification,
            real_width_um: sensor_width_um / magnification,
            real_height_um: sensor_height_um / magnification,
        })
    }

    /// Build a model for one of the supported objectives
    pub fn for_objective(
        camera: &CameraConfig,
        objective: Magnification,
    ) -> Result<Self, ConfigError> {
        Self::new(camera, objective.power() as f64)
    }

    pub fn pixel_size_um(&self) -> f64 {
        self.pixel_size_um
    }

    /// Sensor size as (width, height) in pixels
    pub fn sensor_size(&self) -> (u32, u32) {
        (self.sensor_width_px, self.sensor_height_px)
    }

    pub fn magnification(&self) -> f64 {
        self.magnification
    }

    /// Width of the imaged sample area in microns
    pub fn real_width_um(&self) -> f64 {
        self.real_width_um
    }

    /// Height of the imaged sample area in microns
    pub fn real_height_um(&self) -> f64 {
        self.real_height_um
    }

    /// Center of the imaged area in sample coordinates (microns from the top-left corner)
    pub fn real_center_um(&self) -> (f64, f64) {
        (self.real_width_um / 2.0, self.real_height_um / 2.0)
    }

    /// Sample-plane size of one sensor pixel in microns
    pub fn um_per_pixel(&self) -> f64 {
        self.pixel_size_um / self.magnification
    }
}
