//! Conversions between sample length, galvo voltage and image pixels.
//!
//! Three coordinate spaces are involved in a scan:
//!
//! - **Sample space**: microns from the scan center on the sample plane
//! - **Voltage space**: galvo control voltages, one per axis
//! - **Pixel space**: column/row of the calibration image
//!
//! # Geometry
//!
//! A mirror deflected by `θ` moves the spot by `d * tan(θ)` on a sample at
//! distance `d`, and the galvo driver deflects by `V / k` degrees for a
//! control voltage `V` and scaling factor `k` (V/deg). Hence
//!
//! - length → voltage: `V = atan(x / d_nominal) * 180/π * k`, saturated to the rails
//! - voltage → length: `x = tan(V / k * π/180) * d_real`
//! - length → pixel:   `px = (cx + x) / real_width * image_width`, saturated to the image
//!
//! The forward direction uses the nominal (assumed) sample distance and the
//! inverse uses the real one, so a round trip is only an identity when the
//! two agree. Nothing here fails: out-of-range values saturate, as the
//! physical actuator and sensor do.

use shared::PixelShape;

use super::ScanConfig;
use crate::hardware::GalvoConfig;
use crate::optics::OpticalSystem;

/// Pure coordinate conversions for one scan session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    scaling_factor_v_per_deg: f64,
    nominal_sample_distance_um: f64,
    real_sample_distance_um: f64,
    voltage_min: f64,
    voltage_max: f64,
    real_width_um: f64,
    real_height_um: f64,
    real_center_um: (f64, f64),
    image_shape: PixelShape,
}

impl CoordinateTransform {
    /// Capture the constants of a session. Configs are assumed validated.
    pub fn new(config: &ScanConfig, galvo: &GalvoConfig, optics: &OpticalSystem) -> Self {
        let calibration = optics.calibration();
        Self {
            scaling_factor_v_per_deg: config.scaling_factor_v_per_deg,
            nominal_sample_distance_um: config.nominal_sample_distance_um,
            real_sample_distance_um: config.real_sample_distance_um,
            voltage_min: galvo.voltage_min,
            voltage_max: galvo.voltage_max,
            real_width_um: calibration.real_width_um(),
            real_height_um: calibration.real_height_um(),
            real_center_um: calibration.real_center_um(),
            image_shape: optics.image_shape(),
        }
    }

    /// Image the pixel conversions map into
    pub fn image_shape(&self) -> PixelShape {
        self.image_shape
    }

    fn axis_length_to_voltage(&self, length_um: f64) -> f64 {
        let angle_deg = (length_um / self.nominal_sample_distance_um).atan().to_degrees();
        (angle_deg * self.scaling_factor_v_per_deg).clamp(self.voltage_min, self.voltage_max)
    }

    fn axis_voltage_to_length(&self, volts: f64) -> f64 {
        let angle_deg = volts / self.scaling_factor_v_per_deg;
        angle_deg.to_radians().tan() * self.real_sample_distance_um
    }

    /// Sample-plane offsets (µm) to galvo voltages, each axis saturated to the rails
    pub fn length_to_voltage(&self, x_um: f64, y_um: f64) -> (f64, f64) {
        (
            self.axis_length_to_voltage(x_um),
            self.axis_length_to_voltage(y_um),
        )
    }

    /// Galvo voltages to sample-plane offsets (µm) using the real sample distance
    pub fn voltage_to_length(&self, x_volts: f64, y_volts: f64) -> (f64, f64) {
        (
            self.axis_voltage_to_length(x_volts),
            self.axis_voltage_to_length(y_volts),
        )
    }

    /// Sample-plane offsets (µm) to fractional pixel position, clamped to the image
    pub fn length_to_pixel(&self, x_um: f64, y_um: f64) -> (f64, f64) {
        let (cx, cy) = self.real_center_um;
        let px = (cx + x_um) / self.real_width_um * self.image_shape.width as f64;
        let py = (cy + y_um) / self.real_height_um * self.image_shape.height as f64;
        self.image_shape.clamp_f64(px, py)
    }

    /// Galvo voltages to the fractional pixel the beam lands on
    pub fn voltage_to_pixel(&self, x_volts: f64, y_volts: f64) -> (f64, f64) {
        let (x_um, y_um) = self.voltage_to_length(x_volts, y_volts);
        self.length_to_pixel(x_um, y_um)
    }

    /// Galvo voltages to integer `(col, row)` indices, truncated toward zero
    pub fn voltage_to_pixel_index(&self, x_volts: f64, y_volts: f64) -> (usize, usize) {
        let (px, py) = self.voltage_to_pixel(x_volts, y_volts);
        self.image_shape.floor_index(px, py)
    }
}
