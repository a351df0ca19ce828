//! Optical side of the simulator: calibration geometry and the sampled image

pub mod calibration;
pub mod optical_system;

pub use calibration::CalibrationModel;
pub use optical_system::{OpticalSystem, SampledValue};
