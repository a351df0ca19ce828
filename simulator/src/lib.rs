//! Galvanometer scanning microscope simulation
//!
//! Maps a requested scan square on the sample to a raster of galvo control
//! voltages, drives a (simulated) actuator with them, and reads back the
//! calibration image under the beam to emulate the photodetector.

pub mod error;
pub mod hardware;
pub mod optics;
pub mod scan;
pub mod shared_args;

// Re-exports for easier access
pub use error::ConfigError;
pub use hardware::{CameraConfig, GalvoActuator, GalvoConfig, Magnification};
pub use optics::{CalibrationModel, OpticalSystem};
pub use scan::{
    CoordinateTransform, ExecutionMode, PlanRejection, ScanConfig, ScanEngine, ScanPlan,
    ScanPlanner,
};
