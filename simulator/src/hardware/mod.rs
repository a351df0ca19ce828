//! Hardware models: camera, objectives and the galvo mirror

pub mod camera;
pub mod galvo;
pub mod objective;

pub use camera::CameraConfig;
pub use galvo::{GalvoActuator, GalvoConfig, NullActuator, RecordingActuator};
pub use objective::Magnification;
