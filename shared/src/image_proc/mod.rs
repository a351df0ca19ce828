//! Image handling for calibration data.
//!
//! Calibration images are stored as 8-bit RGB files on disk and handled in
//! memory as `(height, width, 3)` arrays of `f64` samples.

pub mod io;

pub use io::{load_rgb_array, rgb_array_to_image, save_rgb_array, ImageIoError};
