//! RGB image I/O for calibration data.
//!
//! Converts between 8-bit RGB image files (PNG, TIFF, ...) and ndarray
//! `Array3<f64>` buffers laid out as `[row, col, channel]`.
//!
//! # Coordinate System Conversions
//!
//! - **ndarray**: matrix indexing `[row, col, channel]` = `[y, x, c]`
//! - **image crate**: graphics indexing `(x, y)` with `(width, height)` dimensions

use image::{ImageBuffer, Rgb, RgbImage};
use ndarray::Array3;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading or writing RGB calibration images
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("image decode/encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("expected an RGB array of shape (height, width, 3), got {0:?}")]
    Shape(Vec<usize>),
}

/// Load an image file as a `(height, width, 3)` array of samples in `0.0..=255.0`.
///
/// Any color type the `image` crate can decode is accepted; alpha and extra
/// channels are dropped and grayscale is expanded to three equal channels.
pub fn load_rgb_array<P: AsRef<Path>>(path: P) -> Result<Array3<f64>, ImageIoError> {
    let rgb = image::open(path.as_ref())?.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::debug!(
        "Loaded {}x{} RGB image from {}",
        width,
        height,
        path.as_ref().display()
    );

    Ok(Array3::from_shape_fn(
        (height as usize, width as usize, 3),
        |(y, x, c)| rgb.get_pixel(x as u32, y as u32)[c] as f64,
    ))
}

/// Convert a `(height, width, 3)` array to an 8-bit RGB image.
///
/// Values are rounded and saturated to `0..=255`.
pub fn rgb_array_to_image(array: &Array3<f64>) -> Result<RgbImage, ImageIoError> {
    let (height, width, channels) = array.dim();
    if channels != 3 {
        return Err(ImageIoError::Shape(array.shape().to_vec()));
    }

    let to_u8 = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    let img = ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgb([
            to_u8(array[[y, x, 0]]),
            to_u8(array[[y, x, 1]]),
            to_u8(array[[y, x, 2]]),
        ])
    });

    Ok(img)
}

/// Save a `(height, width, 3)` array as an 8-bit RGB image file.
///
/// File format is determined from the extension of `path`.
pub fn save_rgb_array<P: AsRef<Path>>(array: &Array3<f64>, path: P) -> Result<(), ImageIoError> {
    rgb_array_to_image(array)?.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    fn test_pattern(height: usize, width: usize) -> Array3<f64> {
        Array3::from_shape_fn((height, width, 3), |(y, x, c)| match c {
            0 => (x * 10) as f64,
            1 => (y * 20) as f64,
            _ => 200.0,
        })
    }

    #[test]
    fn test_png_preserves_orientation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pattern.png");
        let original = test_pattern(4, 7);

        save_rgb_array(&original, &path).unwrap();
        let loaded = load_rgb_array(&path).unwrap();

        assert_eq!(loaded.dim(), (4, 7, 3));
        assert_abs_diff_eq!(loaded[[0, 6, 0]], 60.0);
        assert_abs_diff_eq!(loaded[[3, 0, 1]], 60.0);
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_values_saturate_when_encoding() {
        let mut array = Array3::zeros((1, 2, 3));
        array[[0, 0, 0]] = -12.0;
        array[[0, 1, 0]] = 300.0;
        array[[0, 1, 1]] = 127.6;

        let img = rgb_array_to_image(&array).unwrap();
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(1, 0)[0], 255);
        assert_eq!(img.get_pixel(1, 0)[1], 128);
    }

    #[test]
    fn test_rejects_non_rgb_arrays() {
        let array = Array3::<f64>::zeros((2, 2, 4));
        match rgb_array_to_image(&array) {
            Err(ImageIoError::Shape(shape)) => assert_eq!(shape, vec![2, 2, 4]),
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_rgb_array(dir.path().join("nope.png")).is_err());
    }
}
