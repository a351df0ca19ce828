//! Test helpers for the galvo scanning simulator
//!
//! Provides workspace-root discovery, a scratch directory for test artifacts
//! and synthetic calibration images with known per-pixel contents.

use ndarray::Array3;
use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

/// Error type for test helper operations
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),
}

/// Returns the path to the workspace root directory.
///
/// Walks up from the current directory until a Cargo.toml containing a
/// `[workspace]` table is found.
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let mut current_dir = env::current_dir().map_err(|e| {
        TestHelperError::ProjectRootNotFound(format!("Failed to get current directory: {}", e))
    })?;

    loop {
        let cargo_toml = current_dir.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml).map_err(|e| {
                TestHelperError::ProjectRootNotFound(format!("Failed to read Cargo.toml: {}", e))
            })?;

            if content.contains("[workspace]") {
                return Ok(current_dir);
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Err(TestHelperError::ProjectRootNotFound(
        "Workspace root not found".to_string(),
    ))
}

static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_project_root().expect("Failed to find project root directory"));

/// Returns `<workspace>/test_output`, creating it if needed.
pub fn get_output_dir() -> PathBuf {
    let output_dir = PROJECT_ROOT.join("test_output");

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    }

    output_dir
}

/// Returns a path within the test output directory.
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    get_output_dir().join(path)
}

/// Image whose samples encode their own coordinates: `[x, y, x + y]`.
///
/// Useful for asserting exactly which pixel a readback landed on.
pub fn coordinate_image(width: usize, height: usize) -> Array3<f64> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| match c {
        0 => x as f64,
        1 => y as f64,
        _ => (x + y) as f64,
    })
}

/// Smooth 8-bit RGB gradient: red ramps with x, green with y, blue is flat.
pub fn gradient_image(width: usize, height: usize) -> Array3<f64> {
    let x_scale = 255.0 / width.saturating_sub(1).max(1) as f64;
    let y_scale = 255.0 / height.saturating_sub(1).max(1) as f64;
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| match c {
        0 => (x as f64 * x_scale).round(),
        1 => (y as f64 * y_scale).round(),
        _ => 128.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root_exists() {
        let root = find_project_root().expect("Failed to find project root");
        assert!(root.join("Cargo.toml").exists());
    }

    #[test]
    fn test_output_path() {
        let path = output_path("scan.png");
        assert_eq!(path, get_output_dir().join("scan.png"));
        assert!(get_output_dir().is_dir());
    }

    #[test]
    fn test_coordinate_image_encodes_position() {
        let img = coordinate_image(8, 5);
        assert_eq!(img.dim(), (5, 8, 3));
        assert_eq!(img[[4, 7, 0]], 7.0);
        assert_eq!(img[[4, 7, 1]], 4.0);
        assert_eq!(img[[4, 7, 2]], 11.0);
    }

    #[test]
    fn test_gradient_spans_full_range() {
        let img = gradient_image(16, 9);
        assert_eq!(img[[0, 0, 0]], 0.0);
        assert_eq!(img[[0, 15, 0]], 255.0);
        assert_eq!(img[[8, 0, 1]], 255.0);
        assert!(img.iter().all(|&v| (0.0..=255.0).contains(&v)));
    }
}
