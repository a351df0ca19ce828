//! Image dimensions and pixel-space regions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image dimensions structure
///
/// Represents the width and height of a calibration image or sensor frame.
/// Uses usize for direct compatibility with ndarray indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelShape {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
}

impl PixelShape {
    /// Create a new PixelShape
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Shape of an ndarray image laid out as `(height, width, ...)`
    pub fn from_dim(dim: &[usize]) -> Self {
        Self::new(
            dim.get(1).copied().unwrap_or(0),
            dim.first().copied().unwrap_or(0),
        )
    }

    /// Get total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Largest valid column index as a float
    pub fn max_x(&self) -> f64 {
        self.width.saturating_sub(1) as f64
    }

    /// Largest valid row index as a float
    pub fn max_y(&self) -> f64 {
        self.height.saturating_sub(1) as f64
    }

    /// Clamp a fractional pixel position into `[0, width-1] x [0, height-1]`
    pub fn clamp_f64(&self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(0.0, self.max_x()), y.clamp(0.0, self.max_y()))
    }

    /// Truncate a fractional pixel position to integer indices inside the image.
    ///
    /// Uses floor, never rounding, so a position belongs to the pixel whose
    /// top-left corner it lies past. NaN maps to index 0.
    pub fn floor_index(&self, x: f64, y: f64) -> (usize, usize) {
        let (x, y) = self.clamp_f64(x, y);
        let col = (x.floor() as usize).min(self.width.saturating_sub(1));
        let row = (y.floor() as usize).min(self.height.saturating_sub(1));
        (col, row)
    }

    /// Get center point as (x, y) float coordinates
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Check if a point is within bounds
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }
}

impl From<(usize, usize)> for PixelShape {
    fn from(dimensions: (usize, usize)) -> Self {
        Self::new(dimensions.0, dimensions.1)
    }
}

impl From<PixelShape> for (usize, usize) {
    fn from(size: PixelShape) -> Self {
        (size.width, size.height)
    }
}

impl fmt::Display for PixelShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned pixel rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelRegion {
    /// Exclusive right edge
    pub fn x_end(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn y_end(&self) -> usize {
        self.y + self.height
    }

    /// Intersect with the bounds of `shape`
    pub fn clipped_to(&self, shape: PixelShape) -> PixelRegion {
        let x = self.x.min(shape.width);
        let y = self.y.min(shape.height);
        PixelRegion {
            x,
            y,
            width: self.x_end().min(shape.width) - x,
            height: self.y_end().min(shape.height) - y,
        }
    }
}

impl fmt::Display for PixelRegion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}]",
            self.x,
            self.x_end(),
            self.y,
            self.y_end()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let size = PixelShape::new(1792, 1024);
        assert_eq!(size.width, 1792);
        assert_eq!(size.height, 1024);
        assert_eq!(size.pixel_count(), 1792 * 1024);
    }

    #[test]
    fn test_from_dim_uses_row_major_order() {
        let shape = PixelShape::from_dim(&[480, 640, 3]);
        assert_eq!(shape, PixelShape::new(640, 480));
        assert!(PixelShape::from_dim(&[]).is_empty());
    }

    #[test]
    fn test_clamp_f64() {
        let shape = PixelShape::new(100, 50);
        assert_eq!(shape.clamp_f64(-3.0, 12.5), (0.0, 12.5));
        assert_eq!(shape.clamp_f64(150.0, 50.0), (99.0, 49.0));
    }

    #[test]
    fn test_floor_index_truncates() {
        let shape = PixelShape::new(100, 50);
        assert_eq!(shape.floor_index(10.99, 3.5), (10, 3));
        assert_eq!(shape.floor_index(-0.5, 1e9), (0, 49));
        assert_eq!(shape.floor_index(f64::NAN, f64::INFINITY), (0, 49));
    }

    #[test]
    fn test_center() {
        let size = PixelShape::new(100, 200);
        assert_eq!(size.center(), (50.0, 100.0));
    }

    #[test]
    fn test_contains() {
        let size = PixelShape::new(100, 100);
        assert!(size.contains(0, 0));
        assert!(size.contains(99, 99));
        assert!(!size.contains(100, 0));
        assert!(!size.contains(0, 100));
    }

    #[test]
    fn test_display() {
        let size = PixelShape::new(2560, 2560);
        assert_eq!(format!("{}", size), "2560x2560");
    }

    #[test]
    fn test_region_clipping() {
        let region = PixelRegion {
            x: 90,
            y: 40,
            width: 20,
            height: 20,
        };
        let clipped = region.clipped_to(PixelShape::new(100, 50));
        assert_eq!(clipped.x_end(), 100);
        assert_eq!(clipped.y_end(), 50);
        assert_eq!(clipped.width, 10);
        assert_eq!(clipped.height, 10);
        assert_eq!(format!("{}", clipped), "[90..100, 40..50]");
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = PixelShape::new(1920, 1080);
        let json = serde_json::to_string(&original).unwrap();
        let recovered: PixelShape = serde_json::from_str(&json).unwrap();
        assert_eq!(original, recovered);
    }
}
