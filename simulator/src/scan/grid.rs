//! Raster positions visited during one scan

/// One sample position of the raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPoint {
    /// Row index (y position)
    pub row: usize,
    /// Column index (x position)
    pub col: usize,
    /// Offset from scan center along x, microns
    pub x_um: f64,
    /// Offset from scan center along y, microns
    pub y_um: f64,
}

/// Square raster of `n x n` positions evenly covering `[-L/2, +L/2]` on both axes.
///
/// Built fresh for every scan and never stored between scans.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanGrid {
    axis_um: Vec<f64>,
}

/// `n` evenly spaced values from `start` to `stop`, both endpoints included
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|k| if k == n - 1 { stop } else { start + k as f64 * step })
                .collect()
        }
    }
}

impl ScanGrid {
    pub fn new(scan_length_um: f64, num_points: usize) -> Self {
        let half = scan_length_um / 2.0;
        Self {
            axis_um: linspace(-half, half, num_points),
        }
    }

    /// Points per axis
    pub fn num_points(&self) -> usize {
        self.axis_um.len()
    }

    /// Coordinates shared by both axes, ascending
    pub fn axis_um(&self) -> &[f64] {
        &self.axis_um
    }

    /// Position of cell `(row, col)`
    pub fn point(&self, row: usize, col: usize) -> ScanPoint {
        ScanPoint {
            row,
            col,
            x_um: self.axis_um[col],
            y_um: self.axis_um[row],
        }
    }

    /// All positions in raster order: row by row, x varying fastest
    pub fn points(&self) -> impl Iterator<Item = ScanPoint> + '_ {
        let n = self.num_points();
        (0..n).flat_map(move |row| (0..n).map(move |col| self.point(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints_are_exact() {
        let grid = ScanGrid::new(10.0, 7);
        assert_eq!(grid.axis_um().first(), Some(&-5.0));
        assert_eq!(grid.axis_um().last(), Some(&5.0));
        assert_relative_eq!(grid.axis_um()[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_even_spacing() {
        let grid = ScanGrid::new(3.0, 31);
        for pair in grid.axis_um().windows(2) {
            assert_relative_eq!(pair[1] - pair[0], 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_raster_order() {
        let grid = ScanGrid::new(2.0, 3);
        let points: Vec<_> = grid.points().collect();
        assert_eq!(points.len(), 9);
        assert_eq!((points[0].row, points[0].col), (0, 0));
        assert_eq!((points[1].row, points[1].col), (0, 1));
        assert_eq!((points[3].row, points[3].col), (1, 0));
        assert_eq!(points[5].x_um, 1.0);
        assert_eq!(points[5].y_um, 0.0);
        assert_eq!(points[8].y_um, 1.0);
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(ScanGrid::new(10.0, 0).points().count(), 0);
        assert_eq!(ScanGrid::new(10.0, 1).axis_um(), &[-5.0]);
    }
}
