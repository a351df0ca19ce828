//! Cell-wise fill helpers for `(rows, cols, channels)` arrays
//!
//! Both variants hand every `(row, col)` cell's channel lane to a closure.
//! The parallel version distributes rows across the rayon pool; since each
//! cell is written exactly once from its own indices, the result does not
//! depend on the order in which cells are visited.

use ndarray::{Array3, ArrayViewMut1, Axis};
use rayon::prelude::*;

/// Fill every cell sequentially in row-major order (column index fastest).
///
/// # Arguments
/// * `array` - Output array laid out as `[row, col, channel]`
/// * `filler` - Closure receiving `(row, col, channel_lane)`
pub fn fill_cells<F>(array: &mut Array3<f64>, mut filler: F)
where
    F: FnMut(usize, usize, ArrayViewMut1<f64>),
{
    for (row, mut lane) in array.axis_iter_mut(Axis(0)).enumerate() {
        for (col, cell) in lane.axis_iter_mut(Axis(0)).enumerate() {
            filler(row, col, cell);
        }
    }
}

/// Fill every cell in parallel, one rayon task per row.
///
/// The closure must only depend on its `(row, col)` arguments and shared
/// read-only state.
pub fn par_fill_cells<F>(array: &mut Array3<f64>, filler: F)
where
    F: Fn(usize, usize, ArrayViewMut1<f64>) + Send + Sync,
{
    array
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(row, mut lane)| {
            for (col, cell) in lane.axis_iter_mut(Axis(0)).enumerate() {
                filler(row, col, cell);
            }
        });
}
