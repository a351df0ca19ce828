//! Per-channel summary of a scan result

use ndarray::{Array3, Axis};
use std::fmt;

/// Min/max/mean of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl fmt::Display for ChannelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min {:.2}, max {:.2}, mean {:.2}",
            self.min, self.max, self.mean
        )
    }
}

/// Summarise every channel of a `(rows, cols, channels)` grid.
///
/// Returns one entry per channel; empty grids yield an empty vector.
pub fn channel_stats(grid: &Array3<f64>) -> Vec<ChannelStats> {
    if grid.len_of(Axis(0)) == 0 || grid.len_of(Axis(1)) == 0 {
        return Vec::new();
    }

    grid.axis_iter(Axis(2))
        .map(|channel| {
            let (min, max) = channel
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            ChannelStats {
                min,
                max,
                mean: channel.mean().unwrap_or(0.0),
            }
        })
        .collect()
}
