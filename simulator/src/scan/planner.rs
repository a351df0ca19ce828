//! Scan feasibility against the galvo's angular resolution.
//!
//! A scan of edge length `L` at distance `d` sweeps the mirror over
//! `±atan(L / 2d)`. Spreading `n` points over that sweep gives an angular
//! step of `2 * max_angle / (n - 1)`, which must not fall below the smallest
//! step the galvo can execute. Rejection is an ordinary outcome, reported
//! with the largest point count that would have been accepted.

use std::fmt;
use thiserror::Error;

use super::ScanConfig;
use crate::hardware::GalvoConfig;

/// Accepted scan parameters with the derived step sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPlan {
    pub scan_length_um: f64,
    pub num_points: usize,
    /// Galvo angular resolution the plan was checked against
    pub resolution_deg: f64,
    /// Half-angle of the sweep (scan spans ±max_angle)
    pub max_angle_deg: f64,
    /// Mirror rotation between neighbouring points
    pub step_angle_deg: f64,
    /// Sample-plane distance between neighbouring points
    pub step_size_um: f64,
}

impl fmt::Display for ScanPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Galvo angular resolution: {:.6}°", self.resolution_deg)?;
        writeln!(f, "Maximum scan angle: ±{:.4}°", self.max_angle_deg)?;
        writeln!(f, "Angular step size: {:.6}°", self.step_angle_deg)?;
        writeln!(f, "Spatial step size: {:.4} µm", self.step_size_um)?;
        write!(f, "Number of points: {}", self.num_points)
    }
}

/// Why a scan request cannot be executed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanRejection {
    /// Fewer than two points leave no step to take.
    #[error("a scan needs at least 2 points per axis, got {num_points}")]
    TooFewPoints { num_points: usize },

    /// Points are packed tighter than the galvo can resolve.
    #[error(
        "requested angular step ({step_angle_deg:.6}°) is smaller than the galvo resolution \
         ({resolution_deg:.6}°); maximum number of points for this scan length: {max_points}"
    )]
    BelowResolution {
        step_angle_deg: f64,
        resolution_deg: f64,
        max_angle_deg: f64,
        max_points: usize,
    },
}

impl PlanRejection {
    /// Largest point count that fits the requested scan length, if known
    pub fn max_points(&self) -> Option<usize> {
        match self {
            PlanRejection::TooFewPoints { .. } => None,
            PlanRejection::BelowResolution { max_points, .. } => Some(*max_points),
        }
    }
}

/// Checks scan requests against the galvo's angular resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPlanner {
    nominal_sample_distance_um: f64,
    real_sample_distance_um: f64,
    resolution_deg: f64,
}

impl ScanPlanner {
    pub fn new(config: &ScanConfig, galvo: &GalvoConfig) -> Self {
        Self {
            nominal_sample_distance_um: config.nominal_sample_distance_um,
            real_sample_distance_um: config.real_sample_distance_um,
            resolution_deg: galvo.angular_resolution_deg,
        }
    }

    pub fn resolution_deg(&self) -> f64 {
        self.resolution_deg
    }

    fn half_sweep_deg(scan_length_um: f64, distance_um: f64) -> f64 {
        (scan_length_um / (2.0 * distance_um)).atan().to_degrees()
    }

    fn points_within(&self, max_angle_deg: f64) -> usize {
        (2.0 * max_angle_deg / self.resolution_deg).floor() as usize + 1
    }

    /// Accept or reject `num_points` per axis over a square of `scan_length_um`.
    ///
    /// Uses the nominal sample distance, i.e. the geometry the controller
    /// believes in when it generates the voltage raster.
    pub fn validate(&self, scan_length_um: f64, num_points: usize) -> Result<ScanPlan, PlanRejection> {
        if num_points < 2 {
            return Err(PlanRejection::TooFewPoints { num_points });
        }

        let max_angle_deg = Self::half_sweep_deg(scan_length_um, self.nominal_sample_distance_um);
        let steps = (num_points - 1) as f64;
        let step_angle_deg = 2.0 * max_angle_deg / steps;

        if step_angle_deg < self.resolution_deg {
            return Err(PlanRejection::BelowResolution {
                step_angle_deg,
                resolution_deg: self.resolution_deg,
                max_angle_deg,
                max_points: self.points_within(max_angle_deg),
            });
        }

        Ok(ScanPlan {
            scan_length_um,
            num_points,
            resolution_deg: self.resolution_deg,
            max_angle_deg,
            step_angle_deg,
            step_size_um: scan_length_um / steps,
        })
    }

    /// Shorthand for `validate(..).is_ok()`
    pub fn is_feasible(&self, scan_length_um: f64, num_points: usize) -> bool {
        self.validate(scan_length_um, num_points).is_ok()
    }

    /// Largest point count per axis for a scan of `scan_length_um`.
    ///
    /// Computed from the real sample distance, so it can differ from the
    /// limit `validate` enforces when the two distances disagree.
    pub fn max_points_for(&self, scan_length_um: f64) -> usize {
        let max_angle_deg = Self::half_sweep_deg(scan_length_um, self.real_sample_distance_um);
        self.points_within(max_angle_deg)
    }
}
