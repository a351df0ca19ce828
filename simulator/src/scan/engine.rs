//! Galvo raster scan execution.
//!
//! A scan runs in two phases:
//!
//! 1. **Planning**: the [`ScanPlanner`] checks the requested point count
//!    against the galvo's angular resolution. A rejected plan aborts the scan
//!    before anything is written and `scan` returns `None`.
//! 2. **Execution**: every raster position is turned into a voltage pair,
//!    written to the actuator, and read back by following the voltages
//!    through the inverse transform to a calibration-image pixel.
//!
//! Readback goes voltage → length → pixel rather than reusing the requested
//! position, so any mismatch between nominal and real sample distance shows
//! up in the sampled image exactly as it would on the bench.

use ndarray::{aview1, Array3};
use shared::algo::{fill_cells, par_fill_cells};
use shared::PixelRegion;

use super::{CoordinateTransform, PlanRejection, ScanConfig, ScanGrid, ScanPlan, ScanPlanner};
use crate::error::{require_positive, ConfigError};
use crate::hardware::{GalvoActuator, GalvoConfig, NullActuator};
use crate::optics::{OpticalSystem, SampledValue};

/// Number of channels in each sampled value
pub const CHANNELS: usize = 3;

/// How the readback of the raster is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Write then read each cell in raster order
    #[default]
    Sequential,
    /// Write the whole raster in order, then read back all cells on the rayon pool
    Parallel,
}

/// Drives a simulated galvo over a calibration image
#[derive(Debug)]
pub struct ScanEngine<A: GalvoActuator = NullActuator> {
    optics: OpticalSystem,
    config: ScanConfig,
    galvo: GalvoConfig,
    actuator: A,
    mode: ExecutionMode,
}

impl ScanEngine<NullActuator> {
    /// Build an engine with a no-op actuator.
    ///
    /// # Errors
    /// Any [`ConfigError`] from validating `config` or `galvo`.
    pub fn new(
        optics: OpticalSystem,
        config: ScanConfig,
        galvo: GalvoConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        galvo.validate()?;
        Ok(Self {
            optics,
            config,
            galvo,
            actuator: NullActuator,
            mode: ExecutionMode::default(),
        })
    }
}

impl<A: GalvoActuator> ScanEngine<A> {
    /// Swap in a different actuator
    pub fn with_actuator<B: GalvoActuator>(self, actuator: B) -> ScanEngine<B> {
        ScanEngine {
            optics: self.optics,
            config: self.config,
            galvo: self.galvo,
            actuator,
            mode: self.mode,
        }
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn optics(&self) -> &OpticalSystem {
        &self.optics
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn galvo(&self) -> &GalvoConfig {
        &self.galvo
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    pub fn into_actuator(self) -> A {
        self.actuator
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Set the scan edge length, limited to the configured maximum.
    ///
    /// Returns the length actually applied.
    pub fn set_scan_length(&mut self, scan_length_um: f64) -> Result<f64, ConfigError> {
        let applied = self
            .config
            .clamped_scan_length(require_positive("scan length", scan_length_um)?);
        if applied < scan_length_um {
            log::warn!(
                "Scan length {:.3} µm exceeds maximum, using {:.3} µm",
                scan_length_um,
                applied
            );
        }
        self.config.scan_length_um = applied;
        Ok(applied)
    }

    /// Coordinate conversions for the current configuration
    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(&self.config, &self.galvo, &self.optics)
    }

    /// Feasibility checker for the current configuration
    pub fn planner(&self) -> ScanPlanner {
        ScanPlanner::new(&self.config, &self.galvo)
    }

    /// Largest point count per axis for the current scan length
    pub fn max_points(&self) -> usize {
        self.planner().max_points_for(self.config.scan_length_um)
    }

    /// Planning phase: validate `num_points` for the current scan length
    pub fn plan(&self, num_points: usize) -> Result<ScanPlan, PlanRejection> {
        self.planner().validate(self.config.scan_length_um, num_points)
    }

    /// Calibration-image pixels covered by the current scan square
    pub fn scan_region_pixels(&self) -> PixelRegion {
        self.optics.center_region_pixels(self.config.scan_length_um)
    }

    /// Run a full scan of `num_points x num_points` positions.
    ///
    /// Returns a `(num_points, num_points, 3)` grid indexed `[row, col, channel]`,
    /// or `None` when the planner rejects the request. Rejections are logged
    /// with their diagnostics rather than raised.
    pub fn scan(&mut self, num_points: usize) -> Option<Array3<f64>> {
        match self.plan(num_points) {
            Ok(plan) => {
                log::info!("Scan plan accepted:\n{}", plan);
                Some(self.execute(&plan))
            }
            Err(rejection) => {
                log::warn!("Scan aborted: {}", rejection);
                None
            }
        }
    }

    /// Execution phase for an already accepted plan
    pub fn execute(&mut self, plan: &ScanPlan) -> Array3<f64> {
        let n = plan.num_points;
        let grid = ScanGrid::new(plan.scan_length_um, n);
        let transform = self.transform();
        let optics = &self.optics;
        let actuator = &mut self.actuator;
        let mut data = Array3::zeros((n, n, CHANNELS));

        log::debug!(
            "Executing {:?} scan of {}x{} points over {:.3} µm",
            self.mode,
            n,
            n,
            plan.scan_length_um
        );

        match self.mode {
            ExecutionMode::Sequential => {
                fill_cells(&mut data, |row, col, mut cell| {
                    let point = grid.point(row, col);
                    let (x_v, y_v) = transform.length_to_voltage(point.x_um, point.y_um);
                    actuator.write(x_v, y_v);
                    cell.assign(&aview1(&read_back(&transform, optics, x_v, y_v)));
                });
            }
            ExecutionMode::Parallel => {
                for point in grid.points() {
                    let (x_v, y_v) = transform.length_to_voltage(point.x_um, point.y_um);
                    actuator.write(x_v, y_v);
                }
                par_fill_cells(&mut data, |row, col, mut cell| {
                    let point = grid.point(row, col);
                    let (x_v, y_v) = transform.length_to_voltage(point.x_um, point.y_um);
                    cell.assign(&aview1(&read_back(&transform, optics, x_v, y_v)));
                });
            }
        }

        data
    }
}

/// Simulated photodetector: the image value under the beam for a voltage pair
fn read_back(
    transform: &CoordinateTransform,
    optics: &OpticalSystem,
    x_volts: f64,
    y_volts: f64,
) -> SampledValue {
    let (col, row) = transform.voltage_to_pixel_index(x_volts, y_volts);
    optics.sample(col, row)
}
