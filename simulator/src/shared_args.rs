use clap::Args;
use std::path::PathBuf;

use crate::hardware::Magnification;
use crate::scan::{ExecutionMode, ScanConfig};

/// Parse sample distances in format "nominal,real" (microns)
fn parse_sample_distances(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err("Sample distances must be in format 'nominal,real'".to_string());
    }

    let nominal = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid nominal distance value".to_string())?;
    let real = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid real distance value".to_string())?;

    Ok((nominal, real))
}

/// Common scan-session arguments
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Objective magnification
    #[arg(short, long, value_enum, default_value_t = Magnification::X20)]
    pub magnification: Magnification,

    /// Scan edge length in microns (limited to the configured maximum)
    #[arg(short = 'l', long, default_value_t = 10.0)]
    pub scan_length: f64,

    /// Points per axis
    #[arg(short = 'n', long, default_value_t = 100)]
    pub num_points: usize,

    /// Directory holding the calibration images; a synthetic gradient is used when omitted
    #[arg(long)]
    pub calibration_dir: Option<PathBuf>,

    /// JSON session file with `scan` and `galvo` sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Galvo-to-sample distances in microns (format: "nominal,real"), overrides the config file
    #[arg(long, value_parser = parse_sample_distances)]
    pub sample_distances: Option<(f64, f64)>,

    /// Evaluate the readback on all cores
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
}

impl ScanArgs {
    pub fn execution_mode(&self) -> ExecutionMode {
        if self.parallel {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        }
    }

    /// Apply command-line overrides on top of `base`
    pub fn apply_to(&self, base: ScanConfig) -> ScanConfig {
        let mut config = base;
        if let Some((nominal, real)) = self.sample_distances {
            config.nominal_sample_distance_um = nominal;
            config.real_sample_distance_um = real;
        }
        config
    }
}
