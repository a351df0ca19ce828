//! Galvo scanning microscope simulation tool.
//!
//! Plans a square raster scan for the chosen objective, drives the simulated
//! galvo over it and reports the sampled image statistics. Calibration
//! images are read from `--calibration-dir`; without one, a synthetic RGB
//! gradient at sensor resolution stands in for the sample.
//!
//! Usage:
//! ```
//! cargo run --release --bin galvo_scan -- -m 50 -l 10 -n 200
//! cargo run --release --bin galvo_scan -- -m 100 --calibration-dir ./cal --parallel
//! RUST_LOG=debug cargo run --bin galvo_scan -- --sample-distances 1000,1020
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use galvo_sim::hardware::camera::models::DEFAULT_CAMERA;
use galvo_sim::scan::{channel_stats, ScanEngine, SessionConfig};
use galvo_sim::shared_args::ScanArgs;
use galvo_sim::{CalibrationModel, OpticalSystem};
use ndarray::Array3;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "galvo_scan")]
#[command(about = "Simulate a galvo raster scan over a calibrated sample image")]
#[command(version)]
struct Args {
    #[command(flatten)]
    scan: ScanArgs,
}

/// RGB ramp covering the full sensor: red follows x, green follows y
fn synthetic_sample(width: usize, height: usize) -> Array3<f64> {
    let x_scale = 255.0 / width.saturating_sub(1).max(1) as f64;
    let y_scale = 255.0 / height.saturating_sub(1).max(1) as f64;
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| match c {
        0 => (x as f64 * x_scale).round(),
        1 => (y as f64 * y_scale).round(),
        _ => ((x + y) % 256) as f64,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let session = match &args.scan.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading session config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    let camera = &*DEFAULT_CAMERA;
    let magnification = args.scan.magnification;
    let optics = match &args.scan.calibration_dir {
        Some(dir) => OpticalSystem::load(camera, magnification, dir)
            .with_context(|| format!("loading {magnification} calibration from {}", dir.display()))?,
        None => {
            let calibration = CalibrationModel::for_objective(camera, magnification)?;
            let shape = camera.shape();
            OpticalSystem::new(calibration, synthetic_sample(shape.width, shape.height))?
        }
    };

    println!("Galvo Scanning Simulation");
    println!("=========================");
    println!("Camera: {} ({})", camera.name, camera.shape());
    println!("Objective: {}", magnification);
    println!(
        "Field of view: {:.2} x {:.2} µm",
        optics.calibration().real_width_um(),
        optics.calibration().real_height_um()
    );

    let scan_config = args.scan.apply_to(session.scan);
    let mut engine = ScanEngine::new(optics, scan_config, session.galvo)
        .context("invalid scan configuration")?
        .with_mode(args.scan.execution_mode());

    let scan_length = engine.set_scan_length(args.scan.scan_length)?;
    println!(
        "Scan length: {:.3} µm (maximum {:.3} µm)",
        scan_length,
        engine.config().max_scan_length_um
    );
    println!(
        "Maximum number of points for this scan length: {}",
        engine.max_points()
    );
    println!("Scan region in image pixels: {}", engine.scan_region_pixels());
    println!();

    let num_points = args.scan.num_points;
    let plan = match engine.plan(num_points) {
        Ok(plan) => plan,
        Err(rejection) => {
            anyhow::bail!("scan rejected: {rejection}");
        }
    };
    println!("{plan}");
    println!();

    println!("Scanning...");
    let start = Instant::now();
    let data = engine.execute(&plan);
    let elapsed = start.elapsed();

    let (rows, cols, channels) = data.dim();
    println!(
        "Collected {}x{}x{} samples in {:.3} s ({:?})",
        rows,
        cols,
        channels,
        elapsed.as_secs_f64(),
        engine.mode()
    );
    for (name, stats) in ["R", "G", "B"].iter().zip(channel_stats(&data)) {
        println!("  {name}: {stats}");
    }

    Ok(())
}
