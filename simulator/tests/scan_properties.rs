//! End-to-end properties of the scan pipeline on a synthetic sample

use approx::assert_relative_eq;
use galvo_sim::hardware::camera::models::DEFAULT_CAMERA;
use galvo_sim::hardware::RecordingActuator;
use galvo_sim::{
    CalibrationModel, ExecutionMode, GalvoConfig, Magnification, OpticalSystem, ScanConfig,
    ScanEngine,
};
use test_helpers::coordinate_image;

fn engine(objective: Magnification, config: ScanConfig) -> ScanEngine {
    let calibration = CalibrationModel::for_objective(&DEFAULT_CAMERA, objective).unwrap();
    let shape = DEFAULT_CAMERA.shape();
    let optics = OpticalSystem::new(calibration, coordinate_image(shape.width, shape.height)).unwrap();
    ScanEngine::new(optics, config, GalvoConfig::default()).unwrap()
}

#[test]
fn test_planner_boundary_cases() {
    let engine = engine(Magnification::X50, ScanConfig::default());
    assert!(engine.plan(100_000).is_err());
    assert!(engine.plan(100).is_ok());

    let max = engine.max_points();
    assert!(engine.plan(max).is_ok());
}

#[test]
fn test_every_objective_scans_full_shape() {
    for objective in Magnification::ALL {
        let mut engine = engine(objective, ScanConfig::default());
        let data = engine.scan(40).expect("40 points is within resolution");
        assert_eq!(data.dim(), (40, 40, 3));
    }
}

#[test]
fn test_readback_stays_inside_image() {
    let mut engine = engine(Magnification::X100, ScanConfig::default());
    let data = engine.scan(30).unwrap();
    let shape = DEFAULT_CAMERA.shape();
    for cell in data.lanes(ndarray::Axis(2)) {
        assert!(cell[0] >= 0.0 && cell[0] < shape.width as f64);
        assert!(cell[1] >= 0.0 && cell[1] < shape.height as f64);
    }
}

#[test]
fn test_lower_power_covers_fewer_pixels() {
    // The same 10 µm spans 5x more image pixels at 100x than at 20x
    let mut low = engine(Magnification::X20, ScanConfig::default());
    let mut high = engine(Magnification::X100, ScanConfig::default());
    let a = low.scan(2).unwrap();
    let b = high.scan(2).unwrap();

    let span_low = a[[0, 1, 0]] - a[[0, 0, 0]];
    let span_high = b[[0, 1, 0]] - b[[0, 0, 0]];
    assert_relative_eq!(span_high / span_low, 5.0, epsilon = 0.1);
}

#[test]
fn test_saturated_raster_pins_to_rails() {
    // At 500 V/deg every off-center position asks for far more than 10 V
    let config = ScanConfig {
        scaling_factor_v_per_deg: 500.0,
        ..ScanConfig::default()
    };
    let mut engine = engine(Magnification::X50, config).with_actuator(RecordingActuator::new());
    engine.scan(3).unwrap();

    let commands = engine.actuator().commands();
    assert_eq!(commands.len(), 9);
    for &(xv, yv) in commands {
        assert!(xv.abs() <= 10.0 && yv.abs() <= 10.0);
    }
    assert_eq!(commands[0], (-10.0, -10.0));
    assert_eq!(commands[4], (0.0, 0.0));
    assert_eq!(commands[8], (10.0, 10.0));
}

#[test]
fn test_modes_and_repeats_are_bit_identical() {
    let config = ScanConfig::with_sample_distances(1000.0, 987.5);
    let mut sequential = engine(Magnification::X50, config);
    let mut parallel = engine(Magnification::X50, config).with_mode(ExecutionMode::Parallel);

    let reference = sequential.scan(120).unwrap();
    assert_eq!(reference, sequential.scan(120).unwrap());
    assert_eq!(reference, parallel.scan(120).unwrap());
}

#[test]
fn test_shorter_scan_length_lowers_capacity() {
    let mut engine = engine(Magnification::X50, ScanConfig::default());
    let full = engine.max_points();
    engine.set_scan_length(2.5).unwrap();
    let quarter = engine.max_points();
    assert!(quarter < full);
    assert!(engine.scan(full).is_none());
    assert!(engine.scan(quarter).is_some());
}
