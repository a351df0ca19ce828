//! Scan pipeline: configuration, coordinate transforms, planning and execution

pub mod config;
pub mod engine;
pub mod grid;
pub mod planner;
pub mod stats;
pub mod transform;

pub use config::{ScanConfig, SessionConfig};
pub use engine::{ExecutionMode, ScanEngine};
pub use grid::{ScanGrid, ScanPoint};
pub use planner::{PlanRejection, ScanPlan, ScanPlanner};
pub use stats::{channel_stats, ChannelStats};
pub use transform::CoordinateTransform;
