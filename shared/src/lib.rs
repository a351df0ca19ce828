//! Shared components and utilities for the galvo scanning simulator.
//!
//! This crate contains image dimension types, RGB image I/O and parallel
//! array helpers that are used by the simulator and its test tooling.

pub mod algo;
pub mod image_proc;
pub mod image_size;

pub use image_size::{PixelRegion, PixelShape};
