//! Array-processing helpers shared across crates.

pub mod parallel;

pub use parallel::{fill_cells, par_fill_cells};
