//! Headless host for the block-world engine: config loading and scripted
//! explore-and-build runs.

pub mod config;
pub mod script;

/// Fixed frame rate used when `--fps` is not given.
pub const DEFAULT_FPS: f64 = 60.0;
