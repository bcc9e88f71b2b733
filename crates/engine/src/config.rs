//! Simulation tuning.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes.

use serde::{Deserialize, Serialize};

use crate::world::terrain::{Region, RollingHills};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub player: PlayerDims,
    pub movement: MovementConfig,
    pub look: LookConfig,
    /// Maximum raycast distance for break/place, in world units.
    pub reach: f64,
    /// Upper bound on a single physics step, in seconds.
    pub max_dt: f64,
    /// Shrink applied to box extents before flooring, and the gap left
    /// between a snapped box and the surface it rests against.
    pub epsilon: f64,
    pub terrain: RollingHills,
    pub region: Region,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player: PlayerDims::default(),
            movement: MovementConfig::default(),
            look: LookConfig::default(),
            reach: 8.0,
            max_dt: 0.05,
            epsilon: 1e-6,
            terrain: RollingHills::default(),
            region: Region::default(),
        }
    }
}

/// Collision proxy: a box centred on the feet position in x/z, extending
/// `height` upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDims {
    pub half_width: f64,
    pub half_depth: f64,
    pub height: f64,
    /// Eye height as a fraction of `height`.
    pub eye_height_factor: f64,
}

impl PlayerDims {
    pub fn eye_height(&self) -> f64 {
        self.height * self.eye_height_factor
    }
}

impl Default for PlayerDims {
    fn default() -> Self {
        Self {
            half_width: 0.3,
            half_depth: 0.3,
            height: 1.8,
            eye_height_factor: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub walk_speed: f64,
    pub sprint_multiplier: f64,
    /// Exponential smoothing rate toward the target horizontal velocity (1/s).
    pub acceleration: f64,
    pub gravity: f64,
    pub jump_speed: f64,
    /// Cap on vertical speed. Keep `terminal_velocity * max_dt` below
    /// `height + 1` or a fast fall can step over a one-block floor.
    pub terminal_velocity: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            sprint_multiplier: 1.7,
            acceleration: 30.0,
            gravity: 24.0,
            jump_speed: 9.0,
            terminal_velocity: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians per pointer unit.
    pub sensitivity: f64,
    pub pitch_limit: f64,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.0023,
            pitch_limit: std::f64::consts::FRAC_PI_2 - 0.01,
        }
    }
}
