//! Loading simulation tuning from disk.

use std::path::Path;

use anyhow::{Context, Result};
use blockworld_engine::config::SimConfig;

/// Read a JSON config. Fields the file leaves out keep their defaults.
pub fn load(path: &Path) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse(&text).with_context(|| format!("parsing config {}", path.display()))
}

pub fn parse(text: &str) -> Result<SimConfig> {
    let config: SimConfig = serde_json::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Reject tunings under which the collision sweep can step over a floor or a
/// wall within one tick, or the player box degenerates.
pub fn validate(config: &SimConfig) -> Result<()> {
    let dims = &config.player;
    anyhow::ensure!(
        dims.half_width > 0.0 && dims.half_depth > 0.0 && dims.height > 0.0,
        "player box must have positive extent"
    );
    anyhow::ensure!(config.max_dt > 0.0, "max_dt must be positive");
    anyhow::ensure!(
        config.epsilon > 0.0 && config.epsilon < 1e-2,
        "epsilon must be small and positive (got {})",
        config.epsilon
    );
    let max_drop = config.movement.terminal_velocity * config.max_dt;
    anyhow::ensure!(
        max_drop < dims.height + 1.0,
        "terminal_velocity * max_dt = {} lets a falling player skip a voxel",
        max_drop
    );
    let movement = &config.movement;
    let max_stride = movement.walk_speed * movement.sprint_multiplier.max(1.0) * config.max_dt;
    anyhow::ensure!(
        max_stride < 1.0 + 2.0 * dims.half_width.min(dims.half_depth),
        "top speed * max_dt = {} lets a moving player skip a wall",
        max_stride
    );
    anyhow::ensure!(config.reach > 0.0, "reach must be positive");
    Ok(())
}
