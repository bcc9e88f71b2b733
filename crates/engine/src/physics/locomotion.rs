//! First-person locomotion: held keys and view orientation in, velocity out.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::{self, Collider, Contacts};
use crate::config::{LookConfig, MovementConfig, PlayerDims, SimConfig};
use crate::world::Occupancy;

/// Keys currently held. The host keeps this up to date from its own input
/// events; the simulation only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
}

/// View angles in radians. Yaw 0 looks down -Z; positive pitch looks up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Orientation {
    pub const fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Apply a relative pointer movement. Pitch is clamped so the view never
    /// flips over the vertical.
    pub fn apply_pointer_delta(&mut self, dx: f64, dy: f64, look: &LookConfig) {
        self.yaw -= dx * look.sensitivity;
        let limit = look.pitch_limit;
        self.pitch = (self.pitch - dy * look.sensitivity).clamp(-limit, limit);
    }

    /// Horizontal unit vector the player walks toward. Ignores pitch.
    pub fn forward(&self) -> DVec3 {
        DVec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal unit vector to the player's right.
    pub fn right(&self) -> DVec3 {
        DVec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Unit view direction including pitch.
    pub fn look_direction(&self) -> DVec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        DVec3::new(-sy * cp, sp, -cy * cp)
    }

    pub fn is_finite(&self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite()
    }
}

/// Mutable per-session player state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Feet position: bottom centre of the collision box.
    pub position: DVec3,
    pub velocity: DVec3,
    pub orientation: Orientation,
    /// Recomputed every tick by the vertical sweep.
    pub on_ground: bool,
}

impl Player {
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            orientation: Orientation::default(),
            on_ground: false,
        }
    }

    pub fn aabb(&self, dims: &PlayerDims) -> Aabb {
        Aabb::from_feet(self.position, dims.half_width, dims.half_depth, dims.height)
    }

    pub fn eye(&self, dims: &PlayerDims) -> DVec3 {
        self.position + DVec3::new(0.0, dims.eye_height(), 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.orientation.is_finite()
    }

    /// One-line debug readout.
    pub fn summary(&self) -> String {
        format!(
            "pos {:.2}, {:.2}, {:.2}  vel {:.2}, {:.2}, {:.2}{}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
            if self.on_ground { "  ground" } else { "" }
        )
    }
}

/// Normalized horizontal direction requested by the held movement keys, or
/// zero if they cancel out.
pub fn wish_direction(input: &InputState, orientation: &Orientation) -> DVec3 {
    let forward = orientation.forward();
    let right = orientation.right();
    let mut wish = DVec3::ZERO;
    if input.forward {
        wish += forward;
    }
    if input.backward {
        wish -= forward;
    }
    if input.left {
        wish -= right;
    }
    if input.right {
        wish += right;
    }
    wish.normalize_or_zero()
}

/// Shape the player's velocity for one step: smooth horizontal velocity
/// toward the wish velocity, integrate gravity, and start a jump if grounded.
pub fn apply_input(player: &mut Player, input: &InputState, movement: &MovementConfig, dt: f64) {
    let speed = if input.sprint {
        movement.walk_speed * movement.sprint_multiplier
    } else {
        movement.walk_speed
    };
    let target = wish_direction(input, &player.orientation) * speed;

    // Frame-rate independent approach: the same fraction of the gap closes
    // per unit time regardless of how dt is sliced.
    let blend = 1.0 - (-movement.acceleration * dt).exp();
    player.velocity.x += (target.x - player.velocity.x) * blend;
    player.velocity.z += (target.z - player.velocity.z) * blend;

    player.velocity.y -= movement.gravity * dt;
    player.velocity.y = player.velocity.y.max(-movement.terminal_velocity);

    if input.jump && player.on_ground {
        player.velocity.y = movement.jump_speed;
        player.on_ground = false;
    }
}

/// Advance the player one step: shape velocity from input, then move through
/// the world with collision.
pub fn step(
    world: &impl Occupancy,
    player: &mut Player,
    input: &InputState,
    config: &SimConfig,
    dt: f64,
) -> Contacts {
    apply_input(player, input, &config.movement, dt);
    let collider = Collider::new(config.player, config.epsilon);
    let contacts = collision::resolve(
        world,
        &collider,
        &mut player.position,
        &mut player.velocity,
        dt,
    );
    player.on_ground = contacts.floor;
    contacts
}
