//! One explore-and-build session: the world, the player, and the tuning that
//! drives them.
//!
//! The host calls [`Session::tick`] once per frame and the edit methods from
//! its input handlers. Everything runs on the caller's thread and every call
//! runs to completion.

use glam::DVec3;

use crate::config::SimConfig;
use crate::interact::edit;
use crate::interact::raycast::{Ray, RaycastHit};
use crate::physics::collision::{Collider, Contacts};
use crate::physics::locomotion::{self, InputState, Orientation, Player};
use crate::world::World;
use crate::world::events::VoxelListener;
use crate::world::position::BlockPos;
use crate::world::terrain::{self, HeightField, Region};

/// Height above the spawn column's surface at which the player appears.
const SPAWN_CLEARANCE: f64 = 3.0;

/// What a call to [`Session::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The player moved (or stood still) normally.
    Advanced(Contacts),
    /// Non-finite input or state; the player was left where they were.
    Discarded,
}

pub struct Session<L = ()> {
    world: World<L>,
    player: Player,
    config: SimConfig,
}

impl Session<()> {
    pub fn new(config: SimConfig) -> Self {
        Self::with_listener(config, ())
    }
}

impl<L: VoxelListener> Session<L> {
    /// Empty world, player at the origin. Call [`Session::generate`] and
    /// [`Session::spawn`] before the first tick.
    pub fn with_listener(config: SimConfig, listener: L) -> Self {
        Self {
            world: World::with_listener(listener),
            player: Player::new(DVec3::ZERO),
            config,
        }
    }

    /// Populate the configured region from the configured terrain.
    pub fn generate(&mut self) -> usize {
        let (region, hills) = (self.config.region, self.config.terrain);
        self.world.generate_region(region, &hills)
    }

    pub fn generate_region(&mut self, region: Region, field: &impl HeightField) -> usize {
        self.world.generate_region(region, field)
    }

    /// Place the player above the centre of column (0, 0) of `field`, at rest.
    /// The column height is clamped the same way generation clamps it.
    pub fn spawn(&mut self, field: &impl HeightField) {
        let ground = terrain::column_top(field, 0, 0) as f64;
        self.spawn_at(DVec3::new(0.5, ground + SPAWN_CLEARANCE, 0.5));
    }

    pub fn spawn_at(&mut self, feet: DVec3) {
        let orientation = self.player.orientation;
        self.player = Player::new(feet);
        self.player.orientation = orientation;
        tracing::debug!("Player spawned at {:?}", feet);
    }

    /// Advance the player one frame.
    ///
    /// `dt` is clamped to `[0, max_dt]`. A NaN or infinite `dt` or
    /// orientation, or a step that would produce a non-finite position,
    /// leaves the player exactly where they were.
    pub fn tick(&mut self, dt: f64, input: &InputState, orientation: Orientation) -> TickOutcome {
        if !dt.is_finite() || !orientation.is_finite() {
            tracing::warn!("Discarding tick: dt={} orientation={:?}", dt, orientation);
            return TickOutcome::Discarded;
        }
        if !self.player.is_finite() {
            tracing::warn!("Discarding tick: non-finite player state {}", self.player.summary());
            self.clear_non_finite_velocity();
            return TickOutcome::Discarded;
        }
        let dt = dt.clamp(0.0, self.config.max_dt);

        let before = self.player;
        self.player.orientation = orientation;
        let contacts = locomotion::step(&self.world, &mut self.player, input, &self.config, dt);

        if !self.player.is_finite() {
            tracing::warn!("Discarding tick: non-finite state from {}", before.summary());
            self.player = before;
            self.clear_non_finite_velocity();
            return TickOutcome::Discarded;
        }
        TickOutcome::Advanced(contacts)
    }

    fn clear_non_finite_velocity(&mut self) {
        if !self.player.velocity.is_finite() {
            self.player.velocity = DVec3::ZERO;
        }
    }

    /// The ray from the player's eye along the view direction, limited to
    /// the configured reach.
    pub fn view_ray(&self) -> Option<Ray> {
        Ray::new(
            self.player.eye(&self.config.player),
            self.player.orientation.look_direction(),
            self.config.reach,
        )
    }

    pub fn raycast_from_view(&self) -> Option<RaycastHit> {
        self.view_ray()?.cast(&self.world)
    }

    /// Break the voxel under the crosshair.
    pub fn break_block(&mut self) -> Option<BlockPos> {
        let ray = self.view_ray()?;
        edit::break_block(&mut self.world, &ray)
    }

    /// Place a voxel against the face under the crosshair, unless it would
    /// intersect the player.
    pub fn place_block(&mut self) -> Option<BlockPos> {
        let ray = self.view_ray()?;
        let blocker = self.player.aabb(&self.config.player);
        edit::place_block(&mut self.world, &ray, &blocker)
    }

    /// Does the player's box currently overlap any voxel?
    pub fn player_embedded(&self) -> bool {
        Collider::new(self.config.player, self.config.epsilon)
            .overlaps(&self.world, self.player.position)
    }

    pub fn has(&self, pos: BlockPos) -> bool {
        self.world.has(pos)
    }

    pub fn add(&mut self, pos: BlockPos) -> bool {
        self.world.add(pos)
    }

    pub fn remove(&mut self, pos: BlockPos) -> bool {
        self.world.remove(pos)
    }

    pub fn world(&self) -> &World<L> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World<L> {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn listener(&self) -> &L {
        self.world.listener()
    }

    pub fn listener_mut(&mut self) -> &mut L {
        self.world.listener_mut()
    }

    /// Surface height of the configured terrain under column (x, z), clamped
    /// the same way generation clamps it.
    pub fn terrain_top(&self, x: i64, z: i64) -> i64 {
        terrain::column_top(&self.config.terrain, x, z)
    }
}
