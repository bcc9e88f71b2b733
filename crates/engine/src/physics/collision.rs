//! Discrete per-axis sweep against the voxel lattice.
//!
//! Each axis is moved on its own and the resulting box is tested against
//! every cell it touches. A blocked horizontal move is simply rejected; a
//! blocked vertical move snaps the box flush against the surface it hit.
//! Order is X, Z, then Y, so the ground snap sees the final horizontal
//! position.

use glam::DVec3;

use super::aabb::Aabb;
use crate::config::PlayerDims;
use crate::world::Occupancy;

/// Which surfaces stopped the body during one resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub x: bool,
    pub z: bool,
    /// Landed on something while falling. This is the tick's `on_ground`.
    pub floor: bool,
    pub ceiling: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.x || self.z || self.floor || self.ceiling
    }
}

/// Shape and tolerance used by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub dims: PlayerDims,
    pub epsilon: f64,
}

impl Collider {
    pub const fn new(dims: PlayerDims, epsilon: f64) -> Self {
        Self { dims, epsilon }
    }

    pub fn aabb_at(&self, feet: DVec3) -> Aabb {
        Aabb::from_feet(feet, self.dims.half_width, self.dims.half_depth, self.dims.height)
    }

    /// Does the box standing at `feet` overlap any present voxel?
    pub fn overlaps(&self, world: &impl Occupancy, feet: DVec3) -> bool {
        self.aabb_at(feet).cell_range(self.epsilon).any_solid(world)
    }
}

/// Integrate `velocity * dt` into `position` without entering any voxel.
///
/// Blocked axes have their velocity zeroed. An axis with zero velocity is not
/// tested at all, which means a body resting on the ground with
/// `velocity.y == 0` reports `floor == false` for that call.
pub fn resolve(
    world: &impl Occupancy,
    collider: &Collider,
    position: &mut DVec3,
    velocity: &mut DVec3,
    dt: f64,
) -> Contacts {
    let mut contacts = Contacts::default();

    for axis in [0, 2] {
        if velocity[axis] == 0.0 {
            continue;
        }
        let mut candidate = *position;
        candidate[axis] += velocity[axis] * dt;
        if collider.overlaps(world, candidate) {
            velocity[axis] = 0.0;
            if axis == 0 {
                contacts.x = true;
            } else {
                contacts.z = true;
            }
            tracing::trace!("blocked on axis {} at {:?}", axis, position);
        } else {
            *position = candidate;
        }
    }

    if velocity.y != 0.0 {
        let mut candidate = *position;
        candidate.y += velocity.y * dt;
        let cells = collider.aabb_at(candidate).cell_range(collider.epsilon);
        let hit = cells.solid_cells(world).map(|p| p.y);

        let snapped = if velocity.y < 0.0 {
            // Rest on the highest cell the box would have entered.
            hit.max().map(|top| {
                contacts.floor = true;
                (top + 1) as f64 + collider.epsilon
            })
        } else {
            // Hang below the lowest cell the head would have entered.
            hit.min().map(|bottom| {
                contacts.ceiling = true;
                bottom as f64 - collider.dims.height - collider.epsilon
            })
        };

        match snapped {
            Some(y) => {
                position.y = y;
                velocity.y = 0.0;
            }
            None => position.y = candidate.y,
        }
    }

    contacts
}
