//! Break and place.
//!
//! Both are silent no-ops when the ray misses. Placement additionally refuses
//! any cell whose cube would intersect the `blocker` box (the player), so a
//! player can never bury themselves.

use super::raycast::Ray;
use crate::physics::aabb::Aabb;
use crate::world::World;
use crate::world::events::VoxelListener;
use crate::world::position::BlockPos;

/// Remove the voxel the ray hits. Returns its position if one was removed.
pub fn break_block<L: VoxelListener>(world: &mut World<L>, ray: &Ray) -> Option<BlockPos> {
    let hit = ray.cast(&*world)?;
    world.remove(hit.pos).then(|| {
        tracing::debug!("Broke voxel at {:?}", hit.pos);
        hit.pos
    })
}

/// Add a voxel against the face the ray hits. Returns the new voxel's
/// position, or `None` if nothing was hit, the cell would intersect
/// `blocker`, or the cell is already occupied.
pub fn place_block<L: VoxelListener>(
    world: &mut World<L>,
    ray: &Ray,
    blocker: &Aabb,
) -> Option<BlockPos> {
    let hit = ray.cast(&*world)?;
    let target = hit.adjacent();
    if Aabb::voxel(target).intersects(blocker) {
        tracing::debug!("Placement at {:?} rejected: overlaps player", target);
        return None;
    }
    world.add(target).then(|| {
        tracing::debug!("Placed voxel at {:?} against {:?}", target, hit.face);
        target
    })
}
