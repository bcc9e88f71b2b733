//! Nearest-voxel ray queries.
//!
//! [`Ray::cast`] marches cell by cell through the lattice (Amanatides-Woo
//! DDA), so its cost depends on the distance travelled rather than on how
//! many voxels exist. [`raycast_brute_force`] tests every voxel's box and
//! returns the same answer; it exists to check the marcher.
//!
//! A voxel that contains the ray origin is never reported: only faces the
//! ray enters from outside count as hits.

use glam::DVec3;

use crate::physics::aabb::Aabb;
use crate::world::Occupancy;
use crate::world::position::{BlockPos, Face};

/// A distance-limited ray. `direction` is stored normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
    pub max_distance: f64,
}

/// The closest voxel a ray entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub pos: BlockPos,
    /// Face the ray entered through; its normal points back toward the ray.
    pub face: Face,
    /// Distance from the origin to the entry point.
    pub distance: f64,
}

impl RaycastHit {
    pub fn normal(&self) -> (i64, i64, i64) {
        self.face.normal()
    }

    /// The empty cell in front of the hit face, where a placed voxel goes.
    pub fn adjacent(&self) -> BlockPos {
        self.pos.offset(self.face)
    }
}

impl Ray {
    /// Returns `None` for a zero or non-finite direction, or a non-finite
    /// origin or distance. Such a ray can never hit anything.
    pub fn new(origin: DVec3, direction: DVec3, max_distance: f64) -> Option<Self> {
        let direction = direction.normalize_or_zero();
        if direction == DVec3::ZERO
            || !origin.is_finite()
            || !max_distance.is_finite()
            || max_distance < 0.0
        {
            return None;
        }
        Some(Self {
            origin,
            direction,
            max_distance,
        })
    }

    /// Nearest present voxel along the ray within `max_distance`.
    pub fn cast(&self, world: &impl Occupancy) -> Option<RaycastHit> {
        let origin = self.origin.to_array();
        let dir = self.direction.to_array();
        let start = BlockPos::containing(self.origin);
        let mut cell = [start.x, start.y, start.z];

        let mut step = [0i64; 3];
        let mut t_max = [f64::INFINITY; 3];
        let mut t_delta = [f64::INFINITY; 3];
        for axis in 0..3 {
            let d = dir[axis];
            if d > 0.0 {
                step[axis] = 1;
                t_max[axis] = ((cell[axis] + 1) as f64 - origin[axis]) / d;
                t_delta[axis] = 1.0 / d;
            } else if d < 0.0 {
                step[axis] = -1;
                t_max[axis] = (origin[axis] - cell[axis] as f64) / -d;
                t_delta[axis] = -1.0 / d;
            }
        }

        loop {
            let axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
                0
            } else if t_max[1] <= t_max[2] {
                1
            } else {
                2
            };
            let t = t_max[axis];
            if t > self.max_distance {
                return None;
            }
            cell[axis] += step[axis];
            t_max[axis] += t_delta[axis];

            let pos = BlockPos::new(cell[0], cell[1], cell[2]);
            if world.is_solid(pos) {
                return Some(RaycastHit {
                    pos,
                    face: Face::entered_along(axis, step[axis] > 0),
                    distance: t,
                });
            }
        }
    }

    /// Where the ray enters `aabb`, if it does so from outside within range.
    pub fn entry(&self, aabb: &Aabb) -> Option<(f64, Face)> {
        let origin = self.origin.to_array();
        let dir = self.direction.to_array();
        let min = aabb.min.to_array();
        let max = aabb.max.to_array();

        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        let mut near_axis = 0;
        for axis in 0..3 {
            if dir[axis] == 0.0 {
                if origin[axis] < min[axis] || origin[axis] > max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (min[axis] - origin[axis]) / dir[axis];
            let t2 = (max[axis] - origin[axis]) / dir[axis];
            let (lo, hi) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            if lo > t_near {
                t_near = lo;
                near_axis = axis;
            }
            t_far = t_far.min(hi);
        }

        if t_near > t_far || t_near < 0.0 || t_near > self.max_distance {
            return None;
        }
        Some((t_near, Face::entered_along(near_axis, dir[near_axis] > 0.0)))
    }
}

/// Test the ray against every voxel's box and keep the closest entry.
/// O(voxel count) per query.
pub fn raycast_brute_force(
    ray: &Ray,
    voxels: impl IntoIterator<Item = BlockPos>,
) -> Option<RaycastHit> {
    voxels
        .into_iter()
        .filter_map(|pos| {
            ray.entry(&Aabb::voxel(pos)).map(|(distance, face)| RaycastHit {
                pos,
                face,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
