use glam::DVec3;

use crate::world::Occupancy;
use crate::world::position::BlockPos;

/// Axis-aligned box in continuous world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// The unit cube `[x, x+1) x [y, y+1) x [z, z+1)` of a voxel.
    pub fn voxel(pos: BlockPos) -> Self {
        let min = pos.min_corner();
        Self::new(min, min + DVec3::ONE)
    }

    /// Box standing on `feet`: centred in x/z, extending `height` upwards.
    pub fn from_feet(feet: DVec3, half_width: f64, half_depth: f64, height: f64) -> Self {
        Self::new(
            DVec3::new(feet.x - half_width, feet.y, feet.z - half_depth),
            DVec3::new(feet.x + half_width, feet.y + height, feet.z + half_depth),
        )
    }

    /// Strict interior overlap. Boxes that only share a face do not overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Inclusive range of voxel cells this box touches. The max corner is
    /// pulled in by `epsilon` so a box ending exactly on a cell boundary does
    /// not claim the next cell.
    pub fn cell_range(&self, epsilon: f64) -> CellRange {
        CellRange {
            min: BlockPos::containing(self.min),
            max: BlockPos::containing(self.max - DVec3::splat(epsilon)),
        }
    }
}

/// Inclusive block of voxel indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl CellRange {
    pub fn iter(&self) -> impl Iterator<Item = BlockPos> + '_ {
        (self.min.x..=self.max.x).flat_map(move |x| {
            (self.min.y..=self.max.y)
                .flat_map(move |y| (self.min.z..=self.max.z).map(move |z| BlockPos::new(x, y, z)))
        })
    }

    pub fn any_solid(&self, world: &impl Occupancy) -> bool {
        self.iter().any(|pos| world.is_solid(pos))
    }

    /// Present cells in this range.
    pub fn solid_cells<'a>(
        &'a self,
        world: &'a impl Occupancy,
    ) -> impl Iterator<Item = BlockPos> + 'a {
        self.iter().filter(move |pos| world.is_solid(*pos))
    }
}
