use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Absolute voxel position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl BlockPos {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The cell containing a continuous point (half-open unit cubes).
    pub fn containing(point: DVec3) -> Self {
        Self::new(
            point.x.floor() as i64,
            point.y.floor() as i64,
            point.z.floor() as i64,
        )
    }

    /// The neighbor across `face`.
    pub const fn offset(&self, face: Face) -> BlockPos {
        let (dx, dy, dz) = face.normal();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Minimum corner of this cell in world space.
    pub fn min_corner(&self) -> DVec3 {
        DVec3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Center of this cell in world space.
    pub fn center(&self) -> DVec3 {
        self.min_corner() + DVec3::splat(0.5)
    }
}

/// One of the six faces of a voxel, identified by its outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    /// Integer outward normal.
    pub const fn normal(&self) -> (i64, i64, i64) {
        match self {
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// The face a ray enters through when travelling along `axis` with the
    /// given sign: moving +X enters through the -X face, and so on.
    pub const fn entered_along(axis: usize, positive: bool) -> Face {
        match (axis, positive) {
            (0, true) => Face::NegX,
            (0, false) => Face::PosX,
            (1, true) => Face::NegY,
            (1, false) => Face::PosY,
            (_, true) => Face::NegZ,
            (_, false) => Face::PosZ,
        }
    }
}
