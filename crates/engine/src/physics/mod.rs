//! Player movement: velocity shaping and collision against the voxel lattice.

pub mod aabb;
pub mod collision;
pub mod locomotion;
