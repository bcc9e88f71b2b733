//! Block-world simulation core.
//!
//! A sparse voxel store over the unbounded integer lattice, deterministic
//! terrain, per-axis swept collision for a first-person box, and
//! nearest-voxel raycasting for break/place. Rendering and input capture
//! live outside this crate: the store reports its changes through
//! [`world::events::VoxelListener`], and the host feeds held keys and view
//! angles into [`session::Session::tick`].

pub mod config;
pub mod interact;
pub mod physics;
pub mod render;
pub mod session;
pub mod world;
