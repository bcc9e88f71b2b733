//! Looking at and editing the world.

pub mod edit;
pub mod raycast;
