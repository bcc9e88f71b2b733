//! Render-side mirror of the voxel store.
//!
//! A renderer needs one drawable per voxel and a way to find it again when
//! the voxel goes away. [`RenderMirror`] keeps that mapping, fed purely by
//! [`VoxelEvent`]s, so the simulation never touches rendering types. A real
//! backend would create its mesh instance where a [`Drawable`] is inserted
//! here and destroy it on removal.

use std::collections::HashMap;

use glam::DVec3;
use slotmap::{SlotMap, new_key_type};

use crate::world::events::{VoxelEvent, VoxelListener};
use crate::world::position::BlockPos;

new_key_type! {
    /// Stable handle for a drawable owned by the mirror.
    pub struct DrawableId;
}

/// What a renderer needs to draw one voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub pos: BlockPos,
    /// World-space centre of the unit cube.
    pub center: DVec3,
}

#[derive(Default)]
pub struct RenderMirror {
    drawables: SlotMap<DrawableId, Drawable>,
    by_pos: HashMap<BlockPos, DrawableId>,
}

impl RenderMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_at(&self, pos: BlockPos) -> Option<DrawableId> {
        self.by_pos.get(&pos).copied()
    }

    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.get(id)
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Drawable)> {
        self.drawables.iter()
    }
}

impl VoxelListener for RenderMirror {
    fn on_voxel_event(&mut self, event: VoxelEvent) {
        match event {
            VoxelEvent::Added(pos) => {
                if self.by_pos.contains_key(&pos) {
                    return;
                }
                let id = self.drawables.insert(Drawable {
                    pos,
                    center: pos.center(),
                });
                self.by_pos.insert(pos, id);
            }
            VoxelEvent::Removed(pos) => {
                if let Some(id) = self.by_pos.remove(&pos) {
                    self.drawables.remove(id);
                }
            }
        }
    }
}
