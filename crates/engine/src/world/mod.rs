pub mod events;
pub mod position;
pub mod terrain;

use std::collections::HashSet;

use events::{VoxelEvent, VoxelListener};
use position::BlockPos;
use rayon::prelude::*;
use terrain::{HeightField, Region};

/// Read-only solidity query. The collision resolver and the raycaster only
/// ever need this.
pub trait Occupancy {
    fn is_solid(&self, pos: BlockPos) -> bool;
}

impl Occupancy for HashSet<BlockPos> {
    fn is_solid(&self, pos: BlockPos) -> bool {
        self.contains(&pos)
    }
}

/// The entire block world: a sparse presence set over the unbounded integer
/// lattice.
///
/// Lookups hash the coordinate triple directly, so the world has no size
/// limit and no chunk bookkeeping. Every effective change is reported to the
/// attached listener `L` before the mutating call returns.
pub struct World<L = ()> {
    voxels: HashSet<BlockPos>,
    listener: L,
}

impl World<()> {
    pub fn new() -> Self {
        Self::with_listener(())
    }
}

impl<L: VoxelListener> World<L> {
    pub fn with_listener(listener: L) -> Self {
        Self {
            voxels: HashSet::new(),
            listener,
        }
    }

    /// Is there a voxel at this position?
    #[inline]
    pub fn has(&self, pos: BlockPos) -> bool {
        self.voxels.contains(&pos)
    }

    /// Insert a voxel. Returns `true` (and notifies the listener) only if the
    /// position was empty.
    pub fn add(&mut self, pos: BlockPos) -> bool {
        let inserted = self.voxels.insert(pos);
        if inserted {
            self.listener.on_voxel_event(VoxelEvent::Added(pos));
        }
        inserted
    }

    /// Remove a voxel. Returns `true` (and notifies the listener) only if one
    /// was present.
    pub fn remove(&mut self, pos: BlockPos) -> bool {
        let removed = self.voxels.remove(&pos);
        if removed {
            self.listener.on_voxel_event(VoxelEvent::Removed(pos));
        }
        removed
    }

    /// Fill every column of `region` from y = 0 up to (excluding)
    /// `max(1, field.height(x, z))`. Returns the number of voxels newly added.
    ///
    /// Column heights are evaluated in parallel; insertion (and therefore
    /// listener notification) happens on the calling thread in x-major,
    /// then z, then ascending y order.
    pub fn generate_region(&mut self, region: Region, field: &impl HeightField) -> usize {
        let columns: Vec<(i64, i64)> = region.columns().collect();
        let tops: Vec<(i64, i64, i64)> = columns
            .into_par_iter()
            .map(|(x, z)| (x, z, terrain::column_top(field, x, z)))
            .collect();

        let mut added = 0;
        for (x, z, top) in tops {
            for y in 0..top {
                if self.add(BlockPos::new(x, y, z)) {
                    added += 1;
                }
            }
        }

        tracing::debug!(
            "Generated {} columns ({} voxels added, {} total)",
            region.column_count(),
            added,
            self.voxels.len()
        );
        added
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Iterate over every present voxel, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.voxels.iter().copied()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}

impl<L> Occupancy for World<L> {
    #[inline]
    fn is_solid(&self, pos: BlockPos) -> bool {
        self.voxels.contains(&pos)
    }
}

impl Default for World<()> {
    fn default() -> Self {
        Self::new()
    }
}
