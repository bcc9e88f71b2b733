//! Voxel change notifications.
//!
//! The store never knows who mirrors its contents. Every effective change is
//! reported synchronously to a [`VoxelListener`] inside the same call that made
//! it; idempotent no-op writes report nothing.

use super::position::BlockPos;

/// A single effective change to the voxel store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoxelEvent {
    /// A voxel that was absent is now present.
    Added(BlockPos),
    /// A voxel that was present is now absent.
    Removed(BlockPos),
}

impl VoxelEvent {
    pub fn pos(&self) -> BlockPos {
        match self {
            VoxelEvent::Added(pos) | VoxelEvent::Removed(pos) => *pos,
        }
    }
}

/// Receiver of store notifications. Implementations must not block; they run
/// on the simulation thread in the middle of a tick.
pub trait VoxelListener {
    fn on_voxel_event(&mut self, event: VoxelEvent);
}

/// No listener attached.
impl VoxelListener for () {
    fn on_voxel_event(&mut self, _event: VoxelEvent) {}
}

/// Records every event in order. Useful for tests and for batching changes
/// to a consumer that wants them after the tick.
#[derive(Debug, Default, Clone)]
pub struct ChangeLog {
    events: Vec<VoxelEvent>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[VoxelEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drain and return all recorded events. After this returns, the log is
    /// empty.
    pub fn take(&mut self) -> Vec<VoxelEvent> {
        std::mem::take(&mut self.events)
    }
}

impl VoxelListener for ChangeLog {
    fn on_voxel_event(&mut self, event: VoxelEvent) {
        self.events.push(event);
    }
}

/// Fan out to two listeners, first `A` then `B`.
impl<A: VoxelListener, B: VoxelListener> VoxelListener for (A, B) {
    fn on_voxel_event(&mut self, event: VoxelEvent) {
        self.0.on_voxel_event(event);
        self.1.on_voxel_event(event);
    }
}
