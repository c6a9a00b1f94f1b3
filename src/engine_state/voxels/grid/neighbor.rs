//! Boundary policies for grid queries that fall outside the chunk.

use crate::engine_state::voxels::block::BlockKind;

/// Answers queries for cells that lie outside a grid's bounds.
///
/// A single-chunk world has nothing beyond its edges and uses [`VoidNeighbors`].
/// A multi-chunk world would implement this to read from the adjacent chunk instead.
/// Coordinates are expressed in the local space of the grid being queried.
pub trait NeighborLookup {
    /// Returns the kind of the out-of-range cell at `(i, j, k)`.
    fn block_outside(&self, i: i32, j: i32, k: i32) -> BlockKind;
}

/// Treats everything outside the grid as [`BlockKind::Void`].
///
/// Since void never occludes, faces on the chunk boundary are always emitted.
#[derive(Copy, Clone, Debug, Default)]
pub struct VoidNeighbors;

impl NeighborLookup for VoidNeighbors {
    #[inline]
    fn block_outside(&self, _i: i32, _j: i32, _k: i32) -> BlockKind {
        BlockKind::Void
    }
}

impl<L: NeighborLookup + ?Sized> NeighborLookup for &L {
    #[inline]
    fn block_outside(&self, i: i32, j: i32, k: i32) -> BlockKind {
        (**self).block_outside(i, j, k)
    }
}
