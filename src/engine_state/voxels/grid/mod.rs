//! # Voxel Grid Module
//!
//! This module provides the `VoxelGrid` struct, the dense block storage owned by a chunk.
//!
//! ## Memory Layout
//!
//! Blocks are stored in one contiguous vector, x fastest, then y, then z:
//!
//! `index = i + size * j + size * height * k`
//!
//! This is the same order the mesher walks the grid in, so meshing reads memory
//! sequentially. Alongside the block vector the grid keeps `occluders`, a bit vector
//! (1 bit per cell) that mirrors `BlockKind::is_occluding` for every cell, which keeps
//! the six neighbor tests per block down to a bit lookup each.
//!
//! ## Boundary Queries
//!
//! Queries never index out of bounds. Coordinates outside the grid resolve to
//! `BlockKind::Void`, or to whatever a [`NeighborLookup`] policy reports for them.

use bitvec::prelude::BitVec;
use cgmath::Point3;

use super::block::BlockKind;

pub mod grid_iteration;
mod neighbor;

pub use grid_iteration::GridBlockIterator;
pub use neighbor::{NeighborLookup, VoidNeighbors};

/// A fixed-size `size × height × size` block of voxels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Extent along x and z.
    size: usize,
    /// Extent along y.
    height: usize,
    /// One entry per cell, in layout order.
    blocks: Vec<BlockKind>,
    /// One bit per cell, set when the cell's block occludes its neighbors.
    occluders: BitVec,
}

impl VoxelGrid {
    /// Creates a grid where every cell is `BlockKind::Empty`.
    ///
    /// # Arguments
    /// * `size` - The extent along the x and z axes
    /// * `height` - The extent along the y axis
    pub fn new(size: usize, height: usize) -> Self {
        let volume = size * size * height;
        VoxelGrid {
            size,
            height,
            blocks: vec![BlockKind::Empty; volume],
            occluders: BitVec::repeat(false, volume),
        }
    }

    /// The extent along x and z.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The extent along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of cells in the grid.
    pub fn volume(&self) -> usize {
        self.blocks.len()
    }

    /// Whether `(i, j, k)` addresses a cell of this grid.
    pub fn contains(&self, i: i32, j: i32, k: i32) -> bool {
        self.index(i, j, k).is_some()
    }

    /// Maps local coordinates to an offset into the block vector.
    ///
    /// # Returns
    /// `None` whenever any coordinate falls outside the grid.
    #[inline]
    fn index(&self, i: i32, j: i32, k: i32) -> Option<usize> {
        let i = usize::try_from(i).ok().filter(|&i| i < self.size)?;
        let j = usize::try_from(j).ok().filter(|&j| j < self.height)?;
        let k = usize::try_from(k).ok().filter(|&k| k < self.size)?;
        Some(i + self.size * j + self.size * self.height * k)
    }

    /// Gets the block at the specified local coordinates.
    ///
    /// # Returns
    /// The block kind, or `BlockKind::Void` if the coordinates are out of range.
    pub fn get(&self, i: i32, j: i32, k: i32) -> BlockKind {
        self.get_with(&VoidNeighbors, i, j, k)
    }

    /// Gets the block at the specified local coordinates, deferring to `neighbors`
    /// for anything outside the grid.
    pub fn get_with<L: NeighborLookup>(&self, neighbors: &L, i: i32, j: i32, k: i32) -> BlockKind {
        match self.index(i, j, k) {
            Some(index) => self.blocks[index],
            None => neighbors.block_outside(i, j, k),
        }
    }

    /// Checks whether the cell at `(i, j, k)` hides the faces adjacent to it.
    ///
    /// In-range cells are answered from the occlusion bit vector; out-of-range cells
    /// are resolved through `neighbors`.
    #[inline]
    pub fn is_occluding_at<L: NeighborLookup>(&self, neighbors: &L, i: i32, j: i32, k: i32) -> bool {
        match self.index(i, j, k) {
            Some(index) => self.occluders[index],
            None => neighbors.block_outside(i, j, k).is_occluding(),
        }
    }

    /// Sets the block at the specified local coordinates, keeping the occlusion bits in sync.
    ///
    /// # Returns
    /// `false` (and no change) if the coordinates are out of range.
    pub fn set(&mut self, i: i32, j: i32, k: i32, kind: BlockKind) -> bool {
        match self.index(i, j, k) {
            Some(index) => {
                self.blocks[index] = kind;
                self.occluders.set(index, kind.is_occluding());
                true
            }
            None => false,
        }
    }

    /// Resets every cell to `kind`.
    pub fn fill(&mut self, kind: BlockKind) {
        self.blocks.fill(kind);
        self.occluders.fill(kind.is_occluding());
    }

    /// Counts the cells holding `kind`.
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|&&block| block == kind).count()
    }

    /// Converts an offset into the block vector back to local coordinates.
    fn position_of(&self, index: usize) -> Point3<usize> {
        let plane = self.size * self.height;
        Point3::new(index % self.size, (index % plane) / self.size, index / plane)
    }

    /// Iterates over every non-air cell in layout order.
    pub fn iter(&self) -> GridBlockIterator<'_> {
        GridBlockIterator::new(self)
    }
}
