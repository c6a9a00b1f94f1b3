//! # Grid Iteration Module
//!
//! This module provides an iterator over the non-air cells of a [`VoxelGrid`].
//!
//! The iterator walks the block vector in layout order (x, then y, then z) and skips
//! air cells, handing out each remaining block together with its local position.

use cgmath::Point3;

use crate::engine_state::voxels::block::BlockKind;

use super::VoxelGrid;

/// An iterator over all non-air blocks in a grid.
pub struct GridBlockIterator<'a> {
    /// Reference to the grid being iterated over
    grid_ref: &'a VoxelGrid,
    /// Current offset into the block vector
    current_offset: usize,
}

impl<'a> GridBlockIterator<'a> {
    /// Creates a new `GridBlockIterator` positioned at the start of `grid_ref`.
    pub fn new(grid_ref: &'a VoxelGrid) -> Self {
        GridBlockIterator {
            grid_ref,
            current_offset: 0,
        }
    }
}

impl Iterator for GridBlockIterator<'_> {
    type Item = (Point3<usize>, BlockKind);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = &self.grid_ref.blocks;
        while self.current_offset < blocks.len() {
            let offset = self.current_offset;
            self.current_offset += 1;

            let kind = blocks[offset];
            if !kind.is_air() {
                return Some((self.grid_ref.position_of(offset), kind));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.grid_ref.blocks.len() - self.current_offset))
    }
}
