//! Mesh generation for voxel rendering.
//!
//! This module turns a [`VoxelGrid`] into triangle meshes by emitting only the block
//! faces that can actually be seen.
//!
//! # Face Culling
//!
//! For every solid block, each of its six neighbors is tested. A face is emitted only
//! when the neighbor on that side does not occlude it (air, void or water). A block
//! buried on all six sides contributes nothing; a floating block contributes all six.
//!
//! Water is simplified: every water block emits exactly its bottom face into a
//! separate stream, whatever its neighbors are.
//!
//! # Architecture
//! - [`MeshBuilder`]: walks the grid and decides which faces to emit
//! - [`Face`]: one visible side of one block, turned into four vertices
//! - [`MeshBuffer`]: accumulates faces and manages their GPU upload
//!
//! No vertex welding is done. Neighboring faces differ in normal and UV anyway.

use log::debug;
use web_time::Instant;

use crate::engine_state::voxels::{
    block::{BlockKind, BlockSide},
    grid::{NeighborLookup, VoidNeighbors, VoxelGrid},
};

mod face;
mod mesh_buffer;

pub use face::Face;
pub use mesh_buffer::{MeshBuffer, MeshState};

/// Face counts produced by a single [`MeshBuilder::build`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Faces appended to the terrain stream
    pub terrain_faces: usize,
    /// Faces appended to the water stream
    pub water_faces: usize,
}

impl MeshStats {
    /// Total number of faces emitted.
    pub fn total_faces(&self) -> usize {
        self.terrain_faces + self.water_faces
    }
}

/// Builds face-culled meshes from voxel grids.
///
/// Cells outside the grid are resolved through the `L` boundary policy.
#[derive(Clone, Debug, Default)]
pub struct MeshBuilder<L = VoidNeighbors> {
    neighbors: L,
}

impl MeshBuilder<VoidNeighbors> {
    /// Creates a builder for a chunk with nothing around it.
    pub fn new() -> Self {
        MeshBuilder {
            neighbors: VoidNeighbors,
        }
    }
}

impl<L: NeighborLookup> MeshBuilder<L> {
    /// Creates a builder that asks `neighbors` about cells beyond the grid.
    pub fn with_neighbors(neighbors: L) -> Self {
        MeshBuilder { neighbors }
    }

    /// Determines which faces of the block at `(i, j, k)` are exposed.
    ///
    /// # Returns
    /// An array of 6 booleans in `BlockSide` order, `true` where the neighbor on that
    /// side does not occlude.
    pub fn exposed_sides(&self, grid: &VoxelGrid, i: i32, j: i32, k: i32) -> [bool; 6] {
        BlockSide::all().map(|side| {
            let step = side.offset();
            !grid.is_occluding_at(&self.neighbors, i + step.x, j + step.y, k + step.z)
        })
    }

    /// Appends the visible faces of `grid` to the two streams and marks both as built,
    /// even when no face was emitted.
    ///
    /// Nothing is cleared first. Call `clear` on both buffers before rebuilding, or
    /// the new faces are added after the old ones.
    ///
    /// # Arguments
    /// * `grid` - The grid to mesh
    /// * `terrain` - Receives the faces of solid blocks
    /// * `water` - Receives the faces of water blocks
    pub fn build(
        &self,
        grid: &VoxelGrid,
        terrain: &mut MeshBuffer,
        water: &mut MeshBuffer,
    ) -> MeshStats {
        let start = Instant::now();
        let mut stats = MeshStats::default();
        terrain.mark_built();
        water.mark_built();

        for k in 0..grid.size() as i32 {
            for j in 0..grid.height() as i32 {
                for i in 0..grid.size() as i32 {
                    match grid.get(i, j, k) {
                        BlockKind::Empty | BlockKind::Void => {}
                        BlockKind::Water => {
                            water.push_face(&Face::new(i, j, k, BlockSide::Bottom));
                            stats.water_faces += 1;
                        }
                        BlockKind::Grass => {
                            let exposed = self.exposed_sides(grid, i, j, k);
                            for side in BlockSide::all() {
                                if exposed[side as usize] {
                                    terrain.push_face(&Face::new(i, j, k, side));
                                    stats.terrain_faces += 1;
                                }
                            }
                        }
                    }
                }
            }
        }

        debug!(
            "Meshed {} terrain and {} water faces in {:?}",
            stats.terrain_faces,
            stats.water_faces,
            start.elapsed()
        );
        stats
    }
}
