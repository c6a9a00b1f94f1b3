//! # Chunk Module
//!
//! A `Chunk` is one cuboid of terrain at a fixed chunk-grid offset: its voxel grid
//! plus the two meshes built from it, opaque terrain and transparent water.
//!
//! Construction runs generation and meshing to completion. The grid never changes
//! afterwards; the meshes can be rebuilt and re-uploaded.

use cgmath::Point2;
use log::{debug, warn};

use super::{
    grid::{NeighborLookup, VoxelGrid},
    noise_source::NoiseSource,
    terrain::TerrainGenerator,
};
use crate::engine_state::rendering::{
    meshing::{MeshBuffer, MeshBuilder, MeshStats},
    renderer::Renderer,
};

/// Label of the opaque geometry stream.
pub const TERRAIN_MESH_LABEL: &str = "Terrain Mesh";
/// Label of the water geometry stream.
pub const WATER_MESH_LABEL: &str = "Water Mesh";

/// A generated and meshed piece of terrain.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates `(X, Z)`.
    position: Point2<i32>,
    /// The blocks of this chunk.
    grid: VoxelGrid,
    /// Faces of solid blocks.
    terrain: MeshBuffer,
    /// Faces of water blocks.
    water: MeshBuffer,
    /// Face counts of the latest build.
    stats: MeshStats,
}

impl Chunk {
    /// Generates and meshes the chunk at `(x, z)`.
    ///
    /// Nothing is uploaded yet; call [`Chunk::upload`] on the render thread.
    pub fn new<N: NoiseSource>(x: i32, z: i32, generator: &TerrainGenerator<N>) -> Self {
        Self::from_grid(Point2::new(x, z), generator.generate_chunk(x, z))
    }

    /// Wraps an existing grid and meshes it with no neighbors.
    pub fn from_grid(position: Point2<i32>, grid: VoxelGrid) -> Self {
        let mut chunk = Chunk {
            position,
            grid,
            terrain: MeshBuffer::new(TERRAIN_MESH_LABEL),
            water: MeshBuffer::new(WATER_MESH_LABEL),
            stats: MeshStats::default(),
        };
        chunk.stats = MeshBuilder::new().build(&chunk.grid, &mut chunk.terrain, &mut chunk.water);
        debug!(
            "Chunk ({}, {}) built with {} faces",
            position.x,
            position.y,
            chunk.stats.total_faces()
        );
        chunk
    }

    /// The chunk-grid offset of this chunk. `y` holds the Z coordinate.
    pub fn position(&self) -> Point2<i32> {
        self.position
    }

    /// The blocks of this chunk.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// The opaque geometry stream.
    pub fn terrain(&self) -> &MeshBuffer {
        &self.terrain
    }

    /// The water geometry stream.
    pub fn water(&self) -> &MeshBuffer {
        &self.water
    }

    /// Face counts of the latest build.
    pub fn stats(&self) -> MeshStats {
        self.stats
    }

    /// Throws away the CPU-side meshes and builds them again with `builder`.
    ///
    /// Both streams are left stale: the previous upload keeps its resource but is not
    /// drawn until [`Chunk::upload`] runs again.
    pub fn rebuild_mesh<L: NeighborLookup>(&mut self, builder: &MeshBuilder<L>) -> MeshStats {
        self.terrain.clear();
        self.water.clear();
        self.stats = builder.build(&self.grid, &mut self.terrain, &mut self.water);
        self.stats
    }

    /// Uploads both meshes.
    ///
    /// A stream whose upload fails is logged and left without visible geometry; the
    /// other stream is unaffected.
    ///
    /// # Returns
    /// `true` if nothing failed.
    pub fn upload<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        let mut ok = true;
        for mesh in [&mut self.terrain, &mut self.water] {
            if let Err(err) = mesh.upload(renderer) {
                warn!(
                    "Chunk ({}, {}): {} upload failed, it will not be drawn: {}",
                    self.position.x,
                    self.position.y,
                    mesh.label(),
                    err
                );
                ok = false;
            }
        }
        ok
    }

    /// Draws the terrain, then the water.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        self.terrain.render(renderer);
        self.water.render(renderer);
    }

    /// Releases every GPU resource of this chunk.
    pub fn unload<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.terrain.unload(renderer);
        self.water.unload(renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        rendering::{meshing::MeshState, renderer::RecordingRenderer},
        voxels::block::BlockKind,
    };

    fn pillar() -> VoxelGrid {
        let mut grid = VoxelGrid::new(4, 4);
        grid.set(1, 0, 1, BlockKind::Grass);
        grid.set(1, 1, 1, BlockKind::Grass);
        grid.set(2, 0, 2, BlockKind::Water);
        grid
    }

    #[test]
    fn construction_meshes_both_streams() {
        let chunk = Chunk::from_grid(Point2::new(3, -1), pillar());
        assert_eq!(
            chunk.stats(),
            MeshStats {
                terrain_faces: 10,
                water_faces: 1
            }
        );
        assert!(chunk.terrain().is_stale());
        assert!(chunk.water().is_stale());
        assert_eq!(chunk.position(), Point2::new(3, -1));
    }

    #[test]
    fn upload_render_unload() {
        let mut renderer = RecordingRenderer::new();
        let mut chunk = Chunk::from_grid(Point2::new(0, 0), pillar());

        assert!(chunk.upload(&mut renderer));
        chunk.render(&mut renderer);
        let draws = renderer.take_draw_calls();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].index_count, 60);
        assert_eq!(draws[1].index_count, 6);

        chunk.unload(&mut renderer);
        assert_eq!(renderer.live_resources(), 0);
        chunk.render(&mut renderer);
        assert!(renderer.draw_calls().is_empty());
    }

    #[test]
    fn failed_upload_is_contained() {
        let mut renderer = RecordingRenderer::new();
        renderer.set_fail_creation(true);
        let mut chunk = Chunk::from_grid(Point2::new(0, 0), pillar());

        assert!(!chunk.upload(&mut renderer));
        chunk.render(&mut renderer);
        assert!(renderer.draw_calls().is_empty());
        assert_eq!(chunk.terrain().state(), MeshState::Built);
    }

    #[test]
    fn rebuild_marks_meshes_stale_until_reupload() {
        let mut renderer = RecordingRenderer::new();
        let mut chunk = Chunk::from_grid(Point2::new(0, 0), pillar());
        chunk.upload(&mut renderer);

        let stats = chunk.rebuild_mesh(&MeshBuilder::new());
        assert_eq!(stats.total_faces(), 11);
        chunk.render(&mut renderer);
        assert!(renderer.draw_calls().is_empty());

        assert!(chunk.upload(&mut renderer));
        chunk.render(&mut renderer);
        assert_eq!(renderer.draw_calls().len(), 2);
        assert_eq!(renderer.live_resources(), 2);
        chunk.unload(&mut renderer);
    }

    #[test]
    fn rebuild_without_faces_stops_drawing_the_old_mesh() {
        struct SolidBeyond;
        impl NeighborLookup for SolidBeyond {
            fn block_outside(&self, _i: i32, _j: i32, _k: i32) -> BlockKind {
                BlockKind::Grass
            }
        }

        let mut grid = VoxelGrid::new(2, 2);
        grid.fill(BlockKind::Grass);
        let mut renderer = RecordingRenderer::new();
        let mut chunk = Chunk::from_grid(Point2::new(0, 0), grid);
        assert!(chunk.upload(&mut renderer));
        assert_eq!(renderer.live_resources(), 1);

        let stats = chunk.rebuild_mesh(&MeshBuilder::with_neighbors(SolidBeyond));
        assert_eq!(stats.total_faces(), 0);
        assert_eq!(chunk.terrain().state(), MeshState::Built);

        assert!(chunk.upload(&mut renderer));
        assert_eq!(chunk.terrain().state(), MeshState::Empty);
        assert_eq!(renderer.live_resources(), 0);
        chunk.render(&mut renderer);
        assert!(renderer.draw_calls().is_empty());
    }
}
