#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedural voxel terrain: a heightmap generated from 2D noise fills a chunk of
//! typed blocks, and the chunk is turned into a triangle mesh that contains only the
//! faces bordering non-solid cells.
//!
//! ## Key Modules
//!
//! * `config` - World parameters, loadable from JSON
//! * `engine_state::voxels` - Blocks, grids, noise, terrain generation, chunks
//! * `engine_state::rendering` - Face-culled meshing, mesh buffers and the renderer boundary
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_terrain::{RecordingRenderer, World, WorldConfig};
//!
//! let mut world = World::new(WorldConfig::default()).unwrap();
//! let mut renderer = RecordingRenderer::new();
//! world.upload(&mut renderer);
//! world.render(&mut renderer);
//! world.unload(&mut renderer);
//! ```
//!
//! Rendering goes through the `Renderer` trait, so anything from an in-memory
//! recorder to a `wgpu` device can sit behind it.

use log::{info, warn};
use thiserror::Error;

pub mod config;
pub mod engine_state;

pub use config::{ConfigError, WorldConfig};
pub use engine_state::rendering::{
    meshing::{MeshBuffer, MeshBuilder, MeshState, MeshStats},
    renderer::{DrawCommand, GpuHandle, RecordingRenderer, RenderError, Renderer, WgpuRenderer},
    Vertex,
};
pub use engine_state::voxels::{
    block::{BlockKind, BlockSide},
    chunk::Chunk,
    grid::{NeighborLookup, VoidNeighbors, VoxelGrid},
    noise_source::{CoherentNoise, NoiseSource, SimplexNoise},
    terrain::TerrainGenerator,
    world::World,
};

/// Errors that stop [`run`].
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Generates the world described by the config file named in the first argument
/// (or the default world), uploads it and records one frame of draw calls.
///
/// Uses a headless `wgpu` device when one is available and falls back to recording
/// draw calls in memory otherwise.
pub fn run() -> Result<(), RunError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {path}");
            WorldConfig::from_path(path)?
        }
        None => WorldConfig::default(),
    };

    let mut world = World::new(config)?;

    match pollster::block_on(WgpuRenderer::headless()) {
        Ok(mut renderer) => {
            draw_frame(&mut world, &mut renderer);
            let frame = renderer.end_frame();
            let buffers = renderer.buffer_state();
            info!(
                "Queued {} draw calls using {} of {} allocated GPU bytes after {} buffer writes",
                frame.len(),
                buffers.get_total_used_memory(),
                buffers.get_total_allocated_memory(),
                buffers.get_total_writes(),
            );
            world.unload(&mut renderer);
        }
        Err(err) => {
            warn!("No GPU available ({err}), recording draw calls instead");
            let mut renderer = RecordingRenderer::new();
            draw_frame(&mut world, &mut renderer);
            info!("Recorded {} draw calls", renderer.take_draw_calls().len());
            world.unload(&mut renderer);
        }
    }

    Ok(())
}

/// Uploads the world if needed and draws it once.
fn draw_frame<R: Renderer>(world: &mut World, renderer: &mut R) {
    if !world.upload(renderer) {
        warn!("Some meshes failed to upload and will not be drawn");
    }
    world.render(renderer);
}
