//! Rendering side of the voxel engine.
//!
//! This module turns voxel grids into vertex and index data and moves that data
//! across the [`renderer::Renderer`] boundary. It never compiles shaders, binds
//! textures or computes camera matrices; those are set up by whoever owns the
//! render pass.

pub mod meshing;
pub mod renderer;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;
