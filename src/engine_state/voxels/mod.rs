//! # Voxel Core
//!
//! This module contains everything between a noise seed and a meshed chunk.
//!
//! ## Architecture
//!
//! * **Block**: the kinds a cell can hold and the six sides of a cube
//! * **Grid**: dense, bounds-safe storage of block kinds
//! * **Noise Source**: the 2D noise capability generation depends on
//! * **Terrain**: heightmap generation from noise into a grid
//! * **Chunk**: a grid plus its terrain and water meshes
//! * **World**: the session owning the noise, the generator and the chunk
//!
//! ## Data Flow
//!
//! 1. `World::new` seeds the noise and creates the generator
//! 2. `Chunk::new` generates the grid and meshes it
//! 3. `Chunk::upload` hands the meshes to a renderer
//! 4. `Chunk::render` draws them every frame
//!
//! ## Threading
//!
//! Everything here runs synchronously on the calling thread. Uploading and drawing
//! must happen on the thread that owns the graphics context.

pub mod block;
pub mod chunk;
pub mod grid;
pub mod noise_source;
pub mod terrain;
pub mod world;
