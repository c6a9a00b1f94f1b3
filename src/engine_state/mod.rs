//! # Engine State
//!
//! Everything the engine keeps between frames: the voxel world and the mesh data
//! derived from it, plus the GPU buffers those meshes are uploaded into.

pub mod buffer_state;
pub mod rendering;
pub mod voxels;
