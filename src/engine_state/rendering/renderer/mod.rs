//! The boundary between mesh data and whatever draws it.
//!
//! Meshes never talk to a graphics API directly. They go through the [`Renderer`]
//! trait: create a resource, fill it with vertex and index bytes, draw it, release it.
//! Shaders, textures and camera uniforms are the renderer owner's business and are
//! set up around a draw, never inside one.
//!
//! Two implementations are provided:
//! - [`RecordingRenderer`]: keeps everything in memory, for tests and headless runs
//! - [`WgpuRenderer`]: backs resources with `wgpu` buffers

use std::fmt;

use thiserror::Error;

mod recording;
pub(crate) mod wgpu_renderer;

pub use recording::{RecordedResource, RecordingRenderer};
pub use wgpu_renderer::WgpuRenderer;

/// Opaque identifier of a GPU-resident mesh resource.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GpuHandle(pub u32);

impl fmt::Display for GpuHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gpu#{}", self.0)
    }
}

/// A single queued draw of an uploaded mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawCommand {
    /// The resource to draw
    pub handle: GpuHandle,
    /// How many indices to draw, starting at 0
    pub index_count: u32,
}

/// Failures at the GPU resource boundary.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer could not allocate a new resource.
    #[error("failed to create GPU resource: {0}")]
    ResourceCreation(String),

    /// The handle does not refer to a live resource.
    #[error("unknown GPU resource {0}")]
    UnknownHandle(GpuHandle),

    /// The renderer refused the data for an existing resource.
    #[error("failed to upload data to {handle}: {reason}")]
    Upload {
        /// The resource being written
        handle: GpuHandle,
        /// What went wrong
        reason: String,
    },
}

/// The operations a mesh needs from a graphics backend.
///
/// All calls happen on the thread that owns the graphics context. `&mut self`
/// keeps them serialized.
pub trait Renderer {
    /// Allocates a new, empty mesh resource.
    fn create_gpu_resource(&mut self) -> Result<GpuHandle, RenderError>;

    /// Stores the vertex bytes of a resource, replacing any previous contents.
    fn upload_vertex_data(&mut self, handle: GpuHandle, bytes: &[u8]) -> Result<(), RenderError>;

    /// Stores the index bytes (`u32` indices) of a resource, replacing any previous contents.
    fn upload_index_data(&mut self, handle: GpuHandle, bytes: &[u8]) -> Result<(), RenderError>;

    /// Frees a resource. Unknown handles are ignored.
    fn release_gpu_resource(&mut self, handle: GpuHandle);

    /// Draws the first `index_count` indices of a resource as triangles.
    fn issue_draw_call(&mut self, handle: GpuHandle, index_count: u32);
}
