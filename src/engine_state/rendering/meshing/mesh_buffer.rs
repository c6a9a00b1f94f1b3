//! Mesh data accumulated on the CPU and its GPU-resident counterpart.
//!
//! # Lifecycle
//!
//! ```text
//!          mark_built           upload              clear
//!   Empty ─────────────▶ Built ──────────▶ Uploaded ────────▶ Cleared
//!     ▲                    ▲                                     │
//!     │      unload        └────────────── mark_built ───────────┘
//!     └──────────────── (from any state)
//! ```
//!
//! Building never resets a buffer: clear it first or the new faces land after the old
//! ones. Uploading hands the data to the renderer and drops the CPU copy. A build
//! that produced no faces uploads as nothing: the old resource is released and the
//! buffer returns to `Empty`.

use log::{trace, warn};

use super::face::Face;
use crate::engine_state::rendering::{
    renderer::{GpuHandle, RenderError, Renderer},
    Vertex,
};

/// Where a [`MeshBuffer`] is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshState {
    /// No CPU data and no GPU resource.
    Empty,
    /// CPU data that is newer than whatever the GPU holds.
    Built,
    /// GPU resource current, CPU data discarded.
    Uploaded,
    /// CPU data discarded; any GPU resource is left as it was.
    Cleared,
}

/// An uploaded mesh resource.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct UploadedMesh {
    handle: GpuHandle,
    index_count: u32,
}

/// Vertex and index data for one stream of chunk geometry.
#[derive(Debug)]
pub struct MeshBuffer {
    /// Name used in logs
    label: &'static str,
    /// Vertex data, append-only while building
    vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`, six per face
    indices: Vec<u32>,
    state: MeshState,
    /// The resource on the renderer side, if one was uploaded
    gpu: Option<UploadedMesh>,
}

impl MeshBuffer {
    /// Creates an empty buffer.
    pub fn new(label: &'static str) -> Self {
        MeshBuffer {
            label,
            vertices: Vec::new(),
            indices: Vec::new(),
            state: MeshState::Empty,
            gpu: None,
        }
    }

    /// The name this buffer logs under.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The current lifecycle state.
    pub fn state(&self) -> MeshState {
        self.state
    }

    /// Vertex data not yet uploaded.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index data not yet uploaded.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The number of faces held on the CPU side.
    pub fn face_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Whether there is CPU data the GPU has not seen yet.
    pub fn is_stale(&self) -> bool {
        self.state == MeshState::Built
    }

    /// Whether there is nothing at all to upload or draw.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.gpu.is_none()
    }

    /// The GPU resource currently held, if any.
    pub fn gpu_handle(&self) -> Option<GpuHandle> {
        self.gpu.map(|uploaded| uploaded.handle)
    }

    /// The number of indices a draw of the uploaded resource covers.
    pub fn uploaded_index_count(&self) -> u32 {
        self.gpu.map_or(0, |uploaded| uploaded.index_count)
    }

    /// Appends one face: four vertices and the six indices of its two triangles.
    pub fn push_face(&mut self, face: &Face) {
        let base_vertex = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.indices.extend_from_slice(&Face::indices(base_vertex));
        self.state = MeshState::Built;
    }

    /// Marks the CPU data as the latest build, even if no face was pushed.
    pub fn mark_built(&mut self) {
        self.state = MeshState::Built;
    }

    /// Discards the CPU data. A GPU resource, if any, is not touched.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        if self.state != MeshState::Empty {
            self.state = MeshState::Cleared;
        }
    }

    /// Sends the built data to `renderer` and drops the CPU copy.
    ///
    /// Does nothing unless the buffer is `Built`. An out-of-date resource from an
    /// earlier upload is released first. A build without vertices never allocates: the
    /// buffer goes straight back to `Empty`.
    ///
    /// # Errors
    /// If the renderer fails, the half-made resource is released, the CPU data is kept
    /// so the upload can be retried, and nothing is drawn for this buffer until then.
    pub fn upload<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<(), RenderError> {
        if self.state != MeshState::Built {
            trace!("{}: nothing to upload ({:?})", self.label, self.state);
            return Ok(());
        }

        if let Some(stale) = self.gpu.take() {
            renderer.release_gpu_resource(stale.handle);
        }

        if self.vertices.is_empty() {
            trace!("{}: empty build, nothing on the GPU", self.label);
            self.indices = Vec::new();
            self.state = MeshState::Empty;
            return Ok(());
        }

        let handle = renderer.create_gpu_resource()?;
        if let Err(err) = self.write_to(renderer, handle) {
            renderer.release_gpu_resource(handle);
            return Err(err);
        }

        trace!(
            "{}: uploaded {} vertices, {} indices to {}",
            self.label,
            self.vertices.len(),
            self.indices.len(),
            handle
        );
        self.gpu = Some(UploadedMesh {
            handle,
            index_count: self.indices.len() as u32,
        });
        // The GPU owns the geometry now.
        self.vertices = Vec::new();
        self.indices = Vec::new();
        self.state = MeshState::Uploaded;
        Ok(())
    }

    fn write_to<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        handle: GpuHandle,
    ) -> Result<(), RenderError> {
        renderer.upload_vertex_data(handle, bytemuck::cast_slice(&self.vertices))?;
        renderer.upload_index_data(handle, bytemuck::cast_slice(&self.indices))
    }

    /// Issues a draw of the uploaded resource.
    ///
    /// Nothing is drawn if no resource was ever uploaded, or while a rebuild is waiting
    /// to be uploaded.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        if self.state == MeshState::Built {
            return;
        }
        if let Some(uploaded) = self.gpu {
            renderer.issue_draw_call(uploaded.handle, uploaded.index_count);
        }
    }

    /// Releases the GPU resource and all CPU data, returning to `Empty`.
    pub fn unload<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        if let Some(uploaded) = self.gpu.take() {
            renderer.release_gpu_resource(uploaded.handle);
        }
        self.vertices = Vec::new();
        self.indices = Vec::new();
        self.state = MeshState::Empty;
    }
}

impl Drop for MeshBuffer {
    fn drop(&mut self) {
        if let Some(uploaded) = self.gpu {
            warn!(
                "{} dropped while still holding {}; call unload first",
                self.label, uploaded.handle
            );
        }
    }
}
