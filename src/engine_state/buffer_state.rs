//! # Buffer State Module
//!
//! This module keeps the `wgpu` buffers behind every GPU mesh resource, together with
//! analytics about how much memory they take.
//!
//! ## Architecture
//!
//! Each [`GpuHandle`] owns at most one vertex buffer and one index buffer. Uploads
//! reuse the existing buffer when the new data fits, and otherwise replace it with a
//! freshly initialized one, so a mesh that shrinks never reallocates.

use std::collections::HashMap;

use wgpu::{util::DeviceExt, Buffer, BufferUsages, Device, Queue};

use crate::engine_state::rendering::renderer::{GpuHandle, RenderError};

/// Analytics data for a GPU buffer
#[derive(Debug, Default, Clone, Copy)]
struct BufferAnalytics {
    /// Total memory allocated for the buffer in bytes
    pub allocated_memory: u64,
    /// Memory actually holding data in bytes
    pub used_memory: u64,
    /// Number of times the buffer has been written to
    pub times_written: u64,
}

/// Which of a mesh's two buffers an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BufferKind {
    Vertex,
    Index,
}

impl BufferKind {
    fn usage(self) -> BufferUsages {
        match self {
            BufferKind::Vertex => BufferUsages::VERTEX | BufferUsages::COPY_DST,
            BufferKind::Index => BufferUsages::INDEX | BufferUsages::COPY_DST,
        }
    }
}

/// The buffers and analytics of one GPU mesh resource.
#[derive(Debug, Default)]
pub struct MeshBuffers {
    /// Vertex data, once uploaded
    pub vertex: Option<Buffer>,
    /// Index data, once uploaded
    pub index: Option<Buffer>,
    vertex_analytics: BufferAnalytics,
    index_analytics: BufferAnalytics,
}

impl MeshBuffers {
    fn slot(&mut self, kind: BufferKind) -> (&mut Option<Buffer>, &mut BufferAnalytics) {
        match kind {
            BufferKind::Vertex => (&mut self.vertex, &mut self.vertex_analytics),
            BufferKind::Index => (&mut self.index, &mut self.index_analytics),
        }
    }

    fn analytics(&self) -> [&BufferAnalytics; 2] {
        [&self.vertex_analytics, &self.index_analytics]
    }
}

/// Registry of the `wgpu` buffers backing every live GPU mesh resource.
pub struct BufferState {
    /// The GPU device
    device: Device,
    /// The GPU command queue
    queue: Queue,
    /// Buffers per resource
    buffers: HashMap<GpuHandle, MeshBuffers>,
}

impl BufferState {
    /// Creates an empty buffer registry.
    ///
    /// # Arguments
    ///
    /// * `device` - The GPU device buffers are created on
    /// * `queue` - The queue buffer writes are submitted through
    pub fn new(device: Device, queue: Queue) -> Self {
        Self {
            device,
            queue,
            buffers: HashMap::new(),
        }
    }

    /// The device buffers are created on.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// The queue buffer writes go through.
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Registers a resource with no buffers yet.
    pub fn register(&mut self, handle: GpuHandle) {
        self.buffers.insert(handle, MeshBuffers::default());
    }

    /// Whether `handle` is registered.
    pub fn contains(&self, handle: GpuHandle) -> bool {
        self.buffers.contains_key(&handle)
    }

    /// Gets the buffers of a resource.
    pub fn get(&self, handle: GpuHandle) -> Option<&MeshBuffers> {
        self.buffers.get(&handle)
    }

    /// Uploads vertex bytes for `handle`.
    pub fn write_vertices(&mut self, handle: GpuHandle, data: &[u8]) -> Result<(), RenderError> {
        self.write(handle, BufferKind::Vertex, data)
    }

    /// Uploads index bytes for `handle`.
    pub fn write_indices(&mut self, handle: GpuHandle, data: &[u8]) -> Result<(), RenderError> {
        self.write(handle, BufferKind::Index, data)
    }

    fn write(&mut self, handle: GpuHandle, kind: BufferKind, data: &[u8]) -> Result<(), RenderError> {
        if data.is_empty() {
            return Err(RenderError::Upload {
                handle,
                reason: format!("empty {kind:?} data"),
            });
        }
        if data.len() as u64 % wgpu::COPY_BUFFER_ALIGNMENT != 0 {
            return Err(RenderError::Upload {
                handle,
                reason: format!("{kind:?} data of {} bytes is not 4-byte aligned", data.len()),
            });
        }

        let mesh = self
            .buffers
            .get_mut(&handle)
            .ok_or(RenderError::UnknownHandle(handle))?;
        let (slot, analytics) = mesh.slot(kind);
        let data_size = data.len() as u64;

        let fits = slot.is_some() && analytics.allocated_memory >= data_size;
        if fits {
            if let Some(buffer) = slot.as_ref() {
                self.queue.write_buffer(buffer, 0, data);
            }
        } else {
            if let Some(old) = slot.take() {
                old.destroy();
            }
            let label = format!("{kind:?} Buffer {handle}");
            *slot = Some(
                self.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&label),
                        contents: data,
                        usage: kind.usage(),
                    }),
            );
            analytics.allocated_memory = data_size;
        }

        analytics.used_memory = data_size;
        analytics.times_written += 1;
        Ok(())
    }

    /// Destroys the buffers of a resource and forgets it.
    ///
    /// # Returns
    /// `false` if the handle was not registered.
    pub fn remove(&mut self, handle: GpuHandle) -> bool {
        match self.buffers.remove(&handle) {
            Some(mesh) => {
                for buffer in [mesh.vertex, mesh.index].into_iter().flatten() {
                    buffer.destroy();
                }
                true
            }
            None => false,
        }
    }

    /// Gets the total allocated memory across all buffers, in bytes.
    pub fn get_total_allocated_memory(&self) -> u64 {
        self.buffers
            .values()
            .flat_map(MeshBuffers::analytics)
            .fold(0, |acc, analytics| acc + analytics.allocated_memory)
    }

    /// Gets the total used memory across all buffers, in bytes.
    pub fn get_total_used_memory(&self) -> u64 {
        self.buffers
            .values()
            .flat_map(MeshBuffers::analytics)
            .fold(0, |acc, analytics| acc + analytics.used_memory)
    }

    /// Gets the total number of buffer writes across all resources.
    pub fn get_total_writes(&self) -> u64 {
        self.buffers
            .values()
            .flat_map(MeshBuffers::analytics)
            .fold(0, |acc, analytics| acc + analytics.times_written)
    }
}
