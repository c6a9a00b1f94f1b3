//! A [`Renderer`] backed by `wgpu` buffers.
//!
//! Draw calls cannot be issued outside a render pass, so `issue_draw_call` queues a
//! [`DrawCommand`] for the current frame. Whoever owns the pass sets the pipeline,
//! bind groups and uniforms, then calls [`WgpuRenderer::encode`] to replay the queue.

use log::{info, warn};

use crate::engine_state::buffer_state::BufferState;

use super::{DrawCommand, GpuHandle, RenderError, Renderer};

/// Renders meshes through a `wgpu` device and queue.
pub struct WgpuRenderer {
    /// Buffers backing each live resource
    buffer_state: BufferState,
    /// Next handle value to hand out
    next_handle: u32,
    /// Draws queued since the last `end_frame`
    frame: Vec<DrawCommand>,
}

impl WgpuRenderer {
    /// Creates a renderer on an existing device and queue.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        WgpuRenderer {
            buffer_state: BufferState::new(device, queue),
            next_handle: 0,
            frame: Vec::new(),
        }
    }

    /// Requests an adapter and device without any surface.
    ///
    /// # Returns
    /// A renderer on the default adapter, or `RenderError::ResourceCreation` if no
    /// adapter or device is available.
    pub async fn headless() -> Result<Self, RenderError> {
        let (device, queue) = request_device().await?;
        Ok(Self::new(device, queue))
    }

    /// The device buffers are created on, for building pipelines against.
    pub fn device(&self) -> &wgpu::Device {
        self.buffer_state.device()
    }

    /// The queue uploads are written through.
    pub fn queue(&self) -> &wgpu::Queue {
        self.buffer_state.queue()
    }

    /// The buffer registry, for memory statistics.
    pub fn buffer_state(&self) -> &BufferState {
        &self.buffer_state
    }

    /// The draws queued for the current frame.
    pub fn frame_commands(&self) -> &[DrawCommand] {
        &self.frame
    }

    /// Records every queued draw into `render_pass`.
    ///
    /// The pass must already have a pipeline using [`Vertex::desc`](crate::engine_state::rendering::Vertex::desc)
    /// as its vertex layout.
    pub fn encode(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for command in &self.frame {
            let Some(mesh) = self.buffer_state.get(command.handle) else {
                continue;
            };
            let (Some(vertex), Some(index)) = (&mesh.vertex, &mesh.index) else {
                continue;
            };
            render_pass.set_vertex_buffer(0, vertex.slice(..));
            render_pass.set_index_buffer(index.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..command.index_count, 0, 0..1);
        }
    }

    /// Ends the current frame, returning the draws that were queued for it.
    pub fn end_frame(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.frame)
    }
}

/// Requests a surfaceless device, falling back to a software adapter if no hardware
/// adapter is available.
pub(crate) async fn request_device() -> Result<(wgpu::Device, wgpu::Queue), RenderError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

    let mut adapter = Err(RenderError::ResourceCreation("no adapter requested".to_string()));
    for force_fallback_adapter in [false, true] {
        adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter,
            })
            .await
            .map_err(|err| RenderError::ResourceCreation(err.to_string()));
        if adapter.is_ok() {
            break;
        }
    }
    let adapter = adapter?;
    info!("Using adapter {:?}", adapter.get_info().name);

    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("Headless Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
        })
        .await
        .map_err(|err| RenderError::ResourceCreation(err.to_string()))
}

impl Renderer for WgpuRenderer {
    fn create_gpu_resource(&mut self) -> Result<GpuHandle, RenderError> {
        let handle = GpuHandle(self.next_handle);
        self.next_handle = self
            .next_handle
            .checked_add(1)
            .ok_or_else(|| RenderError::ResourceCreation("handle space exhausted".to_string()))?;
        self.buffer_state.register(handle);
        Ok(handle)
    }

    fn upload_vertex_data(&mut self, handle: GpuHandle, bytes: &[u8]) -> Result<(), RenderError> {
        self.buffer_state.write_vertices(handle, bytes)
    }

    fn upload_index_data(&mut self, handle: GpuHandle, bytes: &[u8]) -> Result<(), RenderError> {
        self.buffer_state.write_indices(handle, bytes)
    }

    fn release_gpu_resource(&mut self, handle: GpuHandle) {
        self.buffer_state.remove(handle);
        self.frame.retain(|command| command.handle != handle);
    }

    fn issue_draw_call(&mut self, handle: GpuHandle, index_count: u32) {
        if !self.buffer_state.contains(handle) {
            warn!("Draw call for released resource {handle} ignored");
            return;
        }
        self.frame.push(DrawCommand {
            handle,
            index_count,
        });
    }
}
