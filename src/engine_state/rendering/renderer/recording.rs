//! An in-memory [`Renderer`] that records what it is asked to do.

use std::collections::BTreeMap;

use log::{trace, warn};

use super::{DrawCommand, GpuHandle, RenderError, Renderer};

/// The uploaded contents of one recorded resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordedResource {
    /// Raw vertex bytes
    pub vertex_bytes: Vec<u8>,
    /// Raw index bytes
    pub index_bytes: Vec<u8>,
}

/// A renderer that keeps resources in memory and logs draw calls instead of drawing.
///
/// Failures can be switched on to exercise the error paths of its callers.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Next handle value to hand out
    next_handle: u32,
    /// Resources that have been created and not yet released
    resources: BTreeMap<GpuHandle, RecordedResource>,
    /// Every draw call issued, in order
    draws: Vec<DrawCommand>,
    /// Total resources ever created
    created: usize,
    /// When set, `create_gpu_resource` fails
    fail_creation: bool,
    /// When set, `upload_index_data` fails
    fail_index_upload: bool,
}

impl RecordingRenderer {
    /// Creates a renderer with no resources and no failures armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent resource creation fail (or succeed again).
    pub fn set_fail_creation(&mut self, fail: bool) {
        self.fail_creation = fail;
    }

    /// Makes every subsequent index upload fail (or succeed again).
    pub fn set_fail_index_upload(&mut self, fail: bool) {
        self.fail_index_upload = fail;
    }

    /// The number of resources currently alive.
    pub fn live_resources(&self) -> usize {
        self.resources.len()
    }

    /// The number of resources created over the renderer's lifetime.
    pub fn created_resources(&self) -> usize {
        self.created
    }

    /// The contents of a live resource.
    pub fn resource(&self, handle: GpuHandle) -> Option<&RecordedResource> {
        self.resources.get(&handle)
    }

    /// All draw calls issued so far.
    pub fn draw_calls(&self) -> &[DrawCommand] {
        &self.draws
    }

    /// Returns and forgets the draw calls issued so far, as at the end of a frame.
    pub fn take_draw_calls(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.draws)
    }

    fn resource_mut(&mut self, handle: GpuHandle) -> Result<&mut RecordedResource, RenderError> {
        self.resources
            .get_mut(&handle)
            .ok_or(RenderError::UnknownHandle(handle))
    }
}

impl Renderer for RecordingRenderer {
    fn create_gpu_resource(&mut self) -> Result<GpuHandle, RenderError> {
        if self.fail_creation {
            return Err(RenderError::ResourceCreation(
                "creation disabled on this renderer".to_string(),
            ));
        }
        let handle = GpuHandle(self.next_handle);
        self.next_handle += 1;
        self.created += 1;
        self.resources.insert(handle, RecordedResource::default());
        trace!("Created {handle}");
        Ok(handle)
    }

    fn upload_vertex_data(&mut self, handle: GpuHandle, bytes: &[u8]) -> Result<(), RenderError> {
        self.resource_mut(handle)?.vertex_bytes = bytes.to_vec();
        Ok(())
    }

    fn upload_index_data(&mut self, handle: GpuHandle, bytes: &[u8]) -> Result<(), RenderError> {
        if self.fail_index_upload {
            return Err(RenderError::Upload {
                handle,
                reason: "index uploads disabled on this renderer".to_string(),
            });
        }
        self.resource_mut(handle)?.index_bytes = bytes.to_vec();
        Ok(())
    }

    fn release_gpu_resource(&mut self, handle: GpuHandle) {
        if self.resources.remove(&handle).is_some() {
            trace!("Released {handle}");
        }
    }

    fn issue_draw_call(&mut self, handle: GpuHandle, index_count: u32) {
        if !self.resources.contains_key(&handle) {
            warn!("Draw call for released resource {handle} ignored");
            return;
        }
        self.draws.push(DrawCommand {
            handle,
            index_count,
        });
    }
}
