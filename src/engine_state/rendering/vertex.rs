//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format emitted by the mesher and the matching
//! `wgpu` buffer layout.

use cgmath::{Point3, Vector3};

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Normal: [f32; 3] (12 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    position: [f32; 3],
    /// UV texture coordinates (normalized 0.0-1.0)
    tex_coords: [f32; 2],
    /// Outward unit normal of the face this vertex belongs to
    normal: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - The position of the vertex
    /// * `tex_coords` - U and V texture coordinates
    /// * `normal` - The outward normal of the face
    pub fn new(pos: Point3<f32>, tex_coords: [f32; 2], normal: Vector3<f32>) -> Self {
        Vertex {
            position: pos.into(),
            tex_coords,
            normal: normal.into(),
        }
    }

    /// The position of this vertex.
    pub fn position(&self) -> Point3<f32> {
        self.position.into()
    }

    /// The texture coordinates of this vertex.
    pub fn tex_coords(&self) -> [f32; 2] {
        self.tex_coords
    }

    /// The face normal carried by this vertex.
    pub fn normal(&self) -> Vector3<f32> {
        self.normal.into()
    }

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: tex_coords (vec2<f32>)
    /// - `location = 2`: normal (vec3<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_struct() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[2].offset, 20);
    }

    #[test]
    fn casts_to_bytes_in_field_order() {
        let vertex = Vertex::new(
            Point3::new(1.0, 2.0, 3.0),
            [0.0, 1.0],
            Vector3::new(0.0, -1.0, 0.0),
        );
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, -1.0, 0.0]);
    }
}
