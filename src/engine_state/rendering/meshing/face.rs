//! # Face Module
//!
//! A single visible side of a single block, and the quad it turns into.

use cgmath::{Point3, Vector3};

use crate::engine_state::{
    rendering::Vertex,
    voxels::block::block_side::{BlockSide, QUAD_INDICES, QUAD_UVS},
};

/// A single visible face of a block, not yet turned into vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Center of the block the face belongs to, in chunk-local coordinates
    pub position: Point3<i32>,
    /// Which side of the block this face represents
    pub side: BlockSide,
}

impl Face {
    /// Creates the face on `side` of the block at `(i, j, k)`.
    pub fn new(i: i32, j: i32, k: i32, side: BlockSide) -> Self {
        Face {
            position: Point3::new(i, j, k),
            side,
        }
    }

    /// Generates the four vertices of this face.
    ///
    /// Corners come from the side's corner table, offset by the block center, so the
    /// cube spans `position ± 0.5`. Every vertex carries the side's outward normal and
    /// the matching corner of the 0-1 texture square.
    pub fn vertices(&self) -> [Vertex; 4] {
        let center = Vector3::new(
            self.position.x as f32,
            self.position.y as f32,
            self.position.z as f32,
        );
        let normal = self.side.normal();
        let corners = self.side.corners();

        std::array::from_fn(|corner| {
            let [x, y, z] = corners[corner];
            Vertex::new(Point3::new(x, y, z) + center, QUAD_UVS[corner], normal)
        })
    }

    /// Generates the index data of this face, given where its vertices start in the buffer.
    ///
    /// # Returns
    /// Six indices forming two triangles over the face's four vertices.
    pub fn indices(base_vertex: u32) -> [u32; 6] {
        QUAD_INDICES.map(|index| base_vertex + index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_surround_the_block_center() {
        let face = Face::new(2, 5, -1, BlockSide::Top);
        for vertex in face.vertices() {
            let position = vertex.position();
            assert_eq!(position.y, 5.5);
            assert!((position.x - 2.0).abs() == 0.5);
            assert!((position.z + 1.0).abs() == 0.5);
            assert_eq!(vertex.normal(), Vector3::new(0.0, 1.0, 0.0));
        }
    }

    #[test]
    fn uvs_cover_the_whole_texture_once() {
        let uvs: Vec<[f32; 2]> = Face::new(0, 0, 0, BlockSide::East)
            .vertices()
            .iter()
            .map(Vertex::tex_coords)
            .collect();
        assert_eq!(uvs, QUAD_UVS.to_vec());
    }

    #[test]
    fn indices_are_offset_by_base() {
        assert_eq!(Face::indices(8), [8, 9, 10, 8, 10, 11]);
    }
}
