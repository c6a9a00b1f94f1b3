//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the geometry attached to
//! each of them: which neighbor a face looks at, its outward normal, and the corners
//! of the quad that represents it.

use cgmath::Vector3;

/// Corner offsets are multiples of this half-extent around the cell center.
pub const HALF_EXTENT: f32 = 0.5;

/// Texture coordinates shared by every quad, in corner order.
///
/// The full 0-1 texture range maps exactly once onto each face.
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Local indices of the two triangles of a quad, counter-clockwise seen from outside.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Represents the six possible faces of a voxel block.
///
/// The discriminants give the order in which the mesher tests neighbors:
/// [NORTH, SOUTH, EAST, WEST, TOP, BOTTOM]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The north face (facing negative Z)
    North = 0,

    /// The south face (facing positive Z)
    South = 1,

    /// The east face (facing positive X)
    East = 2,

    /// The west face (facing negative X)
    West = 3,

    /// The top face (facing positive Y)
    Top = 4,

    /// The bottom face (facing negative Y)
    Bottom = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [NORTH, SOUTH, EAST, WEST, TOP, BOTTOM]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::North,
            BlockSide::South,
            BlockSide::East,
            BlockSide::West,
            BlockSide::Top,
            BlockSide::Bottom,
        ]
    }

    /// The step from a cell to the neighbor this face looks at.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::North => Vector3::new(0, 0, -1),
            BlockSide::South => Vector3::new(0, 0, 1),
            BlockSide::East => Vector3::new(1, 0, 0),
            BlockSide::West => Vector3::new(-1, 0, 0),
            BlockSide::Top => Vector3::new(0, 1, 0),
            BlockSide::Bottom => Vector3::new(0, -1, 0),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let step = self.offset();
        Vector3::new(step.x as f32, step.y as f32, step.z as f32)
    }

    /// Returns the four corners of this face relative to the cell center.
    ///
    /// The corners are ordered counter-clockwise when the face is viewed from outside
    /// the block, so `QUAD_INDICES` yields two triangles whose winding agrees with
    /// `normal()`. Each corner lines up with the matching entry of `QUAD_UVS`.
    ///
    /// # Returns
    /// An array of four `[x, y, z]` offsets, each component being `±HALF_EXTENT`.
    pub fn corners(self) -> [[f32; 3]; 4] {
        const P: f32 = HALF_EXTENT;
        const N: f32 = -HALF_EXTENT;
        match self {
            BlockSide::North => [[P, N, N], [N, N, N], [N, P, N], [P, P, N]],
            BlockSide::South => [[N, N, P], [P, N, P], [P, P, P], [N, P, P]],
            BlockSide::East => [[P, N, P], [P, N, N], [P, P, N], [P, P, P]],
            BlockSide::West => [[N, N, N], [N, N, P], [N, P, P], [N, P, N]],
            BlockSide::Top => [[N, P, P], [P, P, P], [P, P, N], [N, P, N]],
            BlockSide::Bottom => [[N, N, N], [P, N, N], [P, N, P], [N, N, P]],
        }
    }
}
