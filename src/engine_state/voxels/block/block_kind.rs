//! # Block Kind Module
//!
//! This module defines the different kinds of blocks that can occupy a grid cell,
//! and the occlusion rule the mesher uses to decide which faces are visible.

use std::fmt;

use num_derive::FromPrimitive;

use super::BlockKindSize;

/// Enumerates every kind of block a voxel grid cell can hold.
///
/// The discriminants are stable and match the compact `BlockKindSize` storage format.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockKind {
    /// Air. The initial state of every cell.
    #[default]
    Empty = 0,

    /// Sentinel returned for any query outside the grid. Behaves like air.
    Void = 1,

    /// Opaque ground block produced by terrain generation.
    Grass = 2,

    /// Water. Visually transparent, so it never hides a neighboring face.
    Water = 3,
}

impl BlockKind {
    /// Converts a `BlockKindSize` back into a `BlockKind`.
    ///
    /// # Arguments
    /// * `raw` - The block kind in its compact storage format
    ///
    /// # Returns
    /// `Some(kind)` for a known discriminant, `None` otherwise.
    pub fn from_int(raw: BlockKindSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(raw)
    }

    /// Returns the compact storage representation of this kind.
    pub fn as_int(self) -> BlockKindSize {
        self as BlockKindSize
    }

    /// Whether a block of this kind hides the faces of the blocks next to it.
    ///
    /// Only solid kinds occlude. Air, the out-of-range sentinel and water do not.
    pub fn is_occluding(self) -> bool {
        match self {
            BlockKind::Empty | BlockKind::Void | BlockKind::Water => false,
            BlockKind::Grass => true,
        }
    }

    /// Whether this cell contributes no geometry at all.
    pub fn is_air(self) -> bool {
        matches!(self, BlockKind::Empty | BlockKind::Void)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Empty => "empty",
            BlockKind::Void => "void",
            BlockKind::Grass => "grass",
            BlockKind::Water => "water",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_solid_kinds_occlude() {
        assert!(BlockKind::Grass.is_occluding());
        assert!(!BlockKind::Empty.is_occluding());
        assert!(!BlockKind::Void.is_occluding());
        assert!(!BlockKind::Water.is_occluding());
    }

    #[test]
    fn raw_values_convert_back() {
        for kind in [
            BlockKind::Empty,
            BlockKind::Void,
            BlockKind::Grass,
            BlockKind::Water,
        ] {
            assert_eq!(BlockKind::from_int(kind.as_int()), Some(kind));
        }
        assert_eq!(BlockKind::from_int(200), None);
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(BlockKind::default(), BlockKind::Empty);
    }
}
