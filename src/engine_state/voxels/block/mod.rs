//! # Block Module
//!
//! This module provides the block-level vocabulary of the voxel engine: what kind of
//! block a cell holds, and which of its six sides a face belongs to.

pub mod block_kind;
pub mod block_side;

pub use block_kind::BlockKind;
pub use block_side::BlockSide;

/// The underlying integer type used to represent block kinds in memory.
pub type BlockKindSize = u8;
