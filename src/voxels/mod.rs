//! # Voxels Module
//!
//! Core voxel data model: the voxel value type and type table, chunk storage
//! with solidity/translucency queries, and world addressing via `Location`.

use std::collections::HashMap;

use cgmath::Vector2;

pub mod chunk;
pub mod location;
pub mod voxel;

pub use chunk::{VoxelChunk, CHUNK_SIZE_XZ, CHUNK_SIZE_Y};
pub use location::Location;
pub use voxel::{Voxel, VoxelId};

/// Coordinate-keyed access to the chunks of a world.
///
/// Chunks never reference each other directly; queries that cross a chunk
/// border go through this trait so the owning map stays the single source of
/// truth. `World` implements it, and so does a bare chunk map for tests and
/// tools.
pub trait ChunkLookup {
    /// Whether a chunk exists at the given chunk-grid position.
    fn has_chunk(&self, position: Vector2<i32>) -> bool;

    /// The chunk at the given chunk-grid position, if present.
    fn chunk(&self, position: Vector2<i32>) -> Option<&VoxelChunk>;
}

impl ChunkLookup for HashMap<Vector2<i32>, VoxelChunk> {
    fn has_chunk(&self, position: Vector2<i32>) -> bool {
        self.contains_key(&position)
    }

    fn chunk(&self, position: Vector2<i32>) -> Option<&VoxelChunk> {
        self.get(&position)
    }
}
