//! # Location Module
//!
//! World addressing: a `Location` names any voxel in the infinite world as a
//! (chunk coordinate, local voxel coordinate) pair, and converts losslessly
//! to and from global integer coordinates and packed 64-bit point ids.

use std::fmt;

use cgmath::{Point3, Vector2};

use super::chunk::CHUNK_SIZE_XZ;

/// A unique address for a voxel anywhere in the world.
///
/// The chunk coordinate positions the chunk on the 2D chunk grid; the voxel
/// coordinate is local to that chunk. Y has no chunk offset, so
/// `global = local + chunk * CHUNK_SIZE_XZ` applies to X and Z only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    /// Position of the owning chunk on the chunk grid.
    pub chunk: Vector2<i32>,

    /// Voxel position local to the owning chunk.
    pub voxel: Point3<i32>,
}

impl Location {
    /// Creates a location from a chunk coordinate and a local voxel position.
    pub fn new(chunk: Vector2<i32>, voxel: Point3<i32>) -> Self {
        Location { chunk, voxel }
    }

    /// Converts this location to a global voxel coordinate.
    pub fn global_position(&self) -> Point3<i32> {
        Point3::new(
            self.voxel.x + (self.chunk.x * CHUNK_SIZE_XZ),
            self.voxel.y,
            self.voxel.z + (self.chunk.y * CHUNK_SIZE_XZ),
        )
    }

    /// Builds the location addressing the given global voxel coordinate.
    ///
    /// Uses euclidean division so the conversion round-trips for negative
    /// coordinates as well: the local coordinate is always in
    /// `[0, CHUNK_SIZE_XZ)`.
    pub fn from_global_position(position: Point3<i32>) -> Self {
        Location {
            chunk: Vector2::new(
                position.x.div_euclid(CHUNK_SIZE_XZ),
                position.z.div_euclid(CHUNK_SIZE_XZ),
            ),
            voxel: Point3::new(
                position.x.rem_euclid(CHUNK_SIZE_XZ),
                position.y,
                position.z.rem_euclid(CHUNK_SIZE_XZ),
            ),
        }
    }

    /// Packs this location into a 64-bit nav point id.
    ///
    /// The local coordinates must fit in a byte and the chunk coordinates in
    /// an `i16`; values inside the legal chunk ranges always do.
    pub fn pack(&self) -> u64 {
        pack(
            self.voxel.x as u8,
            self.voxel.y as u8,
            self.voxel.z as u8,
            self.chunk.x as i16,
            self.chunk.y as i16,
        )
    }

    /// Recovers the location addressed by a packed nav point id.
    pub fn from_packed(packed: u64) -> Self {
        let (x, y, z, chunk_x, chunk_y) = unpack(packed);
        Location {
            chunk: Vector2::new(chunk_x as i32, chunk_y as i32),
            voxel: Point3::new(x as i32, y as i32, z as i32),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}, {}) in ({}, {})]",
            self.voxel.x, self.voxel.y, self.voxel.z, self.chunk.x, self.chunk.y
        )
    }
}

/// Packs three local coordinates and two chunk coordinates into 8 bytes.
///
/// Layout (little-endian): bytes 0..3 hold x, y, z; bytes 3..5 the chunk X;
/// bytes 5..7 the chunk Y; byte 7 is always zero.
pub fn pack(x: u8, y: u8, z: u8, chunk_x: i16, chunk_y: i16) -> u64 {
    let mut data = [0u8; 8];

    data[0] = x;
    data[1] = y;
    data[2] = z;
    data[3..5].copy_from_slice(&chunk_x.to_le_bytes());
    data[5..7].copy_from_slice(&chunk_y.to_le_bytes());

    u64::from_le_bytes(data)
}

/// Unpacks a 64-bit point id back into its five components.
pub fn unpack(packed: u64) -> (u8, u8, u8, i16, i16) {
    let data = packed.to_le_bytes();

    let x = data[0];
    let y = data[1];
    let z = data[2];
    let chunk_x = i16::from_le_bytes([data[3], data[4]]);
    let chunk_y = i16::from_le_bytes([data[5], data[6]]);

    (x, y, z, chunk_x, chunk_y)
}
