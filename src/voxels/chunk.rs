//! # Chunk Module
//!
//! This module provides the `VoxelChunk` struct: a dense 16x64x16 grid of
//! voxels together with the solidity/translucency queries the mesh builder
//! and the navigation extractor run against it.
//!
//! ## Cross-chunk queries
//!
//! A chunk never holds a reference to another chunk. Queries that may cross a
//! chunk border (`is_solid_for_neighbor`) take a [`ChunkLookup`] collaborator
//! and re-enter the adjacent chunk through it; a missing neighbor degrades to
//! "exposed" so world-edge and not-yet-generated chunks always render their
//! boundary faces.
//!
//! ## Navigation data
//!
//! Each chunk owns the walkable points and local connections extracted from
//! its own voxels. Cross-chunk stitching happens globally in the `nav`
//! module; the chunk only ever looks at itself here.

use std::collections::HashSet;

use cgmath::{Point3, Vector2};
use log::debug;

use super::location::{pack, unpack, Location};
use super::voxel::{is_solid_id, is_translucent_id, Voxel, VoxelIdSize};
use super::ChunkLookup;

/// The horizontal dimension (width and depth) of a chunk in voxels.
pub const CHUNK_SIZE_XZ: i32 = 16;
/// The vertical dimension (height) of a chunk in voxels.
pub const CHUNK_SIZE_Y: i32 = 64;
/// The total number of voxels in a chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE_XZ * CHUNK_SIZE_Y * CHUNK_SIZE_XZ) as usize;

/// A fixed-size cuboid region of the voxel world.
///
/// Chunks are the fundamental unit of world data. Each chunk stores its
/// position on the 2D chunk grid, a dense voxel array, and the navigation
/// points and connections last extracted from its voxels.
pub struct VoxelChunk {
    /// The position of this chunk on the chunk grid (not voxel coordinates).
    pub position: Vector2<i32>,

    /// Dense voxel storage, row-major over (x, z, y).
    voxels: Vec<Voxel>,

    /// Packed ids of the walkable points inside this chunk.
    ///
    /// Rebuilt by [`VoxelChunk::rebuild_nav`]; stale after any voxel edit
    /// until the owner triggers a rebuild.
    pub nav_points: Vec<u64>,

    /// Local point-to-point connections, deduplicated by ordered pair.
    pub nav_connections: HashSet<(u64, u64)>,
}

impl VoxelChunk {
    /// Creates a blank chunk (every voxel is void) at the given grid position.
    pub fn blank(position: Vector2<i32>) -> Self {
        VoxelChunk {
            position,
            voxels: vec![Voxel::default(); CHUNK_VOLUME],
            nav_points: Vec::new(),
            nav_connections: HashSet::new(),
        }
    }

    /// Resets every voxel back to void, keeping the allocation.
    pub fn fill_blank(&mut self) {
        self.voxels.fill(Voxel::default());
    }

    fn index(position: Point3<i32>) -> usize {
        assert!(
            Self::is_voxel_in_bounds(position),
            "voxel position ({}, {}, {}) out of chunk bounds",
            position.x,
            position.y,
            position.z
        );
        (position.x + (position.z * CHUNK_SIZE_XZ) + (position.y * CHUNK_SIZE_XZ * CHUNK_SIZE_XZ))
            as usize
    }

    /// Returns the voxel at the given local position.
    ///
    /// # Panics
    /// Panics if the position is outside `[0, CHUNK_SIZE)` on any axis. Use
    /// the world-level accessors for checked access.
    pub fn voxel(&self, position: Point3<i32>) -> Voxel {
        self.voxels[Self::index(position)]
    }

    /// Writes a voxel at the given local position, at full brightness.
    ///
    /// # Panics
    /// Panics if the position is outside the chunk bounds.
    pub fn set_voxel(&mut self, position: Point3<i32>, id: VoxelIdSize, is_slab: bool) {
        self.voxels[Self::index(position)] = Voxel::new(id, is_slab);
    }

    /// Pure range check against the chunk dimensions.
    pub fn is_voxel_in_bounds(position: Point3<i32>) -> bool {
        !((position.x >= CHUNK_SIZE_XZ)
            || (position.y >= CHUNK_SIZE_Y)
            || (position.z >= CHUNK_SIZE_XZ)
            || (position.x < 0)
            || (position.y < 0)
            || (position.z < 0))
    }

    /// Whether the voxel at `position` is solid.
    ///
    /// Out-of-bounds positions report the neutral default (`false`); callers
    /// that need cross-chunk awareness must use
    /// [`VoxelChunk::is_solid_for_neighbor`].
    pub fn is_solid(&self, position: Point3<i32>) -> bool {
        if !Self::is_voxel_in_bounds(position) {
            return false;
        }
        is_solid_id(self.voxel(position).id)
    }

    /// Whether the voxel at `position` is translucent.
    ///
    /// Out-of-bounds positions report the neutral default (`false`).
    pub fn is_translucent(&self, position: Point3<i32>) -> bool {
        if !Self::is_voxel_in_bounds(position) {
            return false;
        }
        is_translucent_id(self.voxel(position).id)
    }

    /// The occlusion predicate used by the mesh builder.
    ///
    /// Answers whether the voxel at `position` hides a face of a voxel with
    /// id `asker_id`. When `position` falls outside this chunk horizontally,
    /// the query wraps the local coordinate, steps the chunk coordinate one
    /// chunk over, and re-enters the neighbor through `chunks`. A missing
    /// neighbor chunk, or a vertically out-of-range position, leaves the face
    /// exposed.
    ///
    /// In bounds, a face is occluded when the neighbor voxel is solid and not
    /// a slab, or shares the asker's id (runs of one material never render
    /// internal faces; slabs always expose their top).
    pub fn is_solid_for_neighbor(
        &self,
        position: Point3<i32>,
        asker_id: VoxelIdSize,
        chunks: &dyn ChunkLookup,
    ) -> bool {
        if !Self::is_voxel_in_bounds(position) {
            if (position.y >= CHUNK_SIZE_Y) || (position.y < 0) {
                return false;
            }

            let mut at = Location::new(self.position, position);

            if at.voxel.x >= CHUNK_SIZE_XZ {
                at.voxel.x = 0;
                at.chunk.x += 1;
            }
            if at.voxel.z >= CHUNK_SIZE_XZ {
                at.voxel.z = 0;
                at.chunk.y += 1;
            }
            if at.voxel.x < 0 {
                at.voxel.x = CHUNK_SIZE_XZ - 1;
                at.chunk.x -= 1;
            }
            if at.voxel.z < 0 {
                at.voxel.z = CHUNK_SIZE_XZ - 1;
                at.chunk.y -= 1;
            }

            return match chunks.chunk(at.chunk) {
                Some(neighbor) => neighbor.is_solid_for_neighbor(at.voxel, asker_id, chunks),
                None => false,
            };
        }

        let voxel = self.voxel(position);
        (!voxel.is_slab) && (is_solid_id(voxel.id) || (asker_id == voxel.id))
    }

    fn voxel_id_or_void(&self, position: Point3<i32>) -> VoxelIdSize {
        if Self::is_voxel_in_bounds(position) {
            self.voxel(position).id
        } else {
            0
        }
    }

    /// Re-derives this chunk's walkable points and local connections.
    ///
    /// A point is a voxel position with void at itself and directly above,
    /// and a non-void voxel directly below (solid footing with headroom).
    /// Connections are restricted to orthogonal moves: a neighbor offset with
    /// both a horizontal X and Z component is never connected.
    ///
    /// Must be re-run whenever a voxel at, above, or below a candidate
    /// position changes; a stale graph silently produces wrong paths.
    pub fn rebuild_nav(&mut self) {
        self.nav_points.clear();
        self.nav_connections.clear();

        for x in 0..CHUNK_SIZE_XZ {
            for z in 0..CHUNK_SIZE_XZ {
                for y in 0..CHUNK_SIZE_Y {
                    if y + 1 >= CHUNK_SIZE_Y {
                        continue;
                    }
                    if y < 1 {
                        continue;
                    }

                    let above = self.voxel(Point3::new(x, y + 1, z));
                    let this = self.voxel(Point3::new(x, y, z));
                    let below = self.voxel(Point3::new(x, y - 1, z));

                    if above.id > 0 {
                        continue;
                    }
                    if this.id > 0 {
                        continue;
                    }
                    if below.id == 0 {
                        continue;
                    }

                    self.nav_points.push(pack(
                        x as u8,
                        y as u8,
                        z as u8,
                        self.position.x as i16,
                        self.position.y as i16,
                    ));
                }
            }
        }

        debug!(
            "[chunk @ ({}, {})] made {} nav points",
            self.position.x,
            self.position.y,
            self.nav_points.len()
        );

        for point_index in 0..self.nav_points.len() {
            let point_id = self.nav_points[point_index];
            let (voxel_x, voxel_y, voxel_z, _, _) = unpack(point_id);
            let origin = Point3::new(voxel_x as i32, voxel_y as i32, voxel_z as i32);

            for x in -1..=1 {
                for z in -1..=1 {
                    for y in -1..=1 {
                        if x == 0 && y == 0 && z == 0 {
                            continue;
                        }
                        // no diagonals
                        if x * x + z * z > 1 {
                            continue;
                        }

                        let dest = Point3::new(origin.x + x, origin.y + y, origin.z + z);
                        if !Self::is_voxel_in_bounds(dest) {
                            continue;
                        }
                        if (dest.y <= 0) || (dest.y > CHUNK_SIZE_Y) {
                            continue;
                        }

                        let dest_id = pack(
                            dest.x as u8,
                            dest.y as u8,
                            dest.z as u8,
                            self.position.x as i16,
                            self.position.y as i16,
                        );

                        if self.nav_connections.contains(&(point_id, dest_id)) {
                            continue;
                        }

                        if self.voxel(dest).id > 0 {
                            continue;
                        }
                        if self.voxel_id_or_void(Point3::new(dest.x, dest.y - 1, dest.z)) == 0 {
                            continue;
                        }
                        if self.voxel_id_or_void(Point3::new(dest.x, dest.y + 1, dest.z)) > 0 {
                            continue;
                        }

                        self.nav_connections.insert((point_id, dest_id));
                    }
                }
            }
        }
    }
}
