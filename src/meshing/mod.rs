//! # Meshing Module
//!
//! Converts a chunk's voxel data into a renderable surface mesh.
//!
//! The builder makes two passes over every voxel: pass one emits the
//! non-translucent voxels, pass two the translucent ones, so the renderer can
//! draw them as separate material surfaces. For each voxel, each of the six
//! face directions is tested against the occlusion predicate
//! (`VoxelChunk::is_solid_for_neighbor`) and a quad is emitted only when the
//! face is exposed. Texture coordinates come from a fixed-size atlas indexed
//! by the voxel's type table entry, and each face carries a constant
//! brightness in a custom per-vertex channel.
//!
//! Rebuilding is idempotent: unchanged voxel data always yields an identical
//! mesh. A chunk with no voxels produces an empty mesh without error.

use cgmath::{ElementWise, Point3, Vector2, Vector3};

pub mod mesh;
pub mod side;
pub mod vertex;

pub use mesh::{ChunkMesh, MeshSurface};
pub use vertex::Vertex;

use crate::voxels::chunk::{CHUNK_SIZE_XZ, CHUNK_SIZE_Y};
use crate::voxels::voxel::{voxel_type, Voxel};
use crate::voxels::{ChunkLookup, VoxelChunk};
use side::{brightness, is_vertical_face, Side, CUBE_VERTICES, FRONT, SIDES};

/// The texture atlas grid: columns and rows of per-material cells.
pub const TEXTURE_ATLAS_SIZE: (u32, u32) = (16, 16);

/// Converts a texture-atlas index to its (column, row) cell.
pub fn atlas_index_to_cell(index: u8) -> Vector2<u8> {
    Vector2::new(
        index % TEXTURE_ATLAS_SIZE.0 as u8,
        index / TEXTURE_ATLAS_SIZE.1 as u8,
    )
}

/// Converts an atlas (column, row) cell back to its index.
pub fn atlas_cell_to_index(cell: Vector2<u8>) -> u8 {
    cell.x + (TEXTURE_ATLAS_SIZE.1 as u8 * cell.y)
}

/// Builds the mesh for one chunk.
///
/// `chunks` resolves occlusion queries that cross into adjacent chunks;
/// missing neighbors leave border faces exposed rather than risking invisible
/// geometry.
pub fn build_chunk_mesh(chunk: &VoxelChunk, chunks: &dyn ChunkLookup) -> ChunkMesh {
    let opaque = populate_pass(chunk, chunks, false);
    let translucent = populate_pass(chunk, chunks, true);

    ChunkMesh {
        opaque,
        translucent: if translucent.is_empty() {
            None
        } else {
            Some(translucent)
        },
    }
}

fn populate_pass(
    chunk: &VoxelChunk,
    chunks: &dyn ChunkLookup,
    translucent_pass: bool,
) -> MeshSurface {
    let mut surface = MeshSurface::new();

    for x in 0..CHUNK_SIZE_XZ {
        for y in 0..CHUNK_SIZE_Y {
            for z in 0..CHUNK_SIZE_XZ {
                let position = Point3::new(x, y, z);
                let voxel = chunk.voxel(position);

                if voxel.id == 0 {
                    continue;
                }

                if voxel_type(voxel.id).translucent != translucent_pass {
                    continue;
                }

                emit_voxel(&mut surface, chunk, chunks, voxel, position);
            }
        }
    }

    surface
}

fn emit_voxel(
    surface: &mut MeshSurface,
    chunk: &VoxelChunk,
    chunks: &dyn ChunkLookup,
    voxel: Voxel,
    position: Point3<i32>,
) {
    let real_position = Vector3::new(
        (position.x + (chunk.position.x * CHUNK_SIZE_XZ)) as f32,
        position.y as f32,
        (position.z + (chunk.position.y * CHUNK_SIZE_XZ)) as f32,
    );
    let textures = &voxel_type(voxel.id).textures;

    for (texture_slot, side) in SIDES.iter().enumerate() {
        let neighbor = position + side.normal;
        if chunk.is_solid_for_neighbor(neighbor, voxel.id, chunks) {
            continue;
        }

        emit_side(
            surface,
            real_position,
            side,
            voxel.is_slab,
            textures[texture_slot],
        );
    }
}

fn emit_side(
    surface: &mut MeshSurface,
    real_position: Vector3<f32>,
    side: &Side,
    is_slab: bool,
    texture_index: u8,
) {
    // a+------+b
    //  |      | b-c-a
    //  |      | b-d-c
    // c+------+d

    let slab_scale = if is_slab {
        Vector3::new(1.0, 0.5, 1.0)
    } else {
        Vector3::new(1.0, 1.0, 1.0)
    };

    let corners = side
        .corners
        .map(|index| CUBE_VERTICES[index].mul_element_wise(slab_scale) + real_position);

    let u_size = 1.0 / TEXTURE_ATLAS_SIZE.0 as f32;
    let v_size = 1.0 / TEXTURE_ATLAS_SIZE.1 as f32;

    // slabs sample the lower half of the cell on their shortened side faces
    let vertical = is_vertical_face(side.normal);
    let v_scale: f32 = if is_slab && vertical { 0.5 } else { 1.0 };
    let v_offset = if is_slab && vertical {
        v_size * (1.0 - v_scale)
    } else {
        0.0
    };

    let cell = atlas_index_to_cell(texture_index);
    let uv_origin = Vector2::new(cell.x as f32 * u_size, cell.y as f32 * v_size);

    let tex_coords = if side.normal == FRONT.normal {
        // mirrored so the texture reads the same way as on the other sides
        [
            uv_origin + Vector2::new(u_size, v_size * v_scale + v_offset),
            uv_origin + Vector2::new(0.0, v_size * v_scale + v_offset),
            uv_origin + Vector2::new(u_size, v_offset),
            uv_origin + Vector2::new(0.0, v_offset),
        ]
    } else {
        [
            uv_origin + Vector2::new(0.0, v_offset),
            uv_origin + Vector2::new(u_size, v_offset),
            uv_origin + Vector2::new(0.0, v_size * v_scale + v_offset),
            uv_origin + Vector2::new(u_size, v_size * v_scale + v_offset),
        ]
    };

    surface.push_face(corners, tex_coords, brightness(side.normal));
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cgmath::Vector2 as ChunkPos;

    use super::*;
    use crate::voxels::voxel::VoxelId;

    fn lone_chunk() -> (VoxelChunk, HashMap<ChunkPos<i32>, VoxelChunk>) {
        (VoxelChunk::blank(ChunkPos::new(0, 0)), HashMap::new())
    }

    #[test]
    fn empty_chunk_produces_empty_mesh() {
        let (chunk, chunks) = lone_chunk();
        let mesh = build_chunk_mesh(&chunk, &chunks);
        assert_eq!(mesh.surface_count(), 0);
        assert!(mesh.opaque.is_empty());
        assert!(mesh.translucent.is_none());
    }

    #[test]
    fn single_voxel_emits_six_faces() {
        let (mut chunk, chunks) = lone_chunk();
        chunk.set_voxel(Point3::new(5, 10, 5), VoxelId::Stone as u8, false);

        let mesh = build_chunk_mesh(&chunk, &chunks);
        assert_eq!(mesh.opaque.face_count(), 6);
        assert_eq!(mesh.opaque.vertices.len(), 24);
        assert_eq!(mesh.opaque.indices.len(), 36);
        assert!(mesh.translucent.is_none());
    }

    #[test]
    fn adjacent_same_id_voxels_share_no_face() {
        let (mut chunk, chunks) = lone_chunk();
        chunk.set_voxel(Point3::new(5, 10, 5), VoxelId::Stone as u8, false);
        chunk.set_voxel(Point3::new(6, 10, 5), VoxelId::Stone as u8, false);

        let mesh = build_chunk_mesh(&chunk, &chunks);
        // two cubes minus the two touching faces
        assert_eq!(mesh.opaque.face_count(), 10);
    }

    #[test]
    fn adjacent_different_solid_voxels_share_no_face_either() {
        let (mut chunk, chunks) = lone_chunk();
        chunk.set_voxel(Point3::new(5, 10, 5), VoxelId::Stone as u8, false);
        chunk.set_voxel(Point3::new(6, 10, 5), VoxelId::Dirt as u8, false);

        let mesh = build_chunk_mesh(&chunk, &chunks);
        assert_eq!(mesh.opaque.face_count(), 10);
    }

    #[test]
    fn translucent_voxels_land_in_the_second_surface() {
        let (mut chunk, chunks) = lone_chunk();
        chunk.set_voxel(Point3::new(5, 10, 5), VoxelId::Stone as u8, false);
        chunk.set_voxel(Point3::new(8, 10, 5), VoxelId::Water as u8, false);

        let mesh = build_chunk_mesh(&chunk, &chunks);
        assert_eq!(mesh.surface_count(), 2);
        assert_eq!(mesh.opaque.face_count(), 6);
        assert_eq!(mesh.translucent.as_ref().unwrap().face_count(), 6);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let (mut chunk, chunks) = lone_chunk();
        for x in 0..CHUNK_SIZE_XZ {
            for z in 0..CHUNK_SIZE_XZ {
                chunk.set_voxel(Point3::new(x, 0, z), VoxelId::Hardstone as u8, false);
            }
        }
        chunk.set_voxel(Point3::new(3, 1, 3), VoxelId::Grass as u8, true);

        let first = build_chunk_mesh(&chunk, &chunks);
        let second = build_chunk_mesh(&chunk, &chunks);

        assert_eq!(first.opaque.vertices, second.opaque.vertices);
        assert_eq!(first.opaque.indices, second.opaque.indices);
        assert_eq!(first.surface_count(), second.surface_count());
    }

    #[test]
    fn face_brightness_uses_the_fixed_constants() {
        let (mut chunk, chunks) = lone_chunk();
        chunk.set_voxel(Point3::new(5, 10, 5), VoxelId::Stone as u8, false);

        let mesh = build_chunk_mesh(&chunk, &chunks);
        let mut seen: Vec<f32> = mesh
            .opaque
            .vertices
            .iter()
            .map(|vertex| vertex.brightness)
            .collect();
        seen.sort_by(f32::total_cmp);
        seen.dedup();

        let expected: Vec<f32> = [135u8, 165, 180, 255]
            .iter()
            .map(|&light| light as f32 / 255.0)
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn slab_halves_vertex_height() {
        let (mut chunk, chunks) = lone_chunk();
        chunk.set_voxel(Point3::new(5, 10, 5), VoxelId::Stone as u8, true);

        let mesh = build_chunk_mesh(&chunk, &chunks);
        let max_y = mesh
            .opaque
            .vertices
            .iter()
            .map(|vertex| vertex.position[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_y, 10.5);
    }

    #[test]
    fn slab_top_face_keeps_full_cell_uvs() {
        let (mut chunk, chunks) = lone_chunk();
        chunk.set_voxel(Point3::new(0, 10, 0), VoxelId::Stone as u8, true);

        let mesh = build_chunk_mesh(&chunk, &chunks);
        let v_size = 1.0 / TEXTURE_ATLAS_SIZE.1 as f32;

        // top-face vertices are the ones at the halved height
        let top_vs: Vec<f32> = mesh
            .opaque
            .vertices
            .iter()
            .filter(|vertex| vertex.position[1] == 10.5)
            .map(|vertex| vertex.tex_coords[1])
            .collect();
        let cell_v = atlas_index_to_cell(VoxelId::Stone as u8).y as f32 * v_size;
        let span = top_vs.iter().fold(f32::MIN, |acc, &v| acc.max(v))
            - top_vs.iter().fold(f32::MAX, |acc, &v| acc.min(v));

        assert!(top_vs.iter().all(|&v| v >= cell_v && v <= cell_v + v_size));
        // some of those vertices belong to side faces that share the height,
        // but the span always reaches the full cell because of the top face
        assert_eq!(span, v_size);
    }

    #[test]
    fn world_position_offsets_by_chunk_coordinate() {
        let mut chunk = VoxelChunk::blank(ChunkPos::new(2, -1));
        let chunks = HashMap::new();
        chunk.set_voxel(Point3::new(0, 10, 0), VoxelId::Stone as u8, false);

        let mesh = build_chunk_mesh(&chunk, &chunks);
        let min_x = mesh
            .opaque
            .vertices
            .iter()
            .map(|vertex| vertex.position[0])
            .fold(f32::MAX, f32::min);
        let min_z = mesh
            .opaque
            .vertices
            .iter()
            .map(|vertex| vertex.position[2])
            .fold(f32::MAX, f32::min);

        assert_eq!(min_x, 32.0);
        assert_eq!(min_z, -16.0);
    }

    #[test]
    fn atlas_cell_round_trips() {
        for index in [0u8, 1, 15, 16, 17, 255] {
            assert_eq!(atlas_cell_to_index(atlas_index_to_cell(index)), index);
        }
    }
}
