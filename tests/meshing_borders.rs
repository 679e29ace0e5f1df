//! Cross-chunk meshing tests: faces on a shared border are culled only when
//! the neighboring chunk actually exists and occludes them.

use std::collections::HashMap;

use cgmath::{Point3, Vector2};

use voxel_world::meshing::build_chunk_mesh;
use voxel_world::{VoxelChunk, VoxelId, CHUNK_SIZE_XZ};

/// A chunk filled solid with stone from y 0 through y 10.
fn slab_chunk(position: Vector2<i32>) -> VoxelChunk {
    let mut chunk = VoxelChunk::blank(position);
    for x in 0..CHUNK_SIZE_XZ {
        for z in 0..CHUNK_SIZE_XZ {
            for y in 0..=10 {
                chunk.set_voxel(Point3::new(x, y, z), VoxelId::Stone as u8, false);
            }
        }
    }
    chunk
}

const TOP_FACES: usize = 16 * 16;
const BOTTOM_FACES: usize = 16 * 16;
const SIDE_FACES: usize = 16 * 11;

#[test]
fn lone_chunk_renders_every_border_face() {
    let chunks = HashMap::new();
    let chunk = slab_chunk(Vector2::new(0, 0));

    let mesh = build_chunk_mesh(&chunk, &chunks);
    assert_eq!(
        mesh.opaque.face_count(),
        TOP_FACES + BOTTOM_FACES + 4 * SIDE_FACES
    );
}

#[test]
fn a_present_neighbor_occludes_the_shared_border() {
    let mut chunks = HashMap::new();
    chunks.insert(Vector2::new(1, 0), slab_chunk(Vector2::new(1, 0)));

    let chunk = slab_chunk(Vector2::new(0, 0));
    let mesh = build_chunk_mesh(&chunk, &chunks);

    // the +X border is covered by the neighbor; the other three stay exposed
    assert_eq!(
        mesh.opaque.face_count(),
        TOP_FACES + BOTTOM_FACES + 3 * SIDE_FACES
    );
}

#[test]
fn occlusion_culls_symmetrically_on_both_sides() {
    let mut chunks = HashMap::new();
    chunks.insert(Vector2::new(0, 0), slab_chunk(Vector2::new(0, 0)));
    chunks.insert(Vector2::new(1, 0), slab_chunk(Vector2::new(1, 0)));

    let left = build_chunk_mesh(chunks.get(&Vector2::new(0, 0)).unwrap(), &chunks);
    let right = build_chunk_mesh(chunks.get(&Vector2::new(1, 0)).unwrap(), &chunks);

    assert_eq!(left.opaque.face_count(), right.opaque.face_count());
    assert_eq!(
        left.opaque.face_count(),
        TOP_FACES + BOTTOM_FACES + 3 * SIDE_FACES
    );
}

#[test]
fn a_taller_neighbor_still_exposes_the_overhang() {
    let mut chunks = HashMap::new();

    // neighbor only reaches y 5, so our x 15 column keeps its faces above it
    let mut short_neighbor = VoxelChunk::blank(Vector2::new(1, 0));
    for x in 0..CHUNK_SIZE_XZ {
        for z in 0..CHUNK_SIZE_XZ {
            for y in 0..=5 {
                short_neighbor.set_voxel(Point3::new(x, y, z), VoxelId::Stone as u8, false);
            }
        }
    }
    chunks.insert(Vector2::new(1, 0), short_neighbor);

    let chunk = slab_chunk(Vector2::new(0, 0));
    let mesh = build_chunk_mesh(&chunk, &chunks);

    // +X side faces survive only for y 6..=10
    let expected = TOP_FACES + BOTTOM_FACES + 3 * SIDE_FACES + (16 * 5);
    assert_eq!(mesh.opaque.face_count(), expected);
}
