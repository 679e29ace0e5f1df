//! # Navigation Module
//!
//! Assembles the per-chunk walkable points and connections into one global
//! graph, stitching points across shared chunk borders, and runs path
//! queries over the result.
//!
//! Each chunk computes its interior graph independently (see
//! `VoxelChunk::rebuild_nav`); the border stitch is what lets a path cross
//! from one chunk into the next. The full graph is rebuilt from scratch
//! whenever any chunk's navigation data changes. That rebuild is O(chunks) —
//! acceptable off the per-frame path, but it is the scaling limit of this
//! design.

use std::collections::HashMap;

use cgmath::{Point3, Vector2};

pub mod graph;
pub mod pathfinder;

pub use graph::NavGraph;

use crate::voxels::chunk::{CHUNK_SIZE_XZ, CHUNK_SIZE_Y};
use crate::voxels::location::{pack, Location};
use crate::voxels::VoxelChunk;

/// Builds the global navigation graph from every chunk in the map.
///
/// Adds each chunk's points and local connections first, then sews the four
/// cardinal borders of every chunk pair. Connections whose endpoints did not
/// both become points are dropped silently.
pub fn build_graph(chunks: &HashMap<Vector2<i32>, VoxelChunk>) -> NavGraph {
    let mut graph = NavGraph::new();

    for chunk in chunks.values() {
        for &point in &chunk.nav_points {
            let location = Location::from_packed(point);
            let global = location.global_position();
            graph.add_point(
                point,
                Point3::new(global.x as f32, global.y as f32, global.z as f32),
            );
        }
    }

    for chunk in chunks.values() {
        for &(from, to) in &chunk.nav_connections {
            graph.connect(from, to);
        }
    }

    for chunk in chunks.values() {
        for (direction, our_edge, their_edge) in [
            (Vector2::new(1, 0), CHUNK_SIZE_XZ - 1, 0),
            (Vector2::new(-1, 0), 0, CHUNK_SIZE_XZ - 1),
            (Vector2::new(0, 1), CHUNK_SIZE_XZ - 1, 0),
            (Vector2::new(0, -1), 0, CHUNK_SIZE_XZ - 1),
        ] {
            let neighbor_position = chunk.position + direction;
            if !chunks.contains_key(&neighbor_position) {
                continue;
            }

            let along_x = direction.x != 0;
            stitch_border(
                &mut graph,
                chunk.position,
                neighbor_position,
                along_x,
                our_edge,
                their_edge,
            );
        }
    }

    graph
}

/// Connects boundary points of one chunk to the vertically adjacent points
/// (y - 1, y, y + 1) on the facing column of its neighbor.
fn stitch_border(
    graph: &mut NavGraph,
    chunk: Vector2<i32>,
    neighbor: Vector2<i32>,
    along_x: bool,
    our_edge: i32,
    their_edge: i32,
) {
    for y in 0..CHUNK_SIZE_Y {
        for step in 0..CHUNK_SIZE_XZ {
            let (x, z) = if along_x {
                (our_edge, step)
            } else {
                (step, our_edge)
            };

            let point = pack(x as u8, y as u8, z as u8, chunk.x as i16, chunk.y as i16);
            if !graph.has_point(point) {
                continue;
            }

            for offset in -1..=1 {
                let other_y = y + offset;
                if other_y < 0 || other_y >= CHUNK_SIZE_Y {
                    continue;
                }

                let (other_x, other_z) = if along_x {
                    (their_edge, step)
                } else {
                    (step, their_edge)
                };

                let other = pack(
                    other_x as u8,
                    other_y as u8,
                    other_z as u8,
                    neighbor.x as i16,
                    neighbor.y as i16,
                );

                if graph.has_point(other) {
                    graph.connect(point, other);
                }
            }
        }
    }
}
