//! # World Module
//!
//! The `World` struct is the central owner of the voxel world: a map from
//! chunk-grid coordinate to chunk, the terrain generator, the background work
//! queues, and the current navigation-graph snapshot.
//!
//! ## Architecture
//!
//! Chunks are stored sparsely in one coordinate-keyed map; a chunk never
//! holds a reference to another chunk, so every cross-chunk query goes back
//! through this map (`ChunkLookup`). The world itself is shared between the
//! foreground and the worker behind an `MtResource`; the world is the only
//! writer of chunk voxel data, and all of that writing happens on the worker
//! thread.
//!
//! ## Rebuild flow
//!
//! `create_chunk` and `set_voxel` never do heavy work inline: they enqueue
//! the chunk coordinate on the generation/rebuild queues and return. The
//! worker drains those queues, and the caller decides whether neighbors need
//! rebuilding too (`rebuild_chunk_and_neighbors`).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use cgmath::{Point3, Vector2};
use log::info;
use thiserror::Error;

pub mod worker;

pub use worker::{ChunkMeshUpdate, ChunkWorker};

use crate::config::WorldConfig;
use crate::generation::TerrainGenerator;
use crate::nav::{self, pathfinder, NavGraph};
use crate::voxels::{ChunkLookup, Location, Voxel, VoxelChunk, VoxelId};

/// Errors from checked voxel access through the world.
#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    /// The location's local voxel coordinate is outside chunk bounds.
    #[error("location {0} is outside chunk bounds")]
    OutOfBounds(Location),

    /// No chunk exists at the location's chunk coordinate.
    #[error("no chunk at {0:?}")]
    MissingChunk(Vector2<i32>),
}

/// The two FIFO queues feeding the chunk worker.
///
/// Shared by `Arc` between the world (which enqueues) and the worker (which
/// drains). Generation is always drained fully before rebuilds.
#[derive(Debug, Default)]
pub struct WorkQueues {
    generate: Mutex<VecDeque<Vector2<i32>>>,
    rebuild: Mutex<VecDeque<Vector2<i32>>>,
}

impl WorkQueues {
    /// Enqueues a chunk for terrain generation.
    pub fn push_generate(&self, position: Vector2<i32>) {
        self.generate.lock().unwrap().push_back(position);
    }

    /// Takes the next chunk awaiting generation.
    pub fn pop_generate(&self) -> Option<Vector2<i32>> {
        self.generate.lock().unwrap().pop_front()
    }

    /// Enqueues a chunk for a mesh and navigation rebuild.
    pub fn push_rebuild(&self, position: Vector2<i32>) {
        self.rebuild.lock().unwrap().push_back(position);
    }

    /// Takes the next chunk awaiting a rebuild.
    pub fn pop_rebuild(&self) -> Option<Vector2<i32>> {
        self.rebuild.lock().unwrap().pop_front()
    }

    /// Whether both queues are empty.
    pub fn is_idle(&self) -> bool {
        self.generate.lock().unwrap().is_empty() && self.rebuild.lock().unwrap().is_empty()
    }
}

/// A voxel world composed of chunks on a 2D grid.
pub struct World {
    chunks: HashMap<Vector2<i32>, VoxelChunk>,
    generator: TerrainGenerator,
    nav: NavGraph,
    queues: Arc<WorkQueues>,
    world_size: u16,
}

impl World {
    /// Creates an empty world configured by `config`.
    pub fn new(config: WorldConfig) -> Self {
        World {
            chunks: HashMap::new(),
            generator: TerrainGenerator::from_config(&config),
            nav: NavGraph::new(),
            queues: Arc::new(WorkQueues::default()),
            world_size: config.world_size,
        }
    }

    /// The queues feeding the chunk worker.
    pub fn work_queues(&self) -> Arc<WorkQueues> {
        self.queues.clone()
    }

    /// Creates a blank chunk at the given grid position and enqueues its
    /// generation and first rebuild. Does nothing if the chunk exists.
    pub fn create_chunk(&mut self, position: Vector2<i32>) {
        if self.chunks.contains_key(&position) {
            return;
        }

        self.chunks.insert(position, VoxelChunk::blank(position));
        self.queues.push_generate(position);
        self.queues.push_rebuild(position);
    }

    /// Creates every chunk of the configured `world_size` grid, centered on
    /// the origin.
    pub fn create_all_chunks(&mut self) {
        let half = self.world_size as i32 / 2;
        for x in -half..=half {
            for y in -half..=half {
                self.create_chunk(Vector2::new(x, y));
            }
        }
        info!("enqueued {} chunks for generation", self.chunks.len());
    }

    /// Whether a chunk exists at the given grid position.
    pub fn has_chunk(&self, position: Vector2<i32>) -> bool {
        self.chunks.contains_key(&position)
    }

    /// The chunk at the given grid position, if present.
    pub fn chunk(&self, position: Vector2<i32>) -> Option<&VoxelChunk> {
        self.chunks.get(&position)
    }

    /// Mutable access to the chunk at the given grid position.
    pub fn chunk_mut(&mut self, position: Vector2<i32>) -> Option<&mut VoxelChunk> {
        self.chunks.get_mut(&position)
    }

    /// Iterates over every chunk in the world.
    pub fn all_chunks(&self) -> impl Iterator<Item = &VoxelChunk> {
        self.chunks.values()
    }

    /// The full chunk map, for whole-world passes like the graph rebuild.
    pub fn chunk_map(&self) -> &HashMap<Vector2<i32>, VoxelChunk> {
        &self.chunks
    }

    /// Reads the voxel at a location.
    pub fn get_voxel(&self, location: Location) -> Result<Voxel, WorldError> {
        if !VoxelChunk::is_voxel_in_bounds(location.voxel) {
            return Err(WorldError::OutOfBounds(location));
        }
        let chunk = self
            .chunks
            .get(&location.chunk)
            .ok_or(WorldError::MissingChunk(location.chunk))?;
        Ok(chunk.voxel(location.voxel))
    }

    /// Writes a voxel at a location and enqueues a rebuild of its chunk.
    ///
    /// Only the containing chunk is re-enqueued; edits on a chunk border
    /// also affect the neighbor's mesh, and whether to pay for that wider
    /// rebuild is the caller's call (`rebuild_chunk_and_neighbors`).
    pub fn set_voxel(&mut self, location: Location, id: u8) -> Result<(), WorldError> {
        if !VoxelChunk::is_voxel_in_bounds(location.voxel) {
            return Err(WorldError::OutOfBounds(location));
        }
        let chunk = self
            .chunks
            .get_mut(&location.chunk)
            .ok_or(WorldError::MissingChunk(location.chunk))?;

        chunk.set_voxel(location.voxel, id, false);
        self.queues.push_rebuild(location.chunk);
        Ok(())
    }

    /// Reads the voxel at a global coordinate.
    pub fn get_voxel_global(&self, position: Point3<i32>) -> Result<Voxel, WorldError> {
        self.get_voxel(Location::from_global_position(position))
    }

    /// Writes a voxel at a global coordinate, enqueueing the same rebuild as
    /// [`World::set_voxel`].
    pub fn set_voxel_global(&mut self, position: Point3<i32>, id: u8) -> Result<(), WorldError> {
        self.set_voxel(Location::from_global_position(position), id)
    }

    /// Enqueues a mesh/nav rebuild for one chunk.
    pub fn rebuild_chunk(&self, position: Vector2<i32>) {
        self.queues.push_rebuild(position);
    }

    /// Enqueues a rebuild for a chunk and its eight grid neighbors (where
    /// they exist).
    pub fn rebuild_chunk_and_neighbors(&self, position: Vector2<i32>) {
        for x in -1..=1 {
            for y in -1..=1 {
                let neighbor = position + Vector2::new(x, y);
                if self.has_chunk(neighbor) {
                    self.queues.push_rebuild(neighbor);
                }
            }
        }
    }

    /// Fills and regenerates the chunk at `position`, then re-derives its
    /// navigation data. Called by the worker; runs synchronously.
    pub fn generate_chunk(&mut self, position: Vector2<i32>) {
        let Some(chunk) = self.chunks.get_mut(&position) else {
            return;
        };
        chunk.fill_blank();
        self.generator.regenerate(chunk);
        chunk.rebuild_nav();
    }

    /// Rebuilds the global navigation graph from every chunk's current
    /// points and connections. A full re-stitch, O(chunks).
    pub fn rebuild_nav_graph(&mut self) {
        self.nav = nav::build_graph(&self.chunks);
    }

    /// Replaces the navigation graph snapshot.
    pub fn set_nav_graph(&mut self, graph: NavGraph) {
        self.nav = graph;
    }

    /// The current navigation graph snapshot.
    pub fn nav_graph(&self) -> &NavGraph {
        &self.nav
    }

    /// Finds a path between two locations over the current graph snapshot.
    pub fn find_path(
        &self,
        from: Location,
        to: Location,
    ) -> Result<Vec<Location>, pathfinder::PathError> {
        pathfinder::get_path(&self.nav, from, to)
    }

    /// Digs out the voxel at a location (sets it to void), enqueueing the
    /// same rebuild as any other edit.
    pub fn clear_voxel(&mut self, location: Location) -> Result<(), WorldError> {
        self.set_voxel(location, VoxelId::Void as u8)
    }
}

impl ChunkLookup for World {
    fn has_chunk(&self, position: Vector2<i32>) -> bool {
        self.chunks.contains_key(&position)
    }

    fn chunk(&self, position: Vector2<i32>) -> Option<&VoxelChunk> {
        self.chunks.get(&position)
    }
}
