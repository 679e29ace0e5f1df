#![warn(missing_docs)]

//! # Voxel World
//!
//! A chunked voxel world engine core: voxel storage and queries, procedural
//! terrain generation, surface-mesh synthesis, and a walkable navigation
//! graph with pathfinding across chunk boundaries.
//!
//! ## Key Modules
//!
//! * `voxels` - The voxel data model: chunks, the type table, and world
//!   addressing
//! * `generation` - Layered-noise terrain plus stochastic ore placement
//! * `meshing` - Two-pass face-culled mesh building with atlas UVs and
//!   per-face brightness
//! * `nav` - Navigation-graph assembly, border stitching, and A* search
//! * `world` - The owning `World` struct and the background chunk worker
//! * `config` - Versioned JSON world settings
//!
//! ## Architecture
//!
//! The `World` owns every chunk in one coordinate-keyed map; chunks never
//! reference each other and all cross-chunk queries go back through that
//! map. Heavy work (generation, meshing, navigation rebuilds) runs on a
//! single background worker thread fed by two FIFO queues, and finished
//! meshes return to the caller over a bounded channel. Pathfinding reads an
//! immutable snapshot of the stitched graph, trading locking for eventual
//! consistency.
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_world::config::WorldConfig;
//! use voxel_world::core::MtResource;
//! use voxel_world::world::{ChunkWorker, World};
//!
//! let world = MtResource::new(World::new(WorldConfig::default()));
//! world.get_mut().create_all_chunks();
//!
//! let worker = ChunkWorker::spawn(world.clone());
//! // each frame:
//! for update in worker.poll_mesh_updates() {
//!     // upload update.mesh for chunk update.position
//! }
//! ```

pub mod config;
pub mod core;
pub mod generation;
pub mod meshing;
pub mod nav;
pub mod voxels;
pub mod world;

pub use meshing::{ChunkMesh, MeshSurface, Vertex};
pub use nav::NavGraph;
pub use voxels::{Location, Voxel, VoxelChunk, VoxelId, CHUNK_SIZE_XZ, CHUNK_SIZE_Y};
pub use world::{ChunkWorker, World};
