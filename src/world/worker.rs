//! # Chunk Worker
//!
//! One dedicated background thread owns all heavy chunk work: terrain
//! generation, mesh building, per-chunk navigation extraction, and the
//! global graph re-stitch. The foreground only enqueues coordinates on the
//! world's work queues and later drains finished meshes from a bounded
//! channel, so the simulation/render loop never blocks on generation.
//!
//! ## Loop shape
//!
//! Each cycle sleeps briefly, drains the generation queue fully, then drains
//! the rebuild queue. Meshing runs under a read lock of the world (it only
//! reads voxels, including the neighbors' for border occlusion); the nav
//! extraction and the graph swap take short write locks. Whenever a cycle
//! did any work the global navigation graph is rebuilt from scratch and
//! swapped in as the new snapshot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cgmath::Vector2;
use log::{info, warn};

use super::{WorkQueues, World};
use crate::core::MtResource;
use crate::meshing::{self, ChunkMesh};
use crate::nav;

/// How many finished meshes the handoff channel buffers before the worker
/// blocks waiting for the foreground to drain it.
pub const MESH_CHANNEL_CAPACITY: usize = 256;

/// How long the worker sleeps between passes over empty queues.
const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// A finished mesh crossing back to the foreground.
pub struct ChunkMeshUpdate {
    /// Grid position of the chunk the mesh belongs to.
    pub position: Vector2<i32>,
    /// The freshly built mesh, ready for upload.
    pub mesh: ChunkMesh,
}

/// Handle to the background chunk-processing thread.
///
/// Dropping the handle stops the worker. Finished meshes are collected with
/// [`ChunkWorker::poll_mesh_updates`], typically once per frame.
pub struct ChunkWorker {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
    mesh_receiver: Receiver<ChunkMeshUpdate>,
}

impl ChunkWorker {
    /// Spawns the worker thread against a shared world.
    pub fn spawn(world: MtResource<World>) -> Self {
        let (mesh_sender, mesh_receiver) = sync_channel(MESH_CHANNEL_CAPACITY);
        let running = Arc::new(AtomicBool::new(true));
        let queues = world.get().work_queues();

        let flag = running.clone();
        let thread = thread::spawn(move || {
            worker_loop(world, queues, mesh_sender, flag);
        });

        ChunkWorker {
            running,
            thread: Some(thread),
            mesh_receiver,
        }
    }

    /// Drains every mesh the worker has finished since the last poll.
    pub fn poll_mesh_updates(&self) -> Vec<ChunkMeshUpdate> {
        let mut updates = Vec::new();
        while let Ok(update) = self.mesh_receiver.try_recv() {
            updates.push(update);
        }
        updates
    }

    /// Stops the worker and waits for its thread to finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ChunkWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop(
    world: MtResource<World>,
    queues: Arc<WorkQueues>,
    mesh_sender: SyncSender<ChunkMeshUpdate>,
    running: Arc<AtomicBool>,
) {
    info!("chunk worker started");

    while running.load(Ordering::Relaxed) {
        thread::sleep(IDLE_SLEEP);

        let mut worked = false;

        while let Some(position) = queues.pop_generate() {
            world.get_mut().generate_chunk(position);
            worked = true;
        }

        while let Some(position) = queues.pop_rebuild() {
            let mesh = {
                let world = world.get();
                let Some(chunk) = world.chunk(position) else {
                    warn!(
                        "rebuild requested for missing chunk ({}, {})",
                        position.x, position.y
                    );
                    continue;
                };
                meshing::build_chunk_mesh(chunk, &*world)
            };

            if let Some(chunk) = world.get_mut().chunk_mut(position) {
                chunk.rebuild_nav();
            }

            if mesh_sender.send(ChunkMeshUpdate { position, mesh }).is_err() {
                info!("mesh consumer disconnected, chunk worker stopping");
                return;
            }
            worked = true;
        }

        if worked {
            let graph = nav::build_graph(world.get().chunk_map());
            world.get_mut().set_nav_graph(graph);
        }
    }

    info!("chunk worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    /// Polls the worker until it has delivered `count` meshes, with a
    /// generous timeout for slow machines.
    fn wait_for_updates(worker: &ChunkWorker, count: usize) -> Vec<ChunkMeshUpdate> {
        let mut updates = Vec::new();
        for _ in 0..10_000 {
            updates.extend(worker.poll_mesh_updates());
            if updates.len() >= count {
                return updates;
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("worker delivered {} of {} meshes", updates.len(), count);
    }

    fn wait_for_nav_graph(world: &MtResource<World>) {
        for _ in 0..10_000 {
            if !world.get().nav_graph().is_empty() {
                return;
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("worker never published a nav graph");
    }

    #[test]
    fn worker_generates_and_meshes_created_chunks() {
        let world = MtResource::new(World::new(WorldConfig {
            seed: 3,
            world_size: 1,
            ..WorldConfig::default()
        }));
        world.get_mut().create_chunk(Vector2::new(0, 0));

        let mut worker = ChunkWorker::spawn(world.clone());

        let updates = wait_for_updates(&worker, 1);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].position, Vector2::new(0, 0));
        assert!(!updates[0].mesh.opaque.is_empty());

        wait_for_nav_graph(&world);

        worker.stop();
    }

    #[test]
    fn edits_trigger_new_mesh_updates() {
        use cgmath::Point3;

        use crate::voxels::{Location, VoxelId};

        let world = MtResource::new(World::new(WorldConfig {
            seed: 3,
            world_size: 1,
            ..WorldConfig::default()
        }));
        world.get_mut().create_chunk(Vector2::new(0, 0));

        let mut worker = ChunkWorker::spawn(world.clone());
        wait_for_updates(&worker, 1);

        let location = Location::new(Vector2::new(0, 0), Point3::new(8, 40, 8));
        world
            .get_mut()
            .set_voxel(location, VoxelId::Bricks as u8)
            .unwrap();

        let second = wait_for_updates(&worker, 1);
        assert_eq!(second[0].position, Vector2::new(0, 0));

        worker.stop();
    }
}
