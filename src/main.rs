//! # Voxel World Demo Entry Point
//!
//! Builds a full world from the settings file, runs the chunk worker until
//! every chunk is generated and meshed, then issues a sample path query and
//! logs what came out. Useful for eyeballing generation output and timing
//! without a renderer attached.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

use std::thread;
use std::time::{Duration, Instant};

use log::info;

use voxel_world::config::WorldConfig;
use voxel_world::core::MtResource;
use voxel_world::nav::pathfinder;
use voxel_world::world::{ChunkWorker, World};
use voxel_world::Location;

fn main() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    let config = WorldConfig::load_or_default("settings.json");
    info!(
        "world seed {}, {}x{} chunks",
        config.seed, config.world_size, config.world_size
    );

    let world = MtResource::new(World::new(config));
    world.get_mut().create_all_chunks();

    let queues = world.get().work_queues();
    let mut worker = ChunkWorker::spawn(world.clone());

    let started = Instant::now();
    let mut meshes_received = 0;
    while !queues.is_idle() {
        meshes_received += worker.poll_mesh_updates().len();
        thread::sleep(Duration::from_millis(10));
    }

    // the last dequeued chunk may still be in flight; drain until quiet
    loop {
        let late = worker.poll_mesh_updates().len();
        meshes_received += late;
        if late == 0 && queues.is_idle() {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }

    info!(
        "generated {} chunks and received {} meshes in {:.2?}",
        world.get().all_chunks().count(),
        meshes_received,
        started.elapsed()
    );

    let world_guard = world.get();
    let graph = world_guard.nav_graph();
    info!("nav graph holds {} walkable points", graph.len());

    let endpoints = (graph.points().min(), graph.points().max());
    if let (Some(from_id), Some(to_id)) = endpoints {
        let from = Location::from_packed(from_id);
        let to = Location::from_packed(to_id);
        match pathfinder::get_path(graph, from, to) {
            Ok(path) => info!("sample path {} -> {}: {} steps", from, to, path.len()),
            Err(error) => info!("sample path query failed: {error}"),
        }
    }
    drop(world_guard);

    worker.stop();
}
