//! # Generation Module
//!
//! Procedural terrain: a layered-noise height pass filling each column of a
//! chunk, followed by stochastic ore placement over the whole chunk.
//!
//! ## Height pass
//!
//! Every column samples a base noise field at its world coordinate, stacks
//! the configured additive and subtractive layers on top, and rescales the
//! result into playable range. The column is then filled bottom-to-top:
//! an indestructible floor at y 0, stone up to the sub-surface band, a few
//! rows of dirt (or sand under sand), the surface material at the top row,
//! and water above the surface up to sea level.
//!
//! ## Ore pass
//!
//! Two walk shapes place deposits after the height pass. The worm walk steps
//! through the 6-connected neighborhood from wherever it currently stands;
//! the growth walk picks its next origin from the back half of the positions
//! it has already placed and expands through the 18-connected neighborhood,
//! biasing deposits outward from their interior. Both only overwrite stone
//! and other ores, and write their voxels only once a walk has finished.

use cgmath::{Point3, Vector3};
use log::debug;

pub mod noise;
pub mod ores;

use crate::config::WorldConfig;
use crate::voxels::chunk::{CHUNK_SIZE_XZ, CHUNK_SIZE_Y};
use crate::voxels::location::Location;
use crate::voxels::voxel::VoxelId;
use crate::voxels::VoxelChunk;
use noise::{Gradient, NoiseLayer};
use ores::OreSpec;

/// Columns are flooded with water above the surface up to this height.
pub const SEA_LEVEL: i32 = 18;

/// Column heights at or below this (plus jitter) surface as sand.
const SAND_MAX_HEIGHT: i32 = 19;
/// Column heights at or below this (plus jitter) surface as grass.
const GRASS_MAX_HEIGHT: i32 = 33;

/// Worm deposits per chunk (inclusive range).
const WORM_DEPOSITS: (i32, i32) = (3, 5);
/// Growth deposits per chunk (inclusive range).
const GROWTH_DEPOSITS: (i32, i32) = (5, 8);

/// A worm walk gives up after this many consecutive rejected steps.
const WORM_ABORT_TRIES: u32 = 10;
/// A growth walk gives up after this many consecutive rejected steps.
const GROWTH_ABORT_TRIES: u32 = 50;

const ORTHOGONAL_DIRECTIONS: [Vector3<i32>; 6] = [
    Vector3::new(0, 0, 1),
    Vector3::new(0, 0, -1),
    Vector3::new(0, -1, 0),
    Vector3::new(0, 1, 0),
    Vector3::new(-1, 0, 0),
    Vector3::new(1, 0, 0),
];

/// The 18-connected (face and edge) neighborhood the growth walk steps over.
const GROWTH_DIRECTIONS: [Vector3<i32>; 18] = [
    Vector3::new(0, 0, 1),
    Vector3::new(0, 0, -1),
    Vector3::new(0, -1, 1),
    Vector3::new(0, 1, 1),
    Vector3::new(0, -1, -1),
    Vector3::new(0, 1, -1),
    Vector3::new(0, -1, 0),
    Vector3::new(0, 1, 0),
    Vector3::new(-1, -1, 0),
    Vector3::new(1, -1, 0),
    Vector3::new(-1, 1, 0),
    Vector3::new(1, 1, 0),
    Vector3::new(-1, 0, 0),
    Vector3::new(1, 0, 0),
    Vector3::new(-1, 0, 1),
    Vector3::new(1, 0, 1),
    Vector3::new(-1, 0, -1),
    Vector3::new(1, 0, -1),
];

/// Fills blank chunks with terrain.
///
/// Owns every source of randomness used during generation (the seeded noise
/// layers and one `fastrand::Rng`), so a generator built from a given config
/// produces the same world every time.
pub struct TerrainGenerator {
    base: NoiseLayer,
    additive: Vec<NoiseLayer>,
    subtractive: Vec<NoiseLayer>,
    island: Option<Gradient>,
    world_extent: f32,
    generate_slabs: bool,
    rng: fastrand::Rng,
}

impl TerrainGenerator {
    /// Builds a generator from the world configuration.
    pub fn from_config(config: &WorldConfig) -> Self {
        let seed = config.seed as u32;

        TerrainGenerator {
            base: NoiseLayer::new(seed, config.base_frequency),
            additive: config
                .additive_frequencies
                .iter()
                .enumerate()
                .map(|(index, &frequency)| {
                    NoiseLayer::new(seed.wrapping_add(index as u32 + 1), frequency)
                })
                .collect(),
            subtractive: config
                .subtractive_frequencies
                .iter()
                .enumerate()
                .map(|(index, &frequency)| {
                    NoiseLayer::new(seed.wrapping_add(0x8000 + index as u32), frequency)
                })
                .collect(),
            island: config
                .island_mode
                .then(|| Gradient::new(config.island_gradient.clone())),
            world_extent: (config.world_size as i32 * CHUNK_SIZE_XZ) as f32,
            generate_slabs: config.generate_slabs,
            rng: fastrand::Rng::with_seed(config.seed),
        }
    }

    /// Natural generation first pass: fills the chunk column by column, then
    /// runs the ore walks over it.
    pub fn regenerate(&mut self, chunk: &mut VoxelChunk) {
        for x in 0..CHUNK_SIZE_XZ {
            for z in 0..CHUNK_SIZE_XZ {
                self.generate_column(chunk, x, z);
            }
        }

        let worm_count = self.rng.i32(WORM_DEPOSITS.0..=WORM_DEPOSITS.1);
        for _ in 0..worm_count {
            self.make_ore_worm(chunk, &ores::METAL);
        }

        let growth_count = self.rng.i32(GROWTH_DEPOSITS.0..=GROWTH_DEPOSITS.1);
        for _ in 0..growth_count {
            self.make_ore_grow(chunk, &ores::COAL);
        }

        debug!(
            "[chunk @ ({}, {})] generated with {} worm and {} growth deposits",
            chunk.position.x, chunk.position.y, worm_count, growth_count
        );
    }

    fn column_height(&self, chunk: &VoxelChunk, x: i32, z: i32) -> f64 {
        let world_x = (x + (chunk.position.x * CHUNK_SIZE_XZ)) as f64;
        let world_z = (z + (chunk.position.y * CHUNK_SIZE_XZ)) as f64;
        let size_y = CHUNK_SIZE_Y as f64;

        let mut height = ((self.base.sample(world_x, world_z) + 1.0) / 2.0) * (size_y * 0.75);
        height *= 2.0;

        for layer in &self.additive {
            height = height.max(height + (layer.sample(world_x, world_z) * size_y));
        }

        for layer in &self.subtractive {
            height = height.min(height - (layer.sample(world_x, world_z) * (size_y * 1.5)));
        }

        height /= 4.0;
        height += size_y / 4.0;

        if let Some(gradient) = &self.island {
            let at = Location::new(chunk.position, Point3::new(x, 0, z));
            let global = at.global_position();
            let distance = (((global.x * global.x) + (global.z * global.z)) as f32).sqrt();
            height -= (gradient.sample(distance / self.world_extent) * (CHUNK_SIZE_Y as f32 / 2.0))
                as f64;
        }

        height
    }

    fn generate_column(&mut self, chunk: &mut VoxelChunk, x: i32, z: i32) {
        let height = self.column_height(chunk, x, z);
        let top = height.floor() as i32;
        let fraction = height - height.floor();
        let is_slab = (fraction < 0.5) && self.generate_slabs;

        let surface = if height <= (SAND_MAX_HEIGHT + self.rng.i32(0..=1)) as f64 {
            VoxelId::Sand
        } else if height <= (GRASS_MAX_HEIGHT + self.rng.i32(-1..=1)) as f64 {
            VoxelId::Grass
        } else {
            VoxelId::Stone
        };

        let subsurface_depth = self.rng.i32(3..=5);

        for y in 0..CHUNK_SIZE_Y {
            let position = Point3::new(x, y, z);

            if y == 0 {
                chunk.set_voxel(position, VoxelId::Hardstone as u8, false);
                continue;
            }
            if y == 1 && top <= 0 {
                chunk.set_voxel(position, surface as u8, false);
                continue;
            }
            if y > top {
                if y <= SEA_LEVEL {
                    chunk.set_voxel(position, VoxelId::Water as u8, false);
                }
                continue;
            }

            if surface == VoxelId::Grass || surface == VoxelId::Sand {
                if y == top {
                    chunk.set_voxel(position, surface as u8, is_slab);
                } else if y >= top - subsurface_depth {
                    let filler = if surface == VoxelId::Sand {
                        VoxelId::Sand
                    } else {
                        VoxelId::Dirt
                    };
                    chunk.set_voxel(position, filler as u8, false);
                } else {
                    chunk.set_voxel(position, VoxelId::Stone as u8, false);
                }
            } else {
                chunk.set_voxel(position, surface as u8, false);
            }
        }
    }

    fn random_walk_start(&mut self, spec: &OreSpec) -> Point3<i32> {
        Point3::new(
            self.rng.i32(0..CHUNK_SIZE_XZ),
            self.rng.i32(spec.y_range.0..=spec.y_range.1),
            self.rng.i32(0..CHUNK_SIZE_XZ),
        )
    }

    /// Places one deposit by stepping a worm through orthogonal neighbors.
    fn make_ore_worm(&mut self, chunk: &mut VoxelChunk, spec: &OreSpec) {
        let mut to_spawn = ores::weighted_size(spec, &mut self.rng);
        let mut deposit: Vec<Point3<i32>> = Vec::with_capacity(to_spawn as usize);
        let mut at = self.random_walk_start(spec);

        let mut tries = 0;
        while to_spawn > 0 {
            if tries >= WORM_ABORT_TRIES {
                break;
            }

            if !VoxelChunk::is_voxel_in_bounds(at)
                || deposit.contains(&at)
                || !ores::allowed_to_overwrite(chunk.voxel(at).id)
            {
                tries += 1;
            } else {
                deposit.push(at);
                to_spawn -= 1;
                tries = 0;
            }

            at = at + ORTHOGONAL_DIRECTIONS[self.rng.usize(0..ORTHOGONAL_DIRECTIONS.len())];
        }

        for position in deposit {
            chunk.set_voxel(position, spec.voxel as u8, false);
        }
    }

    /// Places one deposit by growing outward from already-placed positions.
    ///
    /// The next origin is drawn from the back half of the deposit so far,
    /// which biases growth away from the oldest positions.
    fn make_ore_grow(&mut self, chunk: &mut VoxelChunk, spec: &OreSpec) {
        let mut to_spawn = ores::weighted_size(spec, &mut self.rng);
        let mut deposit: Vec<Point3<i32>> = Vec::with_capacity(to_spawn as usize);
        let mut at = self.random_walk_start(spec);

        let mut tries = 0;
        while to_spawn > 0 {
            if tries >= GROWTH_ABORT_TRIES {
                break;
            }

            if !VoxelChunk::is_voxel_in_bounds(at)
                || deposit.contains(&at)
                || !ores::allowed_to_overwrite(chunk.voxel(at).id)
            {
                tries += 1;
            } else {
                deposit.push(at);
                to_spawn -= 1;
                tries = 0;
            }

            let origin = if deposit.is_empty() {
                at
            } else {
                deposit[self.rng.usize(deposit.len() / 2..deposit.len())]
            };
            at = origin + GROWTH_DIRECTIONS[self.rng.usize(0..GROWTH_DIRECTIONS.len())];
        }

        for position in deposit {
            chunk.set_voxel(position, spec.voxel as u8, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector2;

    use super::*;
    use crate::voxels::voxel::{voxel_type, VoxelId};

    fn test_config(seed: u64) -> WorldConfig {
        WorldConfig {
            seed,
            world_size: 3,
            ..WorldConfig::default()
        }
    }

    fn generated_chunk(seed: u64, position: Vector2<i32>) -> VoxelChunk {
        let mut generator = TerrainGenerator::from_config(&test_config(seed));
        let mut chunk = VoxelChunk::blank(position);
        generator.regenerate(&mut chunk);
        chunk
    }

    #[test]
    fn floor_row_is_always_hardstone() {
        let chunk = generated_chunk(1, Vector2::new(0, 0));
        for x in 0..CHUNK_SIZE_XZ {
            for z in 0..CHUNK_SIZE_XZ {
                assert_eq!(
                    chunk.voxel(Point3::new(x, 0, z)).id,
                    VoxelId::Hardstone as u8
                );
            }
        }
    }

    #[test]
    fn no_air_survives_below_sea_level() {
        // everything up to the surface is solid, and above it the water fill
        // covers the rest of the sea-level band
        let chunk = generated_chunk(2, Vector2::new(0, 0));
        for x in 0..CHUNK_SIZE_XZ {
            for z in 0..CHUNK_SIZE_XZ {
                for y in 0..=SEA_LEVEL {
                    let id = chunk.voxel(Point3::new(x, y, z)).id;
                    assert_ne!(id, 0, "air at ({x}, {y}, {z}) under sea level");
                }
            }
        }
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let a = generated_chunk(42, Vector2::new(1, -2));
        let b = generated_chunk(42, Vector2::new(1, -2));
        for x in 0..CHUNK_SIZE_XZ {
            for y in 0..CHUNK_SIZE_Y {
                for z in 0..CHUNK_SIZE_XZ {
                    let position = Point3::new(x, y, z);
                    assert_eq!(a.voxel(position), b.voxel(position));
                }
            }
        }
    }

    #[test]
    fn different_chunks_differ() {
        let a = generated_chunk(42, Vector2::new(0, 0));
        let b = generated_chunk(42, Vector2::new(5, 5));
        let mut any_difference = false;
        'outer: for x in 0..CHUNK_SIZE_XZ {
            for y in 0..CHUNK_SIZE_Y {
                for z in 0..CHUNK_SIZE_XZ {
                    let position = Point3::new(x, y, z);
                    if a.voxel(position).id != b.voxel(position).id {
                        any_difference = true;
                        break 'outer;
                    }
                }
            }
        }
        assert!(any_difference);
    }

    #[test]
    fn ore_walks_leave_the_floor_and_surface_alone() {
        // ore may only overwrite stone and other ore, so the hardstone floor
        // survives every walk and some ore lands in the stone body
        let chunk = generated_chunk(7, Vector2::new(0, 0));

        let mut ore_count = 0;
        for x in 0..CHUNK_SIZE_XZ {
            for y in 0..CHUNK_SIZE_Y {
                for z in 0..CHUNK_SIZE_XZ {
                    let id = chunk.voxel(Point3::new(x, y, z)).id;
                    if id == VoxelId::MetalOre as u8 || id == VoxelId::CoalOre as u8 {
                        ore_count += 1;
                    }
                    if y == 0 {
                        assert_eq!(id, VoxelId::Hardstone as u8);
                    }
                }
            }
        }

        assert!(ore_count > 0, "no ore placed at all");
    }

    #[test]
    fn surface_voxels_are_solid_materials() {
        let chunk = generated_chunk(11, Vector2::new(2, 3));
        for x in 0..CHUNK_SIZE_XZ {
            for z in 0..CHUNK_SIZE_XZ {
                for y in (0..CHUNK_SIZE_Y).rev() {
                    let id = chunk.voxel(Point3::new(x, y, z)).id;
                    if id != 0 && id != VoxelId::Water as u8 {
                        assert!(voxel_type(id).solid, "non-solid surface id {id}");
                        break;
                    }
                }
            }
        }
    }

    #[test]
    fn island_mode_lowers_far_columns() {
        let mut config = test_config(9);
        config.island_mode = true;
        config.additive_frequencies.clear();
        config.subtractive_frequencies.clear();

        let generator = TerrainGenerator::from_config(&config);
        let near = generator.column_height(&VoxelChunk::blank(Vector2::new(0, 0)), 0, 0);

        let far_chunk = VoxelChunk::blank(Vector2::new(config.world_size as i32, 0));
        let far = generator.column_height(&far_chunk, CHUNK_SIZE_XZ - 1, 0);

        let mut flat = test_config(9);
        flat.additive_frequencies.clear();
        flat.subtractive_frequencies.clear();
        let flat_generator = TerrainGenerator::from_config(&flat);
        let far_without_island = flat_generator.column_height(
            &VoxelChunk::blank(Vector2::new(config.world_size as i32, 0)),
            CHUNK_SIZE_XZ - 1,
            0,
        );

        assert!(far < far_without_island);

        // the origin column sits at gradient offset zero and keeps its height
        let near_without_island =
            flat_generator.column_height(&VoxelChunk::blank(Vector2::new(0, 0)), 0, 0);
        assert_eq!(near, near_without_island);
    }
}
