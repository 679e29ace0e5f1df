//! Ore deposit specifications and the weighted-random primitives behind them.

use crate::voxels::voxel::{VoxelId, VoxelIdSize};

/// Describes one kind of ore deposit: which voxel it places, the vertical
/// band it may appear in, and a weighted distribution over deposit sizes.
pub struct OreSpec {
    /// The voxel id written for every accepted position of a deposit.
    pub voxel: VoxelId,

    /// Inclusive Y range deposits may start in.
    pub y_range: (i32, i32),

    /// Weighted `(size, weight)` table the deposit size is drawn from.
    pub sizes: &'static [(i32, f32)],
}

/// Metal ore: small deposits placed by the worm walk.
pub const METAL: OreSpec = OreSpec {
    voxel: VoxelId::MetalOre,
    y_range: (1, 27),
    sizes: &[(3, 0.50), (4, 0.45), (5, 0.30), (6, 0.15), (7, 0.05)],
};

/// Coal ore: larger deposits placed by the growth walk.
pub const COAL: OreSpec = OreSpec {
    voxel: VoxelId::CoalOre,
    y_range: (1, 27),
    sizes: &[(23, 0.50), (24, 0.45), (25, 0.30), (26, 0.15), (27, 0.05)],
};

/// Whether an ore walk may overwrite a voxel with the given id: stone, plus
/// any other ore's placeholder.
pub fn allowed_to_overwrite(id: VoxelIdSize) -> bool {
    id == VoxelId::Stone as u8 || id == VoxelId::MetalOre as u8 || id == VoxelId::CoalOre as u8
}

/// Draws a deposit size from the spec's weighted table.
///
/// The draw walks the table accumulating weights until the accumulated weight
/// passes a uniform pick over the total, so weights need not sum to one.
pub fn weighted_size(spec: &OreSpec, rng: &mut fastrand::Rng) -> i32 {
    let total: f32 = spec.sizes.iter().map(|(_, weight)| weight).sum();
    let pick = rng.f32() * total;

    let mut accumulated = 0.0;
    for &(size, weight) in spec.sizes {
        accumulated += weight;
        if accumulated > pick {
            return size;
        }
    }

    spec.sizes[spec.sizes.len() - 1].0
}
