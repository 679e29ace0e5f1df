//! # Voxel Module
//!
//! This module defines the voxel value type, the set of material ids, and the
//! static per-type lookup table used by storage, meshing, and generation.

use num_derive::FromPrimitive;

/// The underlying integer type used to represent voxel ids in memory.
pub type VoxelIdSize = u8;

/// The smallest addressable cell of the world grid.
///
/// A voxel is a plain value: a material id, a brightness byte, and a flag for
/// half-height geometry. Writes always reset `light` to maximum; the mesh
/// builder overrides it with a per-face constant at rebuild time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Voxel {
    /// Material id, `0` meaning void.
    pub id: VoxelIdSize,

    /// Brightness byte. Always written as `u8::MAX` by [`Voxel::new`].
    pub light: u8,

    /// Whether this voxel occupies only the lower half of its cell.
    pub is_slab: bool,
}

impl Voxel {
    /// Creates a voxel with the given id and slab flag, at full brightness.
    pub fn new(id: VoxelIdSize, is_slab: bool) -> Self {
        Voxel {
            id,
            light: u8::MAX,
            is_slab,
        }
    }
}

/// Enumerates all material ids in the world.
///
/// The discriminants are the on-disk/in-memory ids; `Void` is always `0`.
/// The `FromPrimitive` derive allows recovering the enum from a raw id byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum VoxelId {
    /// Empty space.
    Void = 0,

    /// Indestructible world floor.
    Hardstone,

    /// Common underground filler.
    Stone,

    /// Sub-surface soil under grass.
    Dirt,

    /// Grassy surface material.
    Grass,

    /// Beach/lowland surface material.
    Sand,

    /// Liquid filling columns up to sea level. Renders translucent.
    Water,

    /// Wooden building material.
    Planks,

    /// Masonry building material.
    Bricks,

    /// Metal ore deposit, placed by the worm walk.
    MetalOre,

    /// Coal ore deposit, placed by the growth walk.
    CoalOre,
}

impl VoxelId {
    /// Recovers a `VoxelId` from a raw id byte, `None` for unknown ids.
    pub fn from_id(id: VoxelIdSize) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }
}

/// Per-type properties looked up by voxel id.
pub struct VoxelType {
    /// How resistant the material is to being broken. Part of the type
    /// contract for tools built on top of the core; unused by it.
    pub strength: u8,

    /// Texture-atlas cell index per face, in the order
    /// front, back, right, left, bottom, top.
    pub textures: [u8; 6],

    /// Translucent voxels render in the second mesh pass and never occlude
    /// their neighbors.
    pub translucent: bool,

    /// Solid voxels occlude neighboring faces and block movement.
    pub solid: bool,
}

/// Fallback entry for ids missing from the table; behaves like void.
const UNKNOWN_TYPE: VoxelType = VoxelType {
    strength: 0,
    textures: [0; 6],
    translucent: true,
    solid: false,
};

/// The static voxel type table, keyed by raw id.
pub static VOXEL_TYPES: phf::Map<u8, VoxelType> = phf::phf_map! {
    0u8 => VoxelType { strength: 0, textures: [0; 6], translucent: true, solid: false },
    1u8 => VoxelType { strength: 255, textures: [0; 6], translucent: false, solid: true },
    2u8 => VoxelType { strength: 30, textures: [1; 6], translucent: false, solid: true },
    3u8 => VoxelType { strength: 5, textures: [2; 6], translucent: false, solid: true },
    4u8 => VoxelType { strength: 4, textures: [3, 3, 3, 3, 2, 4], translucent: false, solid: true },
    5u8 => VoxelType { strength: 5, textures: [5; 6], translucent: false, solid: true },
    6u8 => VoxelType { strength: 0, textures: [6; 6], translucent: true, solid: false },
    7u8 => VoxelType { strength: 20, textures: [7; 6], translucent: false, solid: true },
    8u8 => VoxelType { strength: 40, textures: [8; 6], translucent: false, solid: true },
    9u8 => VoxelType { strength: 100, textures: [9; 6], translucent: false, solid: true },
    10u8 => VoxelType { strength: 70, textures: [10; 6], translucent: false, solid: true },
};

/// Looks up the type entry for a raw id, falling back to a void-like entry
/// for ids the table does not know.
pub fn voxel_type(id: VoxelIdSize) -> &'static VoxelType {
    VOXEL_TYPES.get(&id).unwrap_or(&UNKNOWN_TYPE)
}

/// Whether the given id is solid. Void is never solid.
pub fn is_solid_id(id: VoxelIdSize) -> bool {
    id > 0 && voxel_type(id).solid
}

/// Whether the given id is translucent. Void counts as translucent.
pub fn is_translucent_id(id: VoxelIdSize) -> bool {
    id == 0 || voxel_type(id).translucent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_is_translucent_and_not_solid() {
        assert!(is_translucent_id(VoxelId::Void as u8));
        assert!(!is_solid_id(VoxelId::Void as u8));
    }

    #[test]
    fn water_is_translucent_and_not_solid() {
        assert!(is_translucent_id(VoxelId::Water as u8));
        assert!(!is_solid_id(VoxelId::Water as u8));
    }

    #[test]
    fn stone_is_solid_and_opaque() {
        assert!(is_solid_id(VoxelId::Stone as u8));
        assert!(!is_translucent_id(VoxelId::Stone as u8));
    }

    #[test]
    fn unknown_ids_behave_like_void() {
        assert!(!is_solid_id(200));
        assert!(is_translucent_id(200));
        assert_eq!(voxel_type(200).strength, 0);
    }

    #[test]
    fn id_round_trips_through_enum() {
        for id in 0..=10u8 {
            let parsed = VoxelId::from_id(id).unwrap();
            assert_eq!(parsed as u8, id);
        }
        assert!(VoxelId::from_id(11).is_none());
    }

    #[test]
    fn table_covers_every_enum_id() {
        assert_eq!(VOXEL_TYPES.len(), 11);
        for id in 0..=10u8 {
            assert!(VOXEL_TYPES.contains_key(&id));
        }
        assert_eq!(voxel_type(VoxelId::Hardstone as u8).strength, u8::MAX);
    }
}
