//! Vertex format for chunk meshes.

use cgmath::{Vector2, Vector3};

/// A vertex of a chunk surface mesh.
///
/// Carries the world-space position, the atlas texture coordinates, and the
/// per-face brightness in its own scalar channel so a shader can read it
/// independently of material color.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Brightness: f32 (4 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space.
    pub position: [f32; 3],

    /// Normalized atlas texture coordinates.
    pub tex_coords: [f32; 2],

    /// Face brightness, normalized to `[0, 1]`.
    pub brightness: f32,
}

impl Vertex {
    /// Creates a vertex from a world position, atlas coordinates, and a raw
    /// brightness byte.
    pub fn new(position: Vector3<f32>, tex_coords: Vector2<f32>, light: u8) -> Self {
        Vertex {
            position: [position.x, position.y, position.z],
            tex_coords: [tex_coords.x, tex_coords.y],
            brightness: light as f32 / u8::MAX as f32,
        }
    }
}
