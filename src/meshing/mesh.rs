//! Mesh data structures for chunk surfaces.
//!
//! A chunk rebuild produces one [`ChunkMesh`]: an opaque surface and, when
//! the chunk contains translucent voxels, a second translucent surface. Each
//! surface is an indexed triangle list of [`Vertex`] values ready for an
//! external renderer to upload.

use cgmath::{Vector2, Vector3};

use super::vertex::Vertex;

/// One material surface of a chunk mesh: an indexed triangle list.
#[derive(Debug, Default)]
pub struct MeshSurface {
    /// The vertex data for this surface.
    pub vertices: Vec<Vertex>,
    /// The index data for this surface, three indices per triangle.
    pub indices: Vec<u32>,
}

impl MeshSurface {
    /// Creates a new, empty surface.
    pub fn new() -> Self {
        MeshSurface::default()
    }

    /// Whether this surface holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The number of quads emitted into this surface.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Appends one quad.
    ///
    /// `corners` are the a, b, c, d face corners (a/b upper edge, c/d lower
    /// edge), `tex_coords` the matching atlas coordinates. Two triangles are
    /// emitted, (b, c, a) and (b, d, c), matching the cube winding so every
    /// face reads counter-clockwise from outside.
    pub fn push_face(
        &mut self,
        corners: [Vector3<f32>; 4],
        tex_coords: [Vector2<f32>; 4],
        light: u8,
    ) {
        let base = self.vertices.len() as u32;

        for (corner, uv) in corners.into_iter().zip(tex_coords) {
            self.vertices.push(Vertex::new(corner, uv, light));
        }

        self.indices
            .extend_from_slice(&[base + 1, base + 2, base, base + 1, base + 3, base + 2]);
    }
}

/// A complete mesh for one chunk.
///
/// The translucent surface is omitted entirely when the translucent pass
/// produced no geometry, so a fully opaque chunk carries exactly one surface.
#[derive(Debug, Default)]
pub struct ChunkMesh {
    /// Geometry of every non-translucent voxel.
    pub opaque: MeshSurface,
    /// Geometry of the translucent voxels, if any.
    pub translucent: Option<MeshSurface>,
}

impl ChunkMesh {
    /// The number of material surfaces this mesh carries (0, 1, or 2).
    pub fn surface_count(&self) -> usize {
        let mut count = 0;
        if !self.opaque.is_empty() {
            count += 1;
        }
        if self.translucent.is_some() {
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_face_emits_four_vertices_and_two_triangles() {
        let mut surface = MeshSurface::new();
        let corner = Vector3::new(0.0, 0.0, 0.0);
        let uv = Vector2::new(0.0, 0.0);
        surface.push_face([corner; 4], [uv; 4], 255);

        assert_eq!(surface.vertices.len(), 4);
        assert_eq!(surface.indices, vec![1, 2, 0, 1, 3, 2]);
        assert_eq!(surface.face_count(), 1);
    }

    #[test]
    fn indices_offset_by_existing_vertices() {
        let mut surface = MeshSurface::new();
        let corner = Vector3::new(0.0, 0.0, 0.0);
        let uv = Vector2::new(0.0, 0.0);
        surface.push_face([corner; 4], [uv; 4], 255);
        surface.push_face([corner; 4], [uv; 4], 255);

        assert_eq!(surface.indices[6..], [5, 6, 4, 5, 7, 6]);
    }

    #[test]
    fn surface_count_skips_missing_passes() {
        let mesh = ChunkMesh::default();
        assert_eq!(mesh.surface_count(), 0);
    }
}
