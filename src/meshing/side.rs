//! Cube geometry tables: corner positions, the six face definitions, and the
//! fixed per-face brightness constants.

use cgmath::Vector3;

/// The eight corners of a unit cube, indexed by the side definitions below.
///
/// ```text
///        2 +--------+ 3
///         /|       /|
///        / |      / |
///     6 +--------+ 7|
///       |0 +-----|--+ 1
///       | /      | /
///       |/       |/
///     4 +--------+ 5
/// ```
pub const CUBE_VERTICES: [Vector3<f32>; 8] = [
    Vector3::new(0.0, 0.0, 0.0),
    Vector3::new(1.0, 0.0, 0.0),
    Vector3::new(0.0, 1.0, 0.0),
    Vector3::new(1.0, 1.0, 0.0),
    Vector3::new(0.0, 0.0, 1.0),
    Vector3::new(1.0, 0.0, 1.0),
    Vector3::new(0.0, 1.0, 1.0),
    Vector3::new(1.0, 1.0, 1.0),
];

/// One face of a voxel cube: four corner indices into [`CUBE_VERTICES`]
/// (in a, b, c, d order) plus the outward normal.
pub struct Side {
    /// Corner indices a, b, c, d; a/b are the upper edge, c/d the lower.
    pub corners: [usize; 4],

    /// Outward unit normal of the face.
    pub normal: Vector3<i32>,
}

/// Face with normal +Y.
pub const TOP: Side = Side {
    corners: [2, 3, 6, 7],
    normal: Vector3::new(0, 1, 0),
};
/// Face with normal -Y.
pub const BOTTOM: Side = Side {
    corners: [4, 5, 0, 1],
    normal: Vector3::new(0, -1, 0),
};
/// Face with normal +X.
pub const LEFT: Side = Side {
    corners: [7, 3, 5, 1],
    normal: Vector3::new(1, 0, 0),
};
/// Face with normal -X.
pub const RIGHT: Side = Side {
    corners: [2, 6, 0, 4],
    normal: Vector3::new(-1, 0, 0),
};
/// Face with normal +Z.
pub const BACK: Side = Side {
    corners: [6, 7, 4, 5],
    normal: Vector3::new(0, 0, 1),
};
/// Face with normal -Z.
pub const FRONT: Side = Side {
    corners: [0, 1, 2, 3],
    normal: Vector3::new(0, 0, -1),
};

/// All six faces, in the order the type table's texture indices use:
/// front, back, right, left, bottom, top.
pub const SIDES: [Side; 6] = [FRONT, BACK, RIGHT, LEFT, BOTTOM, TOP];

/// The fixed brightness constant for a face, keyed by its normal.
///
/// Not a computed lightmap: up-facing quads are brightest, the +Z and +X
/// sides get intermediate values, everything else is darkest.
pub fn brightness(normal: Vector3<i32>) -> u8 {
    if normal == Vector3::new(0, 1, 0) {
        255
    } else if normal == Vector3::new(0, 0, 1) {
        180
    } else if normal == Vector3::new(1, 0, 0) {
        165
    } else {
        135
    }
}

/// Whether a face is vertical (its normal has no Y component).
pub fn is_vertical_face(normal: Vector3<i32>) -> bool {
    normal.y == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_matches_face_constants() {
        assert_eq!(brightness(TOP.normal), 255);
        assert_eq!(brightness(BACK.normal), 180);
        assert_eq!(brightness(LEFT.normal), 165);
        assert_eq!(brightness(BOTTOM.normal), 135);
        assert_eq!(brightness(FRONT.normal), 135);
        assert_eq!(brightness(RIGHT.normal), 135);
    }

    #[test]
    fn vertical_faces_exclude_top_and_bottom() {
        assert!(!is_vertical_face(TOP.normal));
        assert!(!is_vertical_face(BOTTOM.normal));
        for side in [FRONT, BACK, LEFT, RIGHT] {
            assert!(is_vertical_face(side.normal));
        }
    }

    #[test]
    fn every_side_has_distinct_corners() {
        for side in SIDES {
            let mut corners = side.corners.to_vec();
            corners.sort_unstable();
            corners.dedup();
            assert_eq!(corners.len(), 4);
        }
    }
}
