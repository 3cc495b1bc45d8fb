//! Face directions for cell geometry.
//!
//! Each terrain cell has six axis-aligned faces. The axis mapping is fixed
//! for the whole engine: front faces -Z, left faces -X, right faces +X,
//! back faces +Z, top faces +Y, bottom faces -Y. Exposure masks, neighbor
//! lookups, and quad emission all index faces through this enum so the
//! mapping lives in exactly one place.

use cgmath::Vector3;

/// One of the six axis-aligned faces of a terrain cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceDirection {
    /// The -Z face.
    Front,
    /// The -X face.
    Left,
    /// The +X face.
    Right,
    /// The +Z face.
    Back,
    /// The +Y face.
    Top,
    /// The -Y face.
    Bottom,
}

impl FaceDirection {
    /// All six faces in emission order.
    pub const ALL: [FaceDirection; 6] = [
        FaceDirection::Front,
        FaceDirection::Left,
        FaceDirection::Right,
        FaceDirection::Back,
        FaceDirection::Top,
        FaceDirection::Bottom,
    ];

    /// Bit assigned to this face in a cell's exposure mask.
    pub const fn bit(self) -> u8 {
        match self {
            FaceDirection::Front => 1,
            FaceDirection::Left => 1 << 1,
            FaceDirection::Right => 1 << 2,
            FaceDirection::Back => 1 << 3,
            FaceDirection::Top => 1 << 4,
            FaceDirection::Bottom => 1 << 5,
        }
    }

    /// Offset of the neighboring cell this face points toward.
    pub const fn neighbor_offset(self) -> Vector3<i32> {
        match self {
            FaceDirection::Front => Vector3::new(0, 0, -1),
            FaceDirection::Left => Vector3::new(-1, 0, 0),
            FaceDirection::Right => Vector3::new(1, 0, 0),
            FaceDirection::Back => Vector3::new(0, 0, 1),
            FaceDirection::Top => Vector3::new(0, 1, 0),
            FaceDirection::Bottom => Vector3::new(0, -1, 0),
        }
    }

    /// Unit normal carried by every vertex of this face.
    pub const fn normal(self) -> [f32; 3] {
        match self {
            FaceDirection::Front => [0.0, 0.0, -1.0],
            FaceDirection::Left => [-1.0, 0.0, 0.0],
            FaceDirection::Right => [1.0, 0.0, 0.0],
            FaceDirection::Back => [0.0, 0.0, 1.0],
            FaceDirection::Top => [0.0, 1.0, 0.0],
            FaceDirection::Bottom => [0.0, -1.0, 0.0],
        }
    }

    /// Corner positions of this face relative to the cell center.
    ///
    /// The four corners span a unit quad half a cell out along the face
    /// normal, wound counter-clockwise when viewed from outside the cell so
    /// back-face culling keeps the outward side.
    pub const fn corner_offsets(self) -> [[f32; 3]; 4] {
        match self {
            FaceDirection::Front => [
                [0.5, -0.5, -0.5],
                [-0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
            ],
            FaceDirection::Left => [
                [-0.5, -0.5, -0.5],
                [-0.5, -0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
            ],
            FaceDirection::Right => [
                [0.5, -0.5, 0.5],
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
            ],
            FaceDirection::Back => [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
            ],
            FaceDirection::Top => [
                [-0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, -0.5],
            ],
            FaceDirection::Bottom => [
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
                [-0.5, -0.5, 0.5],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposure_bits_are_distinct() {
        let mut seen = 0u8;
        for face in FaceDirection::ALL {
            assert_eq!(seen & face.bit(), 0);
            seen |= face.bit();
        }
        assert_eq!(seen, 0b11_1111);
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for face in FaceDirection::ALL {
            let normal = face.normal();
            for corner in face.corner_offsets() {
                let along_normal =
                    corner[0] * normal[0] + corner[1] * normal[1] + corner[2] * normal[2];
                assert_eq!(along_normal, 0.5);
            }
        }
    }

    #[test]
    fn winding_is_counter_clockwise_from_outside() {
        for face in FaceDirection::ALL {
            let corners = face.corner_offsets();
            let edge_a = [
                corners[1][0] - corners[0][0],
                corners[1][1] - corners[0][1],
                corners[1][2] - corners[0][2],
            ];
            let edge_b = [
                corners[2][0] - corners[0][0],
                corners[2][1] - corners[0][1],
                corners[2][2] - corners[0][2],
            ];
            let cross = [
                edge_a[1] * edge_b[2] - edge_a[2] * edge_b[1],
                edge_a[2] * edge_b[0] - edge_a[0] * edge_b[2],
                edge_a[0] * edge_b[1] - edge_a[1] * edge_b[0],
            ];
            let normal = face.normal();
            for axis in 0..3 {
                assert!(
                    cross[axis] * normal[axis] >= 0.0,
                    "face {:?} winds against its normal",
                    face
                );
            }
            let dot = cross[0] * normal[0] + cross[1] * normal[1] + cross[2] * normal[2];
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn neighbor_offsets_match_normals() {
        for face in FaceDirection::ALL {
            let offset = face.neighbor_offset();
            let normal = face.normal();
            assert_eq!(offset.x as f32, normal[0]);
            assert_eq!(offset.y as f32, normal[1]);
            assert_eq!(offset.z as f32, normal[2]);
        }
    }
}
