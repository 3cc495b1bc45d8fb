//! # Face-Culling Mesher
//!
//! Converts a chunk's occupancy grid into the triangulated surface between
//! solid and empty space.
//!
//! ## Algorithm
//!
//! One pass over the cells in linearization order (`z` outer, `y` middle,
//! `x` inner). Empty cells are skipped; each solid cell checks its six axis
//! neighbors and emits a quad for every side that borders empty space or
//! the chunk boundary. Faces are emitted independently and never merged: a
//! cell contributes 0 to 6 quads, each with a constant normal and four
//! corners half a cell out from its center.
//!
//! ## Performance Considerations
//!
//! The pass costs O(cells) whether one cell changed or all of them. The
//! dirty gate in [`MeshCache::rebuild_from`] keeps it to at most one pass
//! per chunk per frame, and the arena it writes into never allocates.

use cgmath::Point3;

use crate::engine_state::terrain::face::FaceDirection;
use crate::engine_state::terrain::volume::VoxelVolume;

use super::mesh_cache::MeshCache;

/// Repopulates `cache` with the exposed-face geometry of `volume`.
///
/// Resets the used counters, then walks every cell in canonical order and
/// appends four vertices and six indices per exposed face. Positions are
/// emitted in world space, chunk origin plus local coordinates, so the
/// draw path needs no per-chunk transform.
pub fn rebuild_into(volume: &VoxelVolume, cache: &mut MeshCache) {
    cache.reset();
    let origin = volume.origin();

    for z in 0..volume.depth() {
        for y in 0..volume.height() {
            for x in 0..volume.width() {
                if !volume.get_cell(x, y, z).is_solid() {
                    continue;
                }

                let mask = volume.exposed_faces(x, y, z);
                if mask == 0 {
                    continue;
                }

                let cell_center = Point3::new(
                    (origin.x + x as i32) as f32,
                    (origin.y + y as i32) as f32,
                    (origin.z + z as i32) as f32,
                );

                for face in FaceDirection::ALL {
                    if mask & face.bit() != 0 {
                        cache.push_face(face, cell_center);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::terrain::voxel::VoxelCell;

    fn solid_volume(width: u32, height: u32, depth: u32) -> VoxelVolume {
        let mut volume = VoxelVolume::new(width, height, depth, Point3::new(0, 0, 0));
        for z in 0..depth {
            for y in 0..height {
                for x in 0..width {
                    volume.set_cell(x, y, z, VoxelCell::Solid);
                }
            }
        }
        volume
    }

    fn rebuilt(volume: &VoxelVolume) -> MeshCache {
        let mut cache = MeshCache::new(volume.cell_count());
        rebuild_into(volume, &mut cache);
        cache
    }

    fn faces_matching(cache: &MeshCache, normal: [f32; 3]) -> usize {
        cache
            .vertex_data()
            .chunks(4)
            .filter(|quad| quad[0].normal == normal)
            .count()
    }

    #[test]
    fn empty_volume_emits_nothing() {
        let volume = VoxelVolume::new(4, 4, 4, Point3::new(0, 0, 0));
        let cache = rebuilt(&volume);
        assert_eq!(cache.used_vertices(), 0);
        assert_eq!(cache.used_indices(), 0);
    }

    #[test]
    fn single_cell_emits_all_six_faces() {
        let volume = solid_volume(1, 1, 1);
        let cache = rebuilt(&volume);
        assert_eq!(cache.used_vertices(), 24);
        assert_eq!(cache.used_indices(), 36);
    }

    #[test]
    fn counts_always_describe_whole_faces() {
        let mut volume = VoxelVolume::new(4, 3, 2, Point3::new(0, 0, 0));
        for (x, y, z) in [(0, 0, 0), (1, 0, 0), (3, 2, 1), (2, 1, 0), (2, 1, 1)] {
            volume.set_cell(x, y, z, VoxelCell::Solid);
        }
        let cache = rebuilt(&volume);
        assert_eq!(cache.used_vertices() % 4, 0);
        assert_eq!(cache.used_indices() % 6, 0);
        assert_eq!(cache.used_indices() / 6, cache.used_vertices() / 4);
    }

    #[test]
    fn adjacent_cells_share_no_internal_faces() {
        // A 3x1x1 row shows 4 lateral faces per cell plus the two row ends.
        let volume = solid_volume(3, 1, 1);
        let cache = rebuilt(&volume);
        assert_eq!(cache.used_vertices(), 14 * 4);
        assert_eq!(cache.used_indices(), 14 * 6);
        assert_eq!(faces_matching(&cache, [1.0, 0.0, 0.0]), 1);
        assert_eq!(faces_matching(&cache, [-1.0, 0.0, 0.0]), 1);
        assert_eq!(faces_matching(&cache, [0.0, 1.0, 0.0]), 3);
    }

    #[test]
    fn buried_interior_cell_is_invisible() {
        // A solid 3x3x3 block shows 9 faces per side; the center cell
        // contributes nothing.
        let volume = solid_volume(3, 3, 3);
        let cache = rebuilt(&volume);
        assert_eq!(cache.used_vertices(), 54 * 4);
        assert_eq!(cache.used_indices(), 54 * 6);
    }

    #[test]
    fn positions_carry_the_chunk_origin() {
        let mut volume = VoxelVolume::new(1, 1, 1, Point3::new(10, -4, 7));
        volume.set_cell(0, 0, 0, VoxelCell::Solid);
        let cache = rebuilt(&volume);
        for vertex in cache.vertex_data() {
            assert_eq!((vertex.position[0] - 10.0).abs(), 0.5);
            assert_eq!((vertex.position[1] + 4.0).abs(), 0.5);
            assert_eq!((vertex.position[2] - 7.0).abs(), 0.5);
        }
    }

    #[test]
    fn traversal_is_z_then_y_then_x() {
        let mut volume = VoxelVolume::new(2, 2, 2, Point3::new(0, 0, 0));
        volume.set_cell(1, 0, 0, VoxelCell::Solid);
        volume.set_cell(0, 0, 1, VoxelCell::Solid);
        let cache = rebuilt(&volume);

        assert_eq!(cache.used_vertices(), 48);
        // (1, 0, 0) sits earlier in linearization order than (0, 0, 1), so
        // its front face opens the buffer and the other cell's bottom face
        // closes it.
        assert_eq!(cache.vertex_data()[0].position, [1.5, -0.5, -0.5]);
        assert_eq!(cache.vertex_data()[47].position, [-0.5, -0.5, 1.5]);
    }

    #[test]
    fn rebuild_after_no_change_matches_exactly() {
        let mut volume = solid_volume(2, 2, 2);
        let mut cache = MeshCache::new(volume.cell_count());
        assert!(cache.rebuild_from(&mut volume));
        let vertices = cache.vertex_data().to_vec();
        let indices = cache.index_data().to_vec();

        volume.set_cell(0, 0, 0, VoxelCell::Solid);
        assert!(!cache.rebuild_from(&mut volume));

        rebuild_into(&volume, &mut cache);
        assert_eq!(cache.vertex_data(), vertices.as_slice());
        assert_eq!(cache.index_data(), indices.as_slice());
    }

    #[test]
    fn lone_cell_adds_exactly_its_exposed_faces() {
        let mut volume = VoxelVolume::new(3, 3, 3, Point3::new(0, 0, 0));
        let mut cache = MeshCache::new(volume.cell_count());
        cache.rebuild_from(&mut volume);
        assert_eq!(cache.used_indices(), 0);

        volume.set_cell(1, 1, 1, VoxelCell::Solid);
        assert!(cache.rebuild_from(&mut volume));
        // All six neighbors are empty, so the gain is the full 36 indices.
        assert_eq!(cache.used_indices(), 36);
        assert_eq!(cache.used_vertices(), 24);
    }

    #[test]
    fn carving_a_corner_swaps_hidden_faces_for_new_ones() {
        let mut volume = solid_volume(2, 2, 2);
        let mut cache = MeshCache::new(volume.cell_count());
        cache.rebuild_from(&mut volume);
        // Every cell of the 2x2x2 block shows its three outward sides.
        assert_eq!(cache.used_vertices(), 24 * 4);
        assert_eq!(cache.used_indices(), 24 * 6);

        volume.set_cell(0, 0, 0, VoxelCell::Empty);
        assert!(cache.rebuild_from(&mut volume));
        // The removed cell's three boundary faces vanish while each of its
        // three neighbors newly exposes one inward face, a wash in totals.
        assert_eq!(cache.used_vertices(), 24 * 4);
        assert_eq!(cache.used_indices(), 24 * 6);

        // The new faces sit on the planes facing the carved corner; no face
        // existed on those planes before.
        for (normal, axis) in [
            ([-1.0, 0.0, 0.0], 0),
            ([0.0, -1.0, 0.0], 1),
            ([0.0, 0.0, -1.0], 2),
        ] {
            let inward_faces = cache
                .vertex_data()
                .chunks(4)
                .filter(|quad| quad[0].normal == normal && quad[0].position[axis] == 0.5)
                .count();
            assert_eq!(inward_faces, 1);
        }
    }
}
