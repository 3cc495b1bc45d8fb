//! Terrain generation strategies.
//!
//! Generators fill a volume through `set_cell`, so they participate in the
//! same dirty tracking as gameplay edits: regenerating a chunk into
//! identical content schedules no remesh.

use log::warn;
use noise::{NoiseFn, Perlin};

use super::volume::VoxelVolume;
use super::voxel::VoxelCell;

/// Horizontal scale applied to world coordinates when sampling the height
/// noise.
const HEIGHTFIELD_SCALE: f64 = 0.04;
/// Fraction of the volume height the heightfield surface centers on.
const HEIGHTFIELD_BASE: f64 = 0.5;
/// Fraction of the volume height the noise may raise or lower the surface.
const HEIGHTFIELD_AMPLITUDE: f64 = 0.3;
/// Occupancy probability used by the scatter method.
const SCATTER_DENSITY: f64 = 0.15;

/// Fills a volume using the named generation method.
///
/// Recognized methods are `heightfield`, `solid`, `scatter`, and `empty`;
/// anything else logs a warning and falls back to the heightfield.
pub fn fill(volume: &mut VoxelVolume, method: &str, seed: u32) {
    match method {
        "heightfield" => fill_heightfield(volume, seed),
        "solid" => fill_uniform(volume, VoxelCell::Solid),
        "scatter" => fill_scatter(volume, seed),
        "empty" => fill_uniform(volume, VoxelCell::Empty),
        other => {
            warn!("Unknown terrain method '{}', using heightfield", other);
            fill_heightfield(volume, seed);
        }
    }
}

/// Carves a rolling surface from 2D Perlin noise: a column is solid below
/// `base + amplitude * noise(x, z)`. Noise is sampled in world space so
/// adjacent chunks line up seamlessly.
pub fn fill_heightfield(volume: &mut VoxelVolume, seed: u32) {
    let perlin = Perlin::new(seed);
    let origin = volume.origin();
    let height = volume.height() as f64;

    for z in 0..volume.depth() {
        for x in 0..volume.width() {
            let noise_x = (origin.x + x as i32) as f64 * HEIGHTFIELD_SCALE;
            let noise_z = (origin.z + z as i32) as f64 * HEIGHTFIELD_SCALE;
            let sample = perlin.get([noise_x, noise_z]);
            let surface = height * (HEIGHTFIELD_BASE + HEIGHTFIELD_AMPLITUDE * sample);

            for y in 0..volume.height() {
                let world_y = (origin.y + y as i32) as f64;
                let cell = if world_y < surface {
                    VoxelCell::Solid
                } else {
                    VoxelCell::Empty
                };
                volume.set_cell(x, y, z, cell);
            }
        }
    }
}

/// Fills every cell with the same state.
pub fn fill_uniform(volume: &mut VoxelVolume, cell: VoxelCell) {
    for z in 0..volume.depth() {
        for y in 0..volume.height() {
            for x in 0..volume.width() {
                volume.set_cell(x, y, z, cell);
            }
        }
    }
}

/// Fills cells at random with a fixed density, deterministically per seed
/// and chunk origin.
pub fn fill_scatter(volume: &mut VoxelVolume, seed: u32) {
    let origin = volume.origin();
    // Mix the origin into the seed so chunks do not repeat each other.
    let chunk_seed = seed as u64
        ^ (origin.x as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
        ^ (origin.y as u64).wrapping_mul(0x85eb_ca6b)
        ^ (origin.z as u64).wrapping_mul(0xc2b2_ae3d_27d4_eb4f);
    let mut rng = fastrand::Rng::with_seed(chunk_seed);

    for z in 0..volume.depth() {
        for y in 0..volume.height() {
            for x in 0..volume.width() {
                let cell = if rng.f64() < SCATTER_DENSITY {
                    VoxelCell::Solid
                } else {
                    VoxelCell::Empty
                };
                volume.set_cell(x, y, z, cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn matching_cells(a: &VoxelVolume, b: &VoxelVolume) -> bool {
        for z in 0..a.depth() {
            for y in 0..a.height() {
                for x in 0..a.width() {
                    if a.get_cell(x, y, z) != b.get_cell(x, y, z) {
                        return false;
                    }
                }
            }
        }
        true
    }

    #[test]
    fn solid_fill_covers_every_cell() {
        let mut volume = VoxelVolume::new(4, 4, 4, Point3::new(0, 0, 0));
        fill(&mut volume, "solid", 0);
        for z in 0..4 {
            for y in 0..4 {
                for x in 0..4 {
                    assert!(volume.get_cell(x, y, z).is_solid());
                }
            }
        }
    }

    #[test]
    fn heightfield_is_deterministic_per_seed() {
        let origin = Point3::new(16, 0, 32);
        let mut first = VoxelVolume::new(8, 8, 8, origin);
        let mut second = VoxelVolume::new(8, 8, 8, origin);
        fill_heightfield(&mut first, 7);
        fill_heightfield(&mut second, 7);
        assert!(matching_cells(&first, &second));
    }

    #[test]
    fn heightfield_keeps_floor_solid_and_sky_empty() {
        // With base 0.5 and amplitude 0.3 the surface of a 16-cell-tall
        // volume stays within [3.2, 12.8], so the bottom layer is always
        // solid and the top layer always empty.
        let mut volume = VoxelVolume::new(8, 16, 8, Point3::new(0, 0, 0));
        fill_heightfield(&mut volume, 42);
        for z in 0..8 {
            for x in 0..8 {
                assert!(volume.get_cell(x, 0, z).is_solid());
                assert!(!volume.get_cell(x, 15, z).is_solid());
            }
        }
    }

    #[test]
    fn scatter_is_deterministic_per_seed_and_origin() {
        let origin = Point3::new(-16, 0, 48);
        let mut first = VoxelVolume::new(6, 6, 6, origin);
        let mut second = VoxelVolume::new(6, 6, 6, origin);
        fill_scatter(&mut first, 99);
        fill_scatter(&mut second, 99);
        assert!(matching_cells(&first, &second));
    }

    #[test]
    fn unknown_method_falls_back_to_heightfield() {
        let mut fallback = VoxelVolume::new(8, 8, 8, Point3::new(0, 0, 0));
        let mut reference = VoxelVolume::new(8, 8, 8, Point3::new(0, 0, 0));
        fill(&mut fallback, "not-a-method", 3);
        fill_heightfield(&mut reference, 3);
        assert!(matching_cells(&fallback, &reference));
    }
}
