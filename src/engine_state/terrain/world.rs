//! # Terrain World
//!
//! Tiles chunk volumes across a fixed arena and routes world-space edits to
//! the chunk that owns them.
//!
//! ## Architecture
//!
//! The arena is a fixed grid of chunks, `world_chunks_x` by `world_chunks_z`
//! and one chunk tall, keyed by chunk coordinate. Chunk `(cx, 0, cz)` gets
//! the world origin `(cx * width, 0, cz * depth)`, so a chunk's local
//! coordinates plus its origin give seamless world coordinates. Nothing is
//! streamed in or out after startup; destruction only flips cells inside
//! the existing volumes.

use std::collections::HashMap;

use cgmath::Point3;
use log::info;

use super::generator;
use super::volume::VoxelVolume;
use super::voxel::VoxelCell;
use crate::settings::GameSettings;

/// A fixed grid of terrain chunks addressed by chunk coordinate.
pub struct TerrainWorld {
    chunks: HashMap<Point3<i32>, VoxelVolume>,
    chunk_width: u32,
    chunk_height: u32,
    chunk_depth: u32,
}

impl TerrainWorld {
    /// Tiles and generates the arena described by the settings.
    pub fn new(settings: &GameSettings) -> Self {
        let mut chunks = HashMap::new();
        for cz in 0..settings.world_chunks_z {
            for cx in 0..settings.world_chunks_x {
                let coord = Point3::new(cx, 0, cz);
                let origin = Point3::new(
                    cx * settings.chunk_width as i32,
                    0,
                    cz * settings.chunk_depth as i32,
                );
                let mut volume = VoxelVolume::new(
                    settings.chunk_width,
                    settings.chunk_height,
                    settings.chunk_depth,
                    origin,
                );
                generator::fill(&mut volume, &settings.terrain_method, settings.terrain_seed);
                chunks.insert(coord, volume);
            }
        }

        info!(
            "Tiled {} terrain chunks of {}x{}x{} cells",
            chunks.len(),
            settings.chunk_width,
            settings.chunk_height,
            settings.chunk_depth
        );

        Self {
            chunks,
            chunk_width: settings.chunk_width,
            chunk_height: settings.chunk_height,
            chunk_depth: settings.chunk_depth,
        }
    }

    /// Coordinates of every tiled chunk.
    pub fn chunk_coords(&self) -> impl Iterator<Item = Point3<i32>> + '_ {
        self.chunks.keys().copied()
    }

    /// Number of cells every chunk holds, which sizes the per-chunk mesh
    /// allocations.
    pub fn cells_per_chunk(&self) -> usize {
        (self.chunk_width * self.chunk_height * self.chunk_depth) as usize
    }

    /// Borrows the chunk at the given chunk coordinate.
    pub fn chunk(&self, coord: Point3<i32>) -> Option<&VoxelVolume> {
        self.chunks.get(&coord)
    }

    /// Mutably borrows the chunk at the given chunk coordinate.
    pub fn chunk_mut(&mut self, coord: Point3<i32>) -> Option<&mut VoxelVolume> {
        self.chunks.get_mut(&coord)
    }

    /// Reads the cell at integer world coordinates, or `None` outside the
    /// arena.
    pub fn cell_at(&self, world: Point3<i32>) -> Option<VoxelCell> {
        let (coord, local) = self.split_world(world)?;
        self.chunks
            .get(&coord)
            .map(|chunk| chunk.get_cell(local.0, local.1, local.2))
    }

    /// Writes the cell at integer world coordinates. Writes outside the
    /// arena are ignored: the finite boundary is a gameplay fact, not a
    /// caller error.
    pub fn set_cell_at(&mut self, world: Point3<i32>, cell: VoxelCell) {
        if let Some((coord, local)) = self.split_world(world) {
            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.set_cell(local.0, local.1, local.2, cell);
            }
        }
    }

    /// Empties every cell whose center lies within `radius` of `center`.
    ///
    /// Only chunks overlapping the sphere see any writes, so an explosion
    /// dirties the chunks it touches and no others; several carves in one
    /// frame coalesce into a single remesh per affected chunk.
    pub fn carve_sphere(&mut self, center: Point3<f32>, radius: f32) {
        let radius = radius.max(0.0);
        let min_x = (center.x - radius).floor() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let min_z = (center.z - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let max_y = (center.y + radius).ceil() as i32;
        let max_z = (center.z + radius).ceil() as i32;
        let radius_sq = radius * radius;

        for z in min_z..=max_z {
            for y in min_y..=max_y {
                for x in min_x..=max_x {
                    let dx = x as f32 - center.x;
                    let dy = y as f32 - center.y;
                    let dz = z as f32 - center.z;
                    if dx * dx + dy * dy + dz * dz <= radius_sq {
                        self.set_cell_at(Point3::new(x, y, z), VoxelCell::Empty);
                    }
                }
            }
        }
    }

    /// Refills every chunk with freshly generated terrain.
    pub fn regenerate(&mut self, method: &str, seed: u32) {
        for volume in self.chunks.values_mut() {
            generator::fill(volume, method, seed);
        }
    }

    /// Splits world coordinates into a chunk coordinate and local
    /// coordinates, or `None` when outside the tiled arena.
    fn split_world(&self, world: Point3<i32>) -> Option<(Point3<i32>, (u32, u32, u32))> {
        if world.x < 0 || world.y < 0 || world.z < 0 {
            return None;
        }
        if world.y >= self.chunk_height as i32 {
            return None;
        }

        let width = self.chunk_width as i32;
        let depth = self.chunk_depth as i32;
        let coord = Point3::new(world.x / width, 0, world.z / depth);
        if !self.chunks.contains_key(&coord) {
            return None;
        }

        let local = (
            (world.x % width) as u32,
            world.y as u32,
            (world.z % depth) as u32,
        );
        Some((coord, local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_settings() -> GameSettings {
        GameSettings {
            chunk_width: 4,
            chunk_height: 4,
            chunk_depth: 4,
            world_chunks_x: 2,
            world_chunks_z: 2,
            terrain_method: String::from("solid"),
            ..GameSettings::default()
        }
    }

    fn clean_world() -> TerrainWorld {
        let mut world = TerrainWorld::new(&solid_settings());
        for coord in world.chunk_coords().collect::<Vec<_>>() {
            if let Some(chunk) = world.chunk_mut(coord) {
                chunk.clear_dirty();
            }
        }
        world
    }

    #[test]
    fn tiles_expected_chunks_with_offset_origins() {
        let world = TerrainWorld::new(&solid_settings());
        assert_eq!(world.chunk_coords().count(), 4);
        assert_eq!(world.cells_per_chunk(), 64);

        let chunk = world.chunk(Point3::new(1, 0, 1)).unwrap();
        assert_eq!(chunk.origin(), Point3::new(4, 0, 4));
        assert!(world.chunk(Point3::new(2, 0, 0)).is_none());
    }

    #[test]
    fn world_coordinates_route_to_the_owning_chunk() {
        let mut world = clean_world();

        world.set_cell_at(Point3::new(5, 1, 6), VoxelCell::Empty);
        assert_eq!(world.cell_at(Point3::new(5, 1, 6)), Some(VoxelCell::Empty));

        // World (5, 1, 6) is chunk (1, 0, 1) local (1, 1, 2).
        let chunk = world.chunk(Point3::new(1, 0, 1)).unwrap();
        assert!(!chunk.get_cell(1, 1, 2).is_solid());
        assert!(chunk.is_dirty());
        assert!(!world.chunk(Point3::new(0, 0, 0)).unwrap().is_dirty());
    }

    #[test]
    fn out_of_arena_access_is_harmless() {
        let mut world = clean_world();
        assert_eq!(world.cell_at(Point3::new(-1, 0, 0)), None);
        assert_eq!(world.cell_at(Point3::new(0, 4, 0)), None);
        assert_eq!(world.cell_at(Point3::new(8, 0, 0)), None);

        world.set_cell_at(Point3::new(50, 0, 50), VoxelCell::Empty);
        for coord in world.chunk_coords().collect::<Vec<_>>() {
            assert!(!world.chunk(coord).unwrap().is_dirty());
        }
    }

    #[test]
    fn carve_sphere_empties_cells_and_dirties_only_touched_chunks() {
        let mut world = clean_world();
        world.carve_sphere(Point3::new(1.0, 1.0, 1.0), 1.2);

        assert_eq!(world.cell_at(Point3::new(1, 1, 1)), Some(VoxelCell::Empty));
        assert_eq!(world.cell_at(Point3::new(2, 1, 1)), Some(VoxelCell::Empty));
        // Diagonal neighbors sit sqrt(2) away, outside the radius.
        assert_eq!(world.cell_at(Point3::new(2, 2, 1)), Some(VoxelCell::Solid));

        assert!(world.chunk(Point3::new(0, 0, 0)).unwrap().is_dirty());
        assert!(!world.chunk(Point3::new(1, 0, 0)).unwrap().is_dirty());
        assert!(!world.chunk(Point3::new(0, 0, 1)).unwrap().is_dirty());
        assert!(!world.chunk(Point3::new(1, 0, 1)).unwrap().is_dirty());
    }

    #[test]
    fn carve_spanning_a_chunk_seam_dirties_both_sides() {
        let mut world = clean_world();
        world.carve_sphere(Point3::new(4.0, 1.0, 1.0), 1.2);

        assert_eq!(world.cell_at(Point3::new(3, 1, 1)), Some(VoxelCell::Empty));
        assert_eq!(world.cell_at(Point3::new(4, 1, 1)), Some(VoxelCell::Empty));
        assert!(world.chunk(Point3::new(0, 0, 0)).unwrap().is_dirty());
        assert!(world.chunk(Point3::new(1, 0, 0)).unwrap().is_dirty());
    }

    #[test]
    fn carve_at_the_arena_edge_is_clamped() {
        let mut world = clean_world();
        world.carve_sphere(Point3::new(0.0, 0.0, 0.0), 2.0);
        assert_eq!(world.cell_at(Point3::new(0, 0, 0)), Some(VoxelCell::Empty));
        assert_eq!(world.cell_at(Point3::new(1, 0, 0)), Some(VoxelCell::Empty));
    }

    #[test]
    fn regenerating_identical_terrain_schedules_no_remesh() {
        let mut world = clean_world();
        world.regenerate("solid", 0);
        for coord in world.chunk_coords().collect::<Vec<_>>() {
            assert!(!world.chunk(coord).unwrap().is_dirty());
        }
    }
}
