//! Mesh generation and management for terrain rendering.
//!
//! This module turns chunk occupancy data into GPU-resident triangle meshes.
//! The key goals are:
//! 1. Rebuild a chunk at most once per frame no matter how it was edited
//! 2. Never allocate on the rebuild or upload path after startup
//! 3. Keep the draw path a plain walk over per-chunk buffers
//!
//! # Architecture
//! - `MeshManager`: Per-chunk mesh state keyed by chunk coordinate, and the
//!   once-per-frame update entry point
//! - `mesh_cache`: The preallocated CPU arena each chunk rebuilds into
//! - `mesher`: The face-culling rebuild pass
//! - `chunk_buffers`: The per-chunk GPU allocation the arena uploads to
//!
//! # Update Flow
//! 1. Gameplay edits mark chunk volumes dirty during the frame
//! 2. `MeshManager::update` rebuilds each dirty chunk's cache and uploads
//!    the populated prefix to that chunk's buffers
//! 3. The render pass draws every chunk's last-uploaded mesh, every frame

use std::collections::HashMap;

use cgmath::Point3;
use log::debug;
use wgpu::{Device, Queue, RenderPass};

use crate::engine_state::terrain::world::TerrainWorld;

pub mod chunk_buffers;
pub mod mesh_cache;
pub mod mesher;

pub use chunk_buffers::ChunkMeshBuffers;
pub use mesh_cache::MeshCache;

/// CPU arena plus GPU buffers for one chunk.
struct ChunkMeshState {
    cache: MeshCache,
    buffers: ChunkMeshBuffers,
}

/// Owns the mesh state of every terrain chunk.
pub struct MeshManager {
    chunks: HashMap<Point3<i32>, ChunkMeshState>,
}

impl MeshManager {
    /// Creates an empty manager; chunks are registered as the world tiles
    /// them.
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
        }
    }

    /// Registers a chunk: preallocates its worst-case CPU arena and its GPU
    /// buffers. All mesh memory for the chunk is claimed here, exactly once.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `coord` - The chunk coordinate, which must match the terrain world
    /// * `cell_count` - Cells in the chunk's volume, which sets the worst
    ///   case
    pub fn register_chunk(&mut self, device: &Device, coord: Point3<i32>, cell_count: usize) {
        let cache = MeshCache::new(cell_count);
        let label = format!("Chunk Mesh Buffer ({}, {}, {})", coord.x, coord.y, coord.z);
        let buffers = ChunkMeshBuffers::new(device, &cache, &label);
        self.chunks.insert(coord, ChunkMeshState { cache, buffers });
    }

    /// The once-per-frame mesh update: rebuilds every dirty chunk's cache
    /// and uploads the rebuilt prefixes. Returns how many chunks rebuilt.
    pub fn update(&mut self, world: &mut TerrainWorld, queue: &Queue) -> usize {
        let mut rebuilt = 0;
        for (coord, state) in self.chunks.iter_mut() {
            let Some(volume) = world.chunk_mut(*coord) else {
                continue;
            };
            if state.cache.rebuild_from(volume) {
                state.buffers.upload(queue, &state.cache);
                rebuilt += 1;
            }
        }
        if rebuilt > 0 {
            debug!("Rebuilt {} chunk meshes", rebuilt);
        }
        rebuilt
    }

    /// Draws every chunk's last-uploaded mesh. Runs every frame regardless
    /// of whether anything rebuilt; chunks without geometry cost nothing.
    pub fn draw<'a, 'b>(&'a self, render_pass: &mut RenderPass<'b>)
    where
        'a: 'b,
    {
        for state in self.chunks.values() {
            state.buffers.draw(render_pass);
        }
    }

    /// Total GPU bytes held across all chunk mesh buffers.
    pub fn allocated_bytes(&self) -> u64 {
        self.chunks
            .values()
            .map(|state| state.buffers.allocated_bytes())
            .sum()
    }

    /// Total resident index count across chunks, as last uploaded.
    pub fn total_index_count(&self) -> u64 {
        self.chunks
            .values()
            .map(|state| state.buffers.index_count() as u64)
            .sum()
    }

    /// Number of registered chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}
