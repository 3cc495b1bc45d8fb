//! Per-chunk GPU mesh buffers.
//!
//! The upload and draw boundary of the terrain core: one vertex buffer and
//! one index buffer per chunk, created at worst-case size exactly once and
//! rewritten prefix-only after rebuilds. Dropping the value releases the
//! GPU allocations; nothing is freed by hand.

use wgpu::{Buffer, Device, Queue, RenderPass};

use super::mesh_cache::MeshCache;

/// GPU-resident vertex and index storage for one chunk.
pub struct ChunkMeshBuffers {
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    vertex_capacity: u64,
    index_capacity: u64,
    index_count: u32,
}

impl ChunkMeshBuffers {
    /// Allocates worst-case GPU storage matching the given cache. This runs
    /// once per chunk; every later rebuild reuses the same allocations.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `cache` - The chunk's mesh cache, whose capacity defines the worst
    ///   case
    /// * `label` - Debug label shared by both buffers
    pub fn new(device: &Device, cache: &MeshCache, label: &str) -> Self {
        let vertex_capacity = cache.vertex_capacity_bytes();
        let index_capacity = cache.index_capacity_bytes();

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: vertex_capacity,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: index_capacity,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            vertex_buffer,
            index_buffer,
            vertex_capacity,
            index_capacity,
            index_count: 0,
        }
    }

    /// Replaces the used prefix of both buffers with the cache's current
    /// contents. Called only on frames where the chunk actually rebuilt.
    ///
    /// # Panics
    /// Panics if the cache reports more data than was allocated; the shared
    /// worst-case sizing makes that an internal invariant violation.
    pub fn upload(&mut self, queue: &Queue, cache: &MeshCache) {
        let vertex_bytes: &[u8] = bytemuck::cast_slice(cache.vertex_data());
        let index_bytes: &[u8] = bytemuck::cast_slice(cache.index_data());

        if vertex_bytes.len() as u64 > self.vertex_capacity
            || index_bytes.len() as u64 > self.index_capacity
        {
            panic!(
                "Chunk mesh upload out of bounds: {} of {} vertex bytes, {} of {} index bytes",
                vertex_bytes.len(),
                self.vertex_capacity,
                index_bytes.len(),
                self.index_capacity
            );
        }

        if !vertex_bytes.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, vertex_bytes);
        }
        if !index_bytes.is_empty() {
            queue.write_buffer(&self.index_buffer, 0, index_bytes);
        }
        self.index_count = cache.used_indices() as u32;
    }

    /// Issues the chunk's indexed draw. A chunk whose last rebuild produced
    /// no geometry, or that has never uploaded, draws nothing.
    pub fn draw(&self, render_pass: &mut RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Index count the next draw will use.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Bytes of GPU memory held by this chunk's buffers.
    pub fn allocated_bytes(&self) -> u64 {
        self.vertex_capacity + self.index_capacity
    }
}
