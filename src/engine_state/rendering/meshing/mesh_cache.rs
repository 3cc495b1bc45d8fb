//! # Mesh Cache
//!
//! Preallocated worst-case geometry storage for one chunk, rebuilt in place.
//!
//! ## Architecture
//!
//! The cache is an arena: one vertex array sized for every cell fully
//! exposed (24 vertices each) and one index array to match (36 indices
//! each), allocated once and addressed through running counters that reset
//! at the start of each rebuild. Nothing is freed or resized mid-life; the
//! slack beyond the counters is stale garbage and never read.
//!
//! ## Performance Considerations
//!
//! Explosions can edit terrain every frame, so the rebuild path must not
//! allocate. Worst-case sizing trades memory proportional to chunk volume
//! for a hot loop that only writes, and the same sizing lets each chunk's
//! GPU buffers be created exactly once.

use cgmath::Point3;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::terrain::face::FaceDirection;
use crate::engine_state::terrain::volume::VoxelVolume;

use super::mesher;

/// Vertices a fully exposed cell contributes: 4 corners for each of 6 faces.
pub const VERTICES_PER_CELL: usize = 24;
/// Indices a fully exposed cell contributes: 6 for each of 6 faces.
pub const INDICES_PER_CELL: usize = 36;
/// Vertices appended per exposed face.
pub const VERTICES_PER_FACE: usize = 4;
/// Indices appended per exposed face, two triangles.
pub const INDICES_PER_FACE: usize = 6;

/// Reusable worst-case vertex and index storage for one chunk's mesh.
pub struct MeshCache {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    used_vertices: usize,
    used_indices: usize,
}

impl MeshCache {
    /// Preallocates storage for a volume of `cell_count` cells with every
    /// one of them fully exposed.
    pub fn new(cell_count: usize) -> Self {
        use bytemuck::Zeroable;
        Self {
            vertices: vec![Vertex::zeroed(); cell_count * VERTICES_PER_CELL],
            indices: vec![0; cell_count * INDICES_PER_CELL],
            used_vertices: 0,
            used_indices: 0,
        }
    }

    /// Rebuilds this cache from the volume if, and only if, the volume is
    /// dirty. Returns whether a rebuild ran.
    ///
    /// This is the once-per-frame update step: any number of cell edits
    /// since the last call collapse into a single remesh, and a clean
    /// volume costs one flag check.
    pub fn rebuild_from(&mut self, volume: &mut VoxelVolume) -> bool {
        if !volume.is_dirty() {
            return false;
        }
        mesher::rebuild_into(volume, self);
        volume.clear_dirty();
        true
    }

    /// Resets the used counters ahead of a rebuild. The storage itself is
    /// left as is.
    pub(crate) fn reset(&mut self) {
        self.used_vertices = 0;
        self.used_indices = 0;
    }

    /// Appends one face of the cell centered at `cell_center`: four corner
    /// vertices carrying the face normal, then six indices forming the
    /// triangles (0, 1, 2) and (0, 2, 3) over those corners.
    ///
    /// # Panics
    /// Panics if the face would overrun the preallocated storage. The
    /// worst-case sizing makes that an internal invariant violation, not a
    /// reachable runtime condition.
    pub(crate) fn push_face(&mut self, face: FaceDirection, cell_center: Point3<f32>) {
        assert!(
            self.used_vertices + VERTICES_PER_FACE <= self.vertices.len()
                && self.used_indices + INDICES_PER_FACE <= self.indices.len(),
            "mesh cache overrun: {} vertices / {} indices used of {} / {}",
            self.used_vertices,
            self.used_indices,
            self.vertices.len(),
            self.indices.len()
        );

        let base = self.used_vertices as u32;
        let normal = face.normal();
        for (slot, corner) in face.corner_offsets().iter().enumerate() {
            self.vertices[self.used_vertices + slot] = Vertex::new(
                [
                    cell_center.x + corner[0],
                    cell_center.y + corner[1],
                    cell_center.z + corner[2],
                ],
                normal,
            );
        }
        self.used_vertices += VERTICES_PER_FACE;

        let face_indices = [base, base + 1, base + 2, base, base + 2, base + 3];
        self.indices[self.used_indices..self.used_indices + INDICES_PER_FACE]
            .copy_from_slice(&face_indices);
        self.used_indices += INDICES_PER_FACE;
    }

    /// Number of vertices the last rebuild populated.
    pub fn used_vertices(&self) -> usize {
        self.used_vertices
    }

    /// Number of indices the last rebuild populated.
    pub fn used_indices(&self) -> usize {
        self.used_indices
    }

    /// The populated vertex prefix from the last rebuild.
    pub fn vertex_data(&self) -> &[Vertex] {
        &self.vertices[..self.used_vertices]
    }

    /// The populated index prefix from the last rebuild.
    pub fn index_data(&self) -> &[u32] {
        &self.indices[..self.used_indices]
    }

    /// Total vertex capacity in bytes, for sizing the GPU allocation.
    pub fn vertex_capacity_bytes(&self) -> u64 {
        (self.vertices.len() * std::mem::size_of::<Vertex>()) as u64
    }

    /// Total index capacity in bytes, for sizing the GPU allocation.
    pub fn index_capacity_bytes(&self) -> u64 {
        (self.indices.len() * std::mem::size_of::<u32>()) as u64
    }
}
