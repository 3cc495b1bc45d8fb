//! # Voxel Volume
//!
//! Dense occupancy storage for a single terrain chunk.
//!
//! ## Storage Layout
//!
//! Cells live in one flat vector indexed `x + y * width + z * width * height`
//! with `x` fastest-varying. The accessors and the mesher's traversal both
//! rely on this linearization; it never changes for the life of a volume.
//!
//! ## Change Tracking
//!
//! The volume carries a single dirty flag rather than a change log. Writing
//! a cell to the value it already holds leaves the flag untouched, so
//! overwriting a region with identical content never schedules a remesh,
//! while any real change marks the whole chunk for one rebuild.

use cgmath::Point3;

use super::face::FaceDirection;
use super::voxel::VoxelCell;

/// A dense 3D grid of occupancy cells, offset in world space by a chunk
/// origin.
pub struct VoxelVolume {
    width: u32,
    height: u32,
    depth: u32,
    origin: Point3<i32>,
    cells: Vec<VoxelCell>,
    dirty: bool,
}

impl VoxelVolume {
    /// Creates a volume with every cell `Empty`.
    ///
    /// A fresh volume starts dirty so its first mesh update produces
    /// geometry (or an explicit empty mesh) without a prior edit.
    ///
    /// # Arguments
    /// * `width`, `height`, `depth` - Cell counts per axis, fixed for the
    ///   volume's lifetime
    /// * `origin` - World-space offset added to local coordinates when
    ///   geometry is emitted
    ///
    /// # Panics
    /// Panics if any dimension is zero.
    pub fn new(width: u32, height: u32, depth: u32, origin: Point3<i32>) -> Self {
        assert!(
            width > 0 && height > 0 && depth > 0,
            "voxel volume dimensions must be non-zero, got {}x{}x{}",
            width,
            height,
            depth
        );
        let cell_count = (width * height * depth) as usize;
        Self {
            width,
            height,
            depth,
            origin,
            cells: vec![VoxelCell::Empty; cell_count],
            dirty: true,
        }
    }

    /// Creates a volume from existing cell data in linearization order.
    ///
    /// # Panics
    /// Panics if any dimension is zero or `cells` does not hold exactly
    /// `width * height * depth` entries.
    pub fn from_cells(
        width: u32,
        height: u32,
        depth: u32,
        origin: Point3<i32>,
        cells: Vec<VoxelCell>,
    ) -> Self {
        let mut volume = Self::new(width, height, depth, origin);
        assert_eq!(
            cells.len(),
            volume.cells.len(),
            "initial cell data must hold exactly width * height * depth entries"
        );
        volume.cells = cells;
        volume
    }

    /// Cell count along X.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Cell count along Y.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell count along Z.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// World-space offset of local cell (0, 0, 0).
    pub fn origin(&self) -> Point3<i32> {
        self.origin
    }

    /// Total number of cells in the volume.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the volume has changed since the mesh was last rebuilt.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the volume clean. Called by the mesh update step once a rebuild
    /// has consumed the current contents.
    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn assert_in_bounds(&self, x: u32, y: u32, z: u32) {
        assert!(
            x < self.width && y < self.height && z < self.depth,
            "voxel coordinate ({}, {}, {}) outside {}x{}x{} volume",
            x,
            y,
            z,
            self.width,
            self.height,
            self.depth
        );
    }

    fn cell_index(&self, x: u32, y: u32, z: u32) -> usize {
        self.assert_in_bounds(x, y, z);
        (x + y * self.width + z * self.width * self.height) as usize
    }

    /// Reads the cell at local coordinates.
    ///
    /// # Panics
    /// Panics if any coordinate is out of bounds.
    pub fn get_cell(&self, x: u32, y: u32, z: u32) -> VoxelCell {
        self.cells[self.cell_index(x, y, z)]
    }

    /// Writes the cell at local coordinates, marking the volume dirty only
    /// when the stored value actually changes.
    ///
    /// # Panics
    /// Panics if any coordinate is out of bounds.
    pub fn set_cell(&mut self, x: u32, y: u32, z: u32, cell: VoxelCell) {
        let index = self.cell_index(x, y, z);
        let previous = self.cells[index];
        self.cells[index] = cell;
        self.dirty |= previous != cell;
    }

    /// Whether the cell at signed local coordinates is in bounds and solid.
    ///
    /// Out-of-bounds positions count as empty space, which is what exposes
    /// faces along the chunk boundary.
    pub fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        if x < 0 || y < 0 || z < 0 {
            return false;
        }
        let (x, y, z) = (x as u32, y as u32, z as u32);
        if x >= self.width || y >= self.height || z >= self.depth {
            return false;
        }
        self.cells[(x + y * self.width + z * self.width * self.height) as usize].is_solid()
    }

    /// Computes the exposure mask for the cell at local coordinates: one bit
    /// per face, set when the neighbor in that direction lies outside the
    /// volume or is `Empty`.
    ///
    /// A solid cell buried on all six sides returns zero and produces no
    /// geometry.
    ///
    /// # Panics
    /// Panics if any coordinate is out of bounds.
    pub fn exposed_faces(&self, x: u32, y: u32, z: u32) -> u8 {
        self.assert_in_bounds(x, y, z);
        let (x, y, z) = (x as i32, y as i32, z as i32);

        let mut mask = 0u8;
        for face in FaceDirection::ALL {
            let offset = face.neighbor_offset();
            if !self.is_solid_at(x + offset.x, y + offset.y, z + offset.z) {
                mask |= face.bit();
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_volume() -> VoxelVolume {
        VoxelVolume::new(3, 3, 3, Point3::new(0, 0, 0))
    }

    #[test]
    fn new_volume_is_empty_and_dirty() {
        let volume = small_volume();
        assert_eq!(volume.cell_count(), 27);
        assert!(volume.is_dirty());
        assert_eq!(volume.get_cell(2, 2, 2), VoxelCell::Empty);
    }

    #[test]
    #[should_panic]
    fn zero_dimension_is_rejected() {
        VoxelVolume::new(0, 3, 3, Point3::new(0, 0, 0));
    }

    #[test]
    #[should_panic]
    fn mismatched_initial_cells_are_rejected() {
        VoxelVolume::from_cells(2, 2, 2, Point3::new(0, 0, 0), vec![VoxelCell::Solid; 7]);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_read_is_rejected() {
        small_volume().get_cell(3, 0, 0);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_write_is_rejected() {
        small_volume().set_cell(0, 0, 3, VoxelCell::Solid);
    }

    #[test]
    fn linearization_is_x_fastest() {
        // Index of (1, 2, 3) in a 2x3x4 volume: 1 + 2*2 + 3*2*3 = 23.
        let mut cells = vec![VoxelCell::Empty; 24];
        cells[23] = VoxelCell::Solid;
        let volume = VoxelVolume::from_cells(2, 3, 4, Point3::new(0, 0, 0), cells);
        assert!(volume.get_cell(1, 2, 3).is_solid());
        assert!(!volume.get_cell(0, 2, 3).is_solid());
        assert!(!volume.get_cell(1, 2, 2).is_solid());
    }

    #[test]
    fn set_cell_marks_dirty_only_on_change() {
        let mut volume = small_volume();
        volume.clear_dirty();

        volume.set_cell(1, 1, 1, VoxelCell::Empty);
        assert!(!volume.is_dirty());

        volume.set_cell(1, 1, 1, VoxelCell::Solid);
        assert!(volume.is_dirty());

        volume.clear_dirty();
        volume.set_cell(1, 1, 1, VoxelCell::Solid);
        assert!(!volume.is_dirty());
    }

    #[test]
    fn boundary_counts_as_exposed() {
        let mut volume = VoxelVolume::new(1, 1, 1, Point3::new(0, 0, 0));
        volume.set_cell(0, 0, 0, VoxelCell::Solid);
        assert_eq!(volume.exposed_faces(0, 0, 0), 0b11_1111);
    }

    #[test]
    fn buried_cell_has_no_exposed_faces() {
        let mut volume = small_volume();
        for z in 0..3 {
            for y in 0..3 {
                for x in 0..3 {
                    volume.set_cell(x, y, z, VoxelCell::Solid);
                }
            }
        }
        assert_eq!(volume.exposed_faces(1, 1, 1), 0);
        // A face-center cell of the solid block sees empty space only
        // through the chunk boundary.
        assert_eq!(volume.exposed_faces(0, 1, 1), FaceDirection::Left.bit());
        assert_eq!(volume.exposed_faces(1, 1, 2), FaceDirection::Back.bit());
    }

    #[test]
    fn solid_neighbor_hides_the_shared_face() {
        let mut volume = small_volume();
        volume.set_cell(1, 1, 1, VoxelCell::Solid);
        volume.set_cell(2, 1, 1, VoxelCell::Solid);

        let mask = volume.exposed_faces(1, 1, 1);
        assert_eq!(mask & FaceDirection::Right.bit(), 0);
        assert_ne!(mask & FaceDirection::Left.bit(), 0);
        assert_ne!(mask & FaceDirection::Top.bit(), 0);
    }
}
