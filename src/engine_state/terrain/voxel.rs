//! Voxel cell state.
//!
//! The terrain core tracks occupancy only: every cell of a chunk volume is
//! either solid or empty. Materials, damage state, and other per-voxel data
//! live outside this core.

/// Occupancy state of a single terrain cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoxelCell {
    /// The cell contains nothing and contributes no geometry.
    #[default]
    Empty,
    /// The cell is filled terrain; its exposed faces are drawn.
    Solid,
}

impl VoxelCell {
    /// Whether this cell blocks space.
    pub fn is_solid(self) -> bool {
        matches!(self, VoxelCell::Solid)
    }
}
