//! # Destructible Terrain Core
//!
//! This module contains the terrain data model: the voxel grid the rest of
//! the engine reads, edits, and meshes.
//!
//! ## Architecture
//!
//! The terrain system is organized into several key components:
//!
//! * **Voxel**: The binary occupancy state of a single cell
//! * **Face**: The six axis-aligned face directions, their exposure bits,
//!   and their quad geometry
//! * **Volume**: A dense per-chunk grid with coalescing change tracking
//! * **Generator**: Startup fills (heightfield, solid, scatter, empty)
//! * **World**: The fixed tiling of chunks and world-space edit routing
//!
//! ## Data Flow
//!
//! 1. The world tiles its chunks at startup and generates their contents
//! 2. Gameplay edits (spherical carves, regeneration) route through the
//!    world to individual volumes via `set_cell`
//! 3. Each real change marks its volume dirty
//! 4. Once per frame the mesh layer rebuilds dirty volumes and clears the
//!    flags
//!
//! Everything here is CPU-side and single-threaded; rendering reads these
//! structures during its once-per-frame update and never holds onto them.

pub mod face;
pub mod generator;
pub mod volume;
pub mod voxel;
pub mod world;
