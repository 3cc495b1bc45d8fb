//! # Voxel Arena Entry Point
//!
//! Native entry point for the game. It simply calls into the library's
//! `run()` function to load settings and start the event loop.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release
//! ```

fn main() {
    voxel_arena::run();
}
