#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Arena
//!
//! A destructible voxel arena built with Rust and WGPU.
//!
//! The world is a fixed grid of terrain chunks. Firing carves spheres out
//! of the terrain; every edited chunk is re-meshed with face culling into
//! preallocated buffers and redrawn the same frame.
//!
//! ## Key Modules
//!
//! * `application_state` - Application lifecycle, window and input management
//! * `engine_state` - Simulation and rendering: terrain, meshing, camera, GPU buffers
//! * `settings` - JSON-backed game configuration
//!
//! ## Architecture
//!
//! Startup is a handoff: the event loop builds graphics resources
//! asynchronously, then delivers them as a user event to the application
//! state, which constructs the engine. From then on each frame translates
//! input into player actions, applies terrain edits, re-meshes dirty
//! chunks, and draws.
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_arena::run();
//! }
//! ```

use application_state::{
    graphics_resources_builder::{GraphicsBuilder, MaybeGraphics},
    ApplicationState,
};

use winit::event_loop::EventLoop;

use log::info;

use crate::settings::{GameSettings, SETTINGS_PATH};

mod application_state;
mod engine_state;
mod settings;

/// Starts the game: loads settings, builds the event loop, and runs the
/// application until the window closes.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let settings = GameSettings::load_or_default(SETTINGS_PATH);
    info!("Settings: {:?}", settings);

    let event_loop = EventLoop::with_user_event().build().unwrap();

    let mut state: ApplicationState = ApplicationState {
        graphics: MaybeGraphics::Builder(GraphicsBuilder::new(event_loop.create_proxy())),
        state: None,
        settings,
    };

    let _ = event_loop.run_app(&mut state);
}
