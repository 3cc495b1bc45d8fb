//! # Engine State Module
//!
//! The core engine module that manages the state and functionality of the
//! destructible-terrain runtime.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `buffer_state` - Registry for shared GPU buffers
//! * `camera_state` - Handles camera positioning and movement
//! * `rendering` - Contains the terrain pipeline and per-chunk mesh state
//! * `terrain` - Holds the voxel world, its chunks, and generation
//!
//! ## Architecture
//!
//! `EngineState` owns every subsystem directly and steps them once per
//! frame, always in the same order: intake input, move the camera, apply
//! terrain edits, then run the mesh update that folds all of the frame's
//! edits into at most one rebuild per chunk. Rendering happens afterwards
//! from whatever the update uploaded. Everything runs on the main thread;
//! frame-to-frame work never overlaps.

use log::info;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::keyboard::KeyCode;

use camera_state::{camera, CameraState};
use rendering::TerrainRendererManager;
use terrain::world::TerrainWorld;

use crate::application_state::input_state::ProcessedInputState;
use crate::settings::GameSettings;

mod buffer_state;
mod camera_state;
mod rendering;
mod terrain;

/// Distance ahead of the camera, in cells, where a fired shot detonates
const FIRE_REACH: f32 = 14.0;

/// The main state container for the terrain engine
///
/// This struct owns every subsystem and coordinates their interactions.
/// It handles input translation, camera movement, terrain edits, the
/// once-per-frame mesh update, and rendering.
pub struct EngineState {
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Registry for shared GPU buffers
    pub buffer_state: buffer_state::BufferState,
    /// Manager for the terrain pipeline and per-chunk mesh state
    pub render_manager: TerrainRendererManager,
    /// The destructible terrain world
    pub world: TerrainWorld,
    settings: GameSettings,
}

impl EngineState {
    /// Creates a new engine state with all subsystems initialized
    ///
    /// Tiles the terrain world, registers one set of worst-case mesh
    /// buffers per chunk, and sets up the camera over the arena. The
    /// chunks start dirty, so the first frame's update meshes everything.
    ///
    /// # Arguments
    ///
    /// * `surface` - The rendering surface
    /// * `surface_config` - Configuration for the rendering surface
    /// * `device` - The GPU device
    /// * `queue` - The GPU command queue
    /// * `shader_string` - WGSL source for the terrain shader
    /// * `settings` - Game settings loaded at startup
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        shader_string: String,
        settings: GameSettings,
    ) -> Self {
        let mut buffer_state = buffer_state::BufferState::new(device.clone(), queue.clone());

        let camera_projection = camera::Projection::new(
            surface_config.width,
            surface_config.height,
            cgmath::Deg(45.0),
            0.1,
            1000.0,
        );

        let camera_state = CameraState::new(&mut buffer_state, &camera_projection, &settings);

        let mut render_manager = TerrainRendererManager::new(
            surface,
            surface_config,
            device.clone(),
            queue,
            &shader_string,
            camera_projection,
            &buffer_state,
        );

        let world = TerrainWorld::new(&settings);
        for coord in world.chunk_coords().collect::<Vec<_>>() {
            render_manager
                .mesh_manager
                .register_chunk(&device, coord, world.cells_per_chunk());
        }

        info!(
            "Registered {} chunks holding {} bytes of mesh buffers",
            render_manager.mesh_manager.chunk_count(),
            render_manager.mesh_manager.allocated_bytes()
        );

        Self {
            camera_state,
            player_actions: PlayerAction::default(),
            buffer_state,
            render_manager,
            world,
            settings,
        }
    }

    /// Resizes the rendering surface when the window size changes
    ///
    /// # Arguments
    ///
    /// * `size` - The new physical size of the window
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.render_manager.resize_surface(size);
    }

    /// Renders the current frame from the last-uploaded chunk meshes
    pub fn render(&mut self) {
        self.render_manager.render();
    }

    /// Steps the simulation for one frame
    ///
    /// Moves the camera, applies the frame's terrain edits, then runs the
    /// mesh update. However many cells this frame's actions flipped, each
    /// chunk rebuilds at most once here.
    ///
    /// # Arguments
    ///
    /// * `wait_duration` - The time elapsed since the last frame
    pub fn process_update(&mut self, wait_duration: web_time::Duration) {
        self.camera_state.intake_actions(&self.player_actions);
        self.camera_state.update(
            wait_duration,
            &self.render_manager.camera_projection,
            &mut self.buffer_state,
        );

        if self.player_actions.fire {
            let impact = self.camera_state.aim_point(FIRE_REACH);
            self.world.carve_sphere(impact, self.settings.carve_radius);
        }

        if self.player_actions.regenerate_terrain {
            info!(
                "Regenerating terrain with method '{}'",
                self.settings.terrain_method
            );
            self.world
                .regenerate(&self.settings.terrain_method, self.settings.terrain_seed);
        }

        self.render_manager.update_meshes(&mut self.world);
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = translate_processed_input(input);

        if self.player_actions.log_buffer_stats {
            info!(
                "Shared buffers: {} bytes allocated, {} bytes written high-water, {} writes",
                self.buffer_state.get_total_allocated_memory(),
                self.buffer_state.get_total_used_memory(),
                self.buffer_state.get_total_times_written()
            );
            info!(
                "Chunk mesh buffers: {} bytes allocated, {} indices resident",
                self.render_manager.mesh_manager.allocated_bytes(),
                self.render_manager.mesh_manager.total_index_count()
            );
        }
    }
}

/// Translates the processed input state into player actions.
///
/// # Arguments
/// * `input` - The processed input state to translate
///
/// # Returns
/// A PlayerAction struct with the appropriate actions set
fn translate_processed_input(input: ProcessedInputState) -> PlayerAction {
    let mut player_action = PlayerAction::default();

    // Movement actions - active if key is pressed or held
    player_action.move_forward = input.get_key_state(KeyCode::KeyW).is_active();
    player_action.move_backward = input.get_key_state(KeyCode::KeyS).is_active();
    player_action.move_left = input.get_key_state(KeyCode::KeyA).is_active();
    player_action.move_right = input.get_key_state(KeyCode::KeyD).is_active();
    player_action.move_up = input.get_key_state(KeyCode::Space).is_active();
    player_action.move_down = input.get_key_state(KeyCode::ShiftLeft).is_active();

    // Mouse rotation - active if left button is pressed or held & mouse has moved
    if input.get_mouse_delta().is_some()
        && input
            .get_mouse_button_state(winit::event::MouseButton::Left)
            .is_active()
    {
        player_action.rotate_view = input.mouse_delta;
    }

    // Edge-triggered actions fire once per press, not per frame held
    player_action.fire = input
        .get_mouse_button_state(winit::event::MouseButton::Right)
        .is_just_pressed();
    player_action.regenerate_terrain = input.get_key_state(KeyCode::KeyR).is_just_pressed();
    player_action.log_buffer_stats = input.get_key_state(KeyCode::KeyB).is_just_pressed();

    player_action
}

/// Represents player actions derived from input
///
/// This struct contains flags for various player actions that can be
/// triggered by input, such as movement, camera control, and terrain
/// destruction.
#[derive(Default)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    move_forward: bool,
    move_backward: bool,
    move_left: bool,
    move_right: bool,
    move_up: bool,
    move_down: bool,

    /// View rotation - Some if mouse is pressed or held
    rotate_view: Option<(f64, f64)>,

    /// Actions that should only trigger on key press, not hold
    fire: bool,
    regenerate_terrain: bool,
    log_buffer_stats: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_state::input_state::{ProcessedInputState, RawInputState};
    use std::collections::HashMap;
    use winit::event::MouseButton;

    #[test]
    fn held_movement_and_pressed_actions_translate() {
        let mut keyboard_states = HashMap::new();
        keyboard_states.insert(KeyCode::KeyW, RawInputState::Held);
        keyboard_states.insert(KeyCode::KeyR, RawInputState::Pressed);
        keyboard_states.insert(KeyCode::KeyB, RawInputState::Held);
        let mut mouse_button_states = HashMap::new();
        mouse_button_states.insert(MouseButton::Right, RawInputState::Pressed);
        mouse_button_states.insert(MouseButton::Left, RawInputState::Held);
        let input = ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: Some((3.0, -1.0)),
        };

        let actions = translate_processed_input(input);
        assert!(actions.move_forward);
        assert!(!actions.move_backward);
        assert!(actions.fire);
        assert!(actions.regenerate_terrain);
        // Held is not a fresh press, so the stats dump stays off.
        assert!(!actions.log_buffer_stats);
        assert_eq!(actions.rotate_view, Some((3.0, -1.0)));
    }

    #[test]
    fn look_requires_the_left_button() {
        let input = ProcessedInputState {
            keyboard_states: HashMap::new(),
            mouse_button_states: HashMap::new(),
            mouse_delta: Some((5.0, 5.0)),
        };
        let actions = translate_processed_input(input);
        assert_eq!(actions.rotate_view, None);
    }

    #[test]
    fn absent_keys_translate_to_no_action() {
        let input = ProcessedInputState {
            keyboard_states: HashMap::new(),
            mouse_button_states: HashMap::new(),
            mouse_delta: None,
        };
        let actions = translate_processed_input(input);
        assert!(!actions.move_forward && !actions.move_down);
        assert!(!actions.fire && !actions.regenerate_terrain);
    }
}
