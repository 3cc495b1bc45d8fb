//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - Player input processing for camera control
//! - Aim-point calculation for terrain destruction
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Handles player input and updates camera state
//! - `Projection`: Manages the camera's projection matrix
//! - `CameraUniform`: GPU representation of camera data for shaders
//!
//! The camera uniform buffer is pushed to the GPU only on frames where the
//! camera actually moved.

use camera::CameraController;
use cgmath::{Deg, Point3};

use super::{buffer_state::BufferState, PlayerAction};
use crate::settings::GameSettings;

pub mod camera;

/// Name of the GPU buffer used for camera uniform data
pub const CAMERA_BUFFER_NAME: &str = "camera_buffer";

/// Manages the complete camera system including state, controls, and the
/// camera's GPU uniform.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// GPU-optimized camera data for shaders
    pub camera_uniform: camera::CameraUniform,
    /// Handles player input and camera movement
    pub camera_controller: camera::CameraController,
}

impl CameraState {
    /// Creates a new CameraState and registers the camera uniform buffer.
    ///
    /// The camera spawns just west of the arena, looking across it (yaw
    /// zero faces +X).
    ///
    /// # Arguments
    /// * `buffer_state` - The registry the camera uniform buffer is created
    ///   in
    /// * `projection` - The initial camera projection settings
    /// * `settings` - Supplies the arena extents, movement speed, and look
    ///   sensitivity
    pub fn new(
        buffer_state: &mut BufferState,
        projection: &camera::Projection,
        settings: &GameSettings,
    ) -> Self {
        let camera_position = Point3::new(
            -(settings.chunk_width as f32) * 0.5,
            settings.chunk_height as f32 + 6.0,
            settings.world_chunks_z as f32 * settings.chunk_depth as f32 * 0.5,
        );
        let camera = camera::Camera::new(camera_position, Deg(0.0), Deg(-20.0));
        let camera_controller =
            CameraController::new(settings.camera_speed, settings.camera_sensitivity);

        let mut camera_uniform = camera::CameraUniform::new();
        camera_uniform.update_view_proj_and_pos(&camera, projection);

        buffer_state.create_buffer_init(
            CAMERA_BUFFER_NAME,
            wgpu::util::BufferInitDescriptor {
                label: Some(CAMERA_BUFFER_NAME),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        CameraState {
            camera,
            camera_uniform,
            camera_controller,
        }
    }

    /// Processes player input actions and updates the camera controller
    /// state.
    ///
    /// # Arguments
    /// * `actions` - The player's input actions to process
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Updates the camera state based on elapsed time and pushes a fresh
    /// uniform to the GPU when anything moved.
    ///
    /// # Arguments
    /// * `dt` - Time elapsed since the last update
    /// * `projection` - Current camera projection settings
    /// * `buffer_state` - The registry holding the camera uniform buffer
    pub fn update(
        &mut self,
        dt: web_time::Duration,
        projection: &camera::Projection,
        buffer_state: &mut BufferState,
    ) {
        if self.camera_controller.has_updates() {
            self.camera
                .apply_controller_updates(&mut self.camera_controller, dt);
            self.camera_uniform
                .update_view_proj_and_pos(&self.camera, projection);
            buffer_state.write_buffer(
                CAMERA_BUFFER_NAME,
                0,
                bytemuck::cast_slice(&[self.camera_uniform]),
            );
        }
    }

    /// World-space point `distance` ahead of the camera along its look
    /// direction. Shots detonate here.
    pub fn aim_point(&self, distance: f32) -> Point3<f32> {
        self.camera.position + self.camera.look_vec() * distance
    }
}
