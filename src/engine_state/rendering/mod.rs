//! Rendering system for the terrain engine.
//!
//! This module contains the core rendering functionality: the terrain
//! pipeline, the depth attachment, and per-chunk mesh state. It provides a
//! high-level interface for drawing the destructible arena with WebGPU.

pub use meshing::MeshManager;
use log::error;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use super::buffer_state::BufferState;
use super::camera_state::{camera, CAMERA_BUFFER_NAME};
use super::terrain::world::TerrainWorld;

pub mod meshing;
mod texture;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;

/// Sky color cleared behind the terrain each frame.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.53,
    g: 0.71,
    b: 0.92,
    a: 1.0,
};

/// Manages the terrain rendering pipeline.
///
/// This struct is the main entry point for all rendering operations. It
/// owns the WebGPU surface, the terrain pipeline, the depth attachment,
/// and the per-chunk mesh state.
pub struct TerrainRendererManager {
    /// The WebGPU surface being rendered to
    pub surface: Surface<'static>,
    /// Configuration for the surface (size, format, etc.)
    pub surface_config: SurfaceConfiguration,
    /// The WebGPU device used for creating GPU resources
    pub device: Device,
    /// The WebGPU queue for submitting command buffers
    pub queue: Queue,
    /// Camera projection settings
    pub camera_projection: camera::Projection,
    /// Per-chunk mesh caches and GPU buffers
    pub mesh_manager: MeshManager,
    render_pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    depth_texture: texture::Texture,
}

impl TerrainRendererManager {
    /// Creates a new `TerrainRendererManager` instance.
    ///
    /// This initializes the terrain pipeline, the camera bind group over
    /// the shared camera uniform, and the depth attachment.
    ///
    /// # Arguments
    /// * `surface` - The WebGPU surface to render to
    /// * `surface_config` - Configuration for the surface
    /// * `device` - The WebGPU device
    /// * `queue` - The WebGPU queue
    /// * `shader_string` - WGSL source code for the terrain shader
    /// * `camera_projection` - Initial camera projection settings
    /// * `buffer_state` - Registry holding the camera uniform buffer
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
        shader_string: &str,
        camera_projection: camera::Projection,
        buffer_state: &BufferState,
    ) -> Self {
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer_state.get_entire_binding(CAMERA_BUFFER_NAME),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Terrain Render Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Terrain Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_string.into()),
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Terrain Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: texture::Texture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture =
            texture::Texture::create_depth_texture(&device, &surface_config, "Depth Texture");

        Self {
            surface,
            surface_config,
            device,
            queue,
            camera_projection,
            mesh_manager: MeshManager::new(),
            render_pipeline,
            camera_bind_group,
            depth_texture,
        }
    }

    /// Handles window resize events.
    ///
    /// Updates the surface configuration, camera projection, and depth
    /// attachment to match the new window size.
    ///
    /// # Arguments
    /// * `size` - The new window size in physical pixels
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);

        self.camera_projection.resize(size.width, size.height);
        self.depth_texture =
            texture::Texture::create_depth_texture(&self.device, &self.surface_config, "Depth Texture");
    }

    /// Runs the once-per-frame mesh update for every registered chunk.
    /// Returns how many chunks rebuilt this frame.
    pub fn update_meshes(&mut self, world: &mut TerrainWorld) -> usize {
        self.mesh_manager.update(world, &self.queue)
    }

    /// Renders a new frame: clears color and depth, then draws every
    /// chunk's last-uploaded mesh.
    ///
    /// # Panics
    /// Panics if the surface texture cannot be acquired.
    pub fn render(&mut self) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                error!("Error getting current frame: {:?}", err);
                panic!();
            }
        };

        let view = frame.texture.create_view(&Default::default());
        let mut encoder = self.device.create_command_encoder(&Default::default());
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            self.mesh_manager.draw(&mut render_pass);
        }

        self.queue.submit([encoder.finish()]);
        frame.present();
    }
}
