//! Vertex data structures and layouts for terrain rendering.
//!
//! This module defines the vertex format emitted by the mesher and provides
//! the layout description the render pipeline binds it with.

/// A vertex in the terrain rendering pipeline.
///
/// Each exposed cell face contributes four of these: the corner position in
/// world space plus the face's axis-aligned unit normal, duplicated across
/// the quad so the fragment stage can shade flat faces without derivatives.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
///
/// Total size: 24 bytes, matching the vertex shader's expected input layout.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Corner position in world space
    pub position: [f32; 3],
    /// Unit normal of the emitting face
    pub normal: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex from a corner position and a face normal.
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Vertex { position, normal }
    }

    /// Returns the vertex buffer layout description for the shader pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: normal (vec3<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
