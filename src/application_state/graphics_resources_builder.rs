//! # Graphics Resources Builder
//!
//! Handles the creation of the window and the WebGPU resources backing it.
//! Initialization is asynchronous: the builder kicks off resource creation
//! and delivers the finished [`Graphics`] bundle back to the event loop as
//! a user event.
//!
//! The main components are:
//! - `Graphics`: Holds all graphics-related resources
//! - `GraphicsBuilder`: Helper for asynchronous graphics initialization
//! - `MaybeGraphics`: Represents the various states of graphics initialization

use std::future::Future;
use std::sync::Arc;

use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::{
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::Window,
};

/// Path of the terrain shader loaded at startup.
const TERRAIN_SHADER_PATH: &str = "assets/shaders/terrain.wgsl";

/// Contains all graphics-related resources required by the application.
///
/// This struct holds handles to WebGPU resources and the loaded shader
/// source. It's created once during application initialization and then
/// dismantled into the engine state.
#[derive(Default)]
pub struct Graphics {
    pub window: Option<Arc<Window>>,
    pub surface: Option<Surface<'static>>,
    pub surface_config: Option<SurfaceConfiguration>,
    pub device: Option<Device>,
    pub queue: Option<Queue>,
    pub shader_file_string: String,
}

/// Asynchronously creates and initializes all required graphics resources.
///
/// The window, instance and surface are created synchronously (they need
/// the event loop); adapter and device requests happen in the returned
/// future.
///
/// # Arguments
/// * `event_loop` - The active event loop used to create the window and surface
///
/// # Returns
/// A `Future` that resolves to the initialized `Graphics` when complete
fn create_graphics(event_loop: &ActiveEventLoop) -> impl Future<Output = Graphics> + 'static {
    let window_attrs = Window::default_attributes().with_title("Voxel Arena");
    let window = Arc::new(event_loop.create_window(window_attrs).unwrap());

    // The instance is a handle to our GPU
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        flags: wgpu::InstanceFlags::empty(),
        backend_options: wgpu::BackendOptions::from_env_or_default(),
    });

    let surface = instance.create_surface(window.clone()).unwrap();

    async move {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .unwrap();

        let size = window.inner_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let shader_string =
            std::fs::read_to_string(TERRAIN_SHADER_PATH).expect("Failed to read terrain shader");

        surface.configure(&device, &surface_config);
        Graphics {
            window: Some(window),
            surface: Some(surface),
            surface_config: Some(surface_config),
            device: Some(device),
            queue: Some(queue),
            shader_file_string: shader_string,
        }
    }
}

/// Helper struct for managing the asynchronous initialization of graphics resources.
pub struct GraphicsBuilder {
    event_loop_proxy: Option<EventLoopProxy<Graphics>>,
}

/// Represents the possible states of the graphics initialization process.
///
/// This enum is used to track the current state of graphics resources
/// throughout the application's lifecycle.
pub enum MaybeGraphics {
    /// State during asynchronous graphics initialization
    Builder(GraphicsBuilder),

    /// State when graphics resources are fully initialized and ready for use
    Graphics(Graphics),

    /// State after graphics resources have been moved to another owner
    Moved,
}

impl GraphicsBuilder {
    /// Creates a new GraphicsBuilder with the specified event loop proxy.
    ///
    /// # Arguments
    /// * `event_loop_proxy` - Used to send the initialized graphics resources back to the main thread
    ///
    /// # Returns
    /// A new `GraphicsBuilder` instance ready to begin graphics initialization
    pub fn new(event_loop_proxy: EventLoopProxy<Graphics>) -> Self {
        Self {
            event_loop_proxy: Some(event_loop_proxy),
        }
    }

    /// Initiates the graphics initialization process.
    ///
    /// Blocks on resource creation and sends the result back to the event
    /// loop through the proxy.
    ///
    /// # Arguments
    /// * `event_loop` - The active event loop used to create the graphics context
    ///
    /// # Panics
    /// Panics if sending the finished resources to the event loop fails
    pub fn build_and_send(&mut self, event_loop: &ActiveEventLoop) {
        let Some(event_loop_proxy) = self.event_loop_proxy.take() else {
            // event_loop_proxy is already spent - we already constructed Graphics
            return;
        };

        let gfx = pollster::block_on(create_graphics(event_loop));
        assert!(event_loop_proxy.send_event(gfx).is_ok());
    }
}
