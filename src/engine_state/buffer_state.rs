//! # Buffer State Module
//!
//! This module provides a centralized registry for GPU buffers shared
//! across the frame. It handles buffer creation, writing, and analytics.
//!
//! ## Architecture
//!
//! Per-chunk mesh buffers live with their chunks; everything shared across
//! subsystems (currently the camera uniform) is created and written through
//! this registry, referenced by name, so allocation and write traffic stay
//! observable in one place.
//!
//! ## Performance Considerations
//!
//! * Writes are bounds-checked against the tracked allocation before they
//!   reach the queue
//! * Usage analytics make it cheap to answer "how much GPU memory do we
//!   hold, and how much have we actually written"

use std::collections::HashMap;

use wgpu::{util::DeviceExt, Buffer, Device, Queue};

/// Analytics data for a GPU buffer.
///
/// Tracks memory allocation, usage, and write operations for a buffer.
#[derive(Debug)]
struct BufferAnalytics {
    /// Total memory allocated for the buffer in bytes
    allocated_memory: u64,
    /// High-water mark of bytes actually written
    used_memory: u64,
    /// Number of times the buffer has been written to
    times_written: u64,
}

/// Central registry for named GPU buffers.
pub struct BufferState {
    device: Device,
    queue: Queue,
    buffers: HashMap<&'static str, Buffer>,
    buffer_analytics: HashMap<&'static str, BufferAnalytics>,
}

impl BufferState {
    /// Creates an empty registry over the given device and queue.
    pub fn new(device: Device, queue: Queue) -> Self {
        Self {
            device,
            queue,
            buffers: HashMap::new(),
            buffer_analytics: HashMap::new(),
        }
    }

    /// Creates a buffer and initializes it with data.
    ///
    /// # Arguments
    ///
    /// * `buffer_name` - Unique name for the buffer
    /// * `init_descriptor` - Buffer initialization descriptor with data
    pub fn create_buffer_init(
        &mut self,
        buffer_name: &'static str,
        init_descriptor: wgpu::util::BufferInitDescriptor,
    ) {
        let buffer_analytics = BufferAnalytics {
            allocated_memory: init_descriptor.contents.len() as u64,
            used_memory: init_descriptor.contents.len() as u64,
            times_written: 1,
        };
        let buffer = self.device.create_buffer_init(&init_descriptor);

        self.buffers.insert(buffer_name, buffer);
        self.buffer_analytics.insert(buffer_name, buffer_analytics);
    }

    /// Writes raw byte data to a registered buffer.
    ///
    /// # Arguments
    ///
    /// * `buffer_name` - Name of the buffer to write to
    /// * `offset` - Byte offset in the buffer to start writing
    /// * `data` - Raw byte data to write
    ///
    /// # Panics
    ///
    /// Panics if the buffer does not exist or if the write would exceed
    /// buffer bounds.
    pub fn write_buffer(
        &mut self,
        buffer_name: &'static str,
        offset: wgpu::BufferAddress,
        data: &[u8],
    ) {
        let buffer = self.buffers.get(buffer_name).unwrap();
        let buffer_analytics = self.buffer_analytics.get_mut(buffer_name).unwrap();

        let buffer_size = buffer_analytics.allocated_memory;
        let data_size = data.len() as u64;

        if offset + data_size > buffer_size {
            panic!(
                "Buffer write out of bounds for buffer name '{}'",
                buffer_name
            );
        }

        self.queue.write_buffer(buffer, offset, data);
        buffer_analytics.used_memory = buffer_analytics.used_memory.max(offset + data_size);
        buffer_analytics.times_written += 1;
    }

    /// Gets a binding resource for the entire buffer.
    ///
    /// # Arguments
    ///
    /// * `buffer_name` - Name of the buffer to get a binding for
    ///
    /// # Panics
    ///
    /// Panics if the buffer does not exist.
    pub fn get_entire_binding(&self, buffer_name: &'static str) -> wgpu::BindingResource {
        let buffer = self.buffers.get(buffer_name).unwrap();
        buffer.as_entire_binding()
    }

    /// Gets the total allocated memory across registered buffers.
    pub fn get_total_allocated_memory(&self) -> u64 {
        self.buffer_analytics
            .values()
            .map(|buffer_analytics| buffer_analytics.allocated_memory)
            .sum()
    }

    /// Gets the high-water total of bytes written across registered buffers.
    pub fn get_total_used_memory(&self) -> u64 {
        self.buffer_analytics
            .values()
            .map(|buffer_analytics| buffer_analytics.used_memory)
            .sum()
    }

    /// Gets the total number of writes across registered buffers.
    pub fn get_total_times_written(&self) -> u64 {
        self.buffer_analytics
            .values()
            .map(|buffer_analytics| buffer_analytics.times_written)
            .sum()
    }
}
