// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

/// Typed uniform buffer holding one `Content` value.
///
/// The last uploaded bytes are kept on the CPU side. `update_content` compares
/// against them and only queues a write when the value differs, so a static
/// camera or a mesh whose pose did not move costs no transfer per frame.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    // Empty until the first upload, so the first update always writes
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Short type name for buffer labels, e.g. `CameraUniform`
    fn label() -> String {
        let type_name = std::any::type_name::<Content>();
        let short = type_name.rsplit("::").next().unwrap_or(type_name);
        format!("UniformBuffer: {}", short)
    }

    fn create(device: &wgpu::Device, mapped_at_creation: bool) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&Self::label()),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation,
        })
    }

    /// Zero-initialized buffer; the first `update_content` always uploads.
    pub fn new(device: &wgpu::Device) -> Self {
        UniformBuffer {
            buffer: Self::create(device, false),
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Buffer filled with `initial_content` at creation, without a queue write.
    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        let bytes = bytemuck::bytes_of(initial_content);
        let buffer = Self::create(device, true);
        buffer
            .slice(..)
            .get_mapped_range_mut()
            .copy_from_slice(bytes);
        buffer.unmap();

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: bytes.to_vec(),
        }
    }

    /// Queue a write of `content` unless it matches what was last uploaded.
    /// Returns whether a write was queued.
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) -> bool {
        let bytes = bytemuck::bytes_of(&content);
        if self.previous_content == bytes {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        self.previous_content.clear();
        self.previous_content.extend_from_slice(bytes);
        true
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{camera::CameraUniform, scene::ModelUniform};

    #[test]
    fn test_label_uses_short_type_name() {
        assert_eq!(
            UniformBuffer::<CameraUniform>::label(),
            "UniformBuffer: CameraUniform"
        );
        assert_eq!(
            UniformBuffer::<ModelUniform>::label(),
            "UniformBuffer: ModelUniform"
        );
        assert_eq!(UniformBuffer::<[f32; 4]>::label(), "UniformBuffer: [f32; 4]");
    }
}
