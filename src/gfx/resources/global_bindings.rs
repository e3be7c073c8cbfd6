//! Global uniform bindings for camera data
//!
//! The view and projection matrices are shared by every mesh in a frame and
//! bound once at group 0.

use crate::{gfx::camera::CameraUniform, wgpu_utils::{binding_types, UniformBuffer}};

/// Type alias for the global uniform buffer. MUST match `CameraUniform` in `shader.wgsl`.
pub type GlobalUBO = UniformBuffer<CameraUniform>;

/// Bind group layout and bind group for the global uniforms (group 0).
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = binding_types::vertex_uniform_layout(device, "Globals Bind Group Layout");

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Uploads the camera matrices for the coming frame
pub fn update_global_ubo(ubo: &mut GlobalUBO, queue: &wgpu::Queue, camera: CameraUniform) {
    ubo.update_content(queue, camera);
}
