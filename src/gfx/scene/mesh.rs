use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::{
    error::Result,
    gfx::{
        camera::camera_utils::convert_matrix4_to_array,
        geometry::{self, GeometryData, Shape},
        transform::Pose,
    },
    wgpu_utils::UniformBuffer,
};

use super::vertex::Vertex3D;

/// Per-mesh uniform content. MUST match `ModelUniform` in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

/// GPU-side copies of a mesh: vertex/index buffers and its model uniform.
pub struct MeshGpuResources {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: UniformBuffer<ModelUniform>,
    model_bind_group: wgpu::BindGroup,
}

/// Renderable geometry together with the pose that places it in the world.
///
/// Geometry is fixed once generated; only the pose changes between frames.
pub struct Mesh {
    geometry: GeometryData,
    pose: Pose,
    gpu_resources: Option<MeshGpuResources>, // None until init_gpu_resources called
}

impl Mesh {
    /// Wrap generated geometry with an identity pose
    pub fn new(geometry: GeometryData) -> Self {
        Self {
            geometry,
            pose: Pose::default(),
            gpu_resources: None,
        }
    }

    pub fn from_shape(shape: Shape, resolution: u32) -> Result<Self> {
        shape.generate(resolution).map(Self::new)
    }

    pub fn sphere(resolution: u32) -> Result<Self> {
        geometry::generate_sphere(resolution).map(Self::new)
    }

    pub fn cone(resolution: u32) -> Result<Self> {
        geometry::generate_cone(resolution).map(Self::new)
    }

    pub fn cylinder(resolution: u32) -> Result<Self> {
        geometry::generate_cylinder(resolution).map(Self::new)
    }

    pub fn cube(resolution: u32) -> Self {
        Self::new(geometry::generate_cube(resolution))
    }

    pub fn torus(resolution: u32) -> Result<Self> {
        geometry::generate_torus(resolution).map(Self::new)
    }

    pub fn geometry(&self) -> &GeometryData {
        &self.geometry
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    /// Builder-style pose replacement
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn compute_transformation_matrix(&self) -> Matrix4<f32> {
        self.pose.compute_transformation_matrix()
    }

    pub fn vertices(&self) -> Vec<Vertex3D> {
        Vertex3D::interleave(&self.geometry.positions, &self.geometry.colors)
    }

    pub fn is_uploaded(&self) -> bool {
        self.gpu_resources.is_some()
    }

    pub fn gpu_resources(&self) -> Option<&MeshGpuResources> {
        self.gpu_resources.as_ref()
    }

    /// Upload geometry and create the model uniform bound through `model_layout`.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, model_layout: &wgpu::BindGroupLayout) {
        let vertices = self.vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&self.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let model_buffer = UniformBuffer::new_with_data(device, &self.model_uniform());

        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout: model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.binding_resource(),
            }],
        });

        log::debug!(
            "uploaded mesh: {} vertices ({} bytes), {} indices",
            vertices.len(),
            std::mem::size_of_val(vertices.as_slice()),
            self.geometry.indices.len()
        );

        self.gpu_resources = Some(MeshGpuResources {
            vertex_buffer,
            index_buffer,
            index_count: self.geometry.indices.len() as u32,
            model_buffer,
            model_bind_group,
        });
    }

    /// Push the current model matrix to the GPU if the mesh is uploaded
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        let content = self.model_uniform();
        if let Some(gpu_resources) = self.gpu_resources.as_mut() {
            gpu_resources.model_buffer.update_content(queue, content);
        }
    }

    /// Destroy the GPU buffers; the CPU geometry stays and can be re-uploaded.
    pub fn release_gpu_resources(&mut self) {
        if let Some(gpu_resources) = self.gpu_resources.take() {
            gpu_resources.vertex_buffer.destroy();
            gpu_resources.index_buffer.destroy();
            gpu_resources.model_buffer.buffer().destroy();
        }
    }

    fn model_uniform(&self) -> ModelUniform {
        ModelUniform {
            model: convert_matrix4_to_array(self.compute_transformation_matrix()),
        }
    }
}

pub trait DrawMesh {
    fn draw_mesh(&mut self, mesh: &Mesh);
}

impl DrawMesh for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &Mesh) {
        // Skip drawing if not uploaded
        let Some(gpu_resources) = mesh.gpu_resources() else {
            return;
        };

        self.set_bind_group(1, &gpu_resources.model_bind_group, &[]);
        self.set_vertex_buffer(0, gpu_resources.vertex_buffer.slice(..));
        self.set_index_buffer(
            gpu_resources.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        self.draw_indexed(0..gpu_resources.index_count, 0, 0..1);
    }
}
