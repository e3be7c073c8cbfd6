use cgmath::{Matrix4, SquareMatrix};

/// Remaps OpenGL clip depth `[-1, 1]` to the `[0, 1]` range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// World to camera space.
    pub view: [[f32; 4]; 4],

    /// Camera space to clip space, already corrected for wgpu depth when
    /// produced by [`CameraUniform::for_wgpu`].
    pub projection: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: convert_matrix4_to_array(Matrix4::identity()),
            projection: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

impl CameraUniform {
    /// Builds the uniform uploaded to the GPU from raw view/projection matrices.
    pub fn for_wgpu(view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self {
            view: convert_matrix4_to_array(view),
            projection: convert_matrix4_to_array(OPENGL_TO_WGPU_MATRIX * projection),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
