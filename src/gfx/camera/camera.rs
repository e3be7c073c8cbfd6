use cgmath::{perspective, Deg, Matrix4};

use crate::gfx::transform::Pose;

use super::camera_utils::CameraUniform;

/// A perspective camera placed in the world by its own [`Pose`].
///
/// The view matrix is the inverse of the camera pose: moving the camera to
/// `(0, -10, 0)` moves the world by `(0, 10, 0)` relative to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pose: Pose,
    fov: f32, // degrees
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pose: Pose::default(),
            fov: 45.0,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

impl Camera {
    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            pose: Pose::default(),
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    /// Vertical field of view, in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, degrees: f32) {
        self.fov = degrees;
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn set_far(&mut self, far: f32) {
        self.far = far;
    }

    /// Recompute the aspect ratio from the output surface size.
    ///
    /// A zero-height surface (minimized window) leaves the ratio untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!(
                "ignoring degenerate surface size {}x{} for aspect ratio",
                width,
                height
            );
            return;
        }
        self.aspect_ratio = width as f32 / height as f32;
    }

    pub fn compute_view_matrix(&self) -> Matrix4<f32> {
        self.pose.compute_inverse_matrix()
    }

    /// OpenGL-convention perspective projection (clip depth in `[-1, 1]`).
    pub fn compute_projection_matrix(&self) -> Matrix4<f32> {
        perspective(Deg(self.fov), self.aspect_ratio, self.near, self.far)
    }

    /// GPU-ready view and projection for the current frame.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::for_wgpu(self.compute_view_matrix(), self.compute_projection_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector3, Vector4};

    #[test]
    fn test_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.fov(), 45.0);
        assert_eq!(camera.aspect_ratio(), 1.0);
        assert_eq!(camera.near(), 0.1);
        assert_eq!(camera.far(), 10.0);
        assert_eq!(camera.compute_view_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_projection_matches_perspective_formula() {
        let camera = Camera::new(45.0, 1.0, 0.1, 10.0);
        let (fov, aspect, near, far) = (45.0_f32.to_radians(), 1.0_f32, 0.1_f32, 10.0_f32);
        let f = 1.0 / (fov / 2.0).tan();

        #[rustfmt::skip]
        let expected = Matrix4::new(
            f / aspect, 0.0, 0.0,                               0.0,
            0.0,        f,   0.0,                               0.0,
            0.0,        0.0, (far + near) / (near - far),      -1.0,
            0.0,        0.0, 2.0 * far * near / (near - far),   0.0,
        );

        let actual = camera.compute_projection_matrix();
        for col in 0..4 {
            for row in 0..4 {
                assert!(
                    (actual[col][row] - expected[col][row]).abs() < 1e-5,
                    "entry ({}, {})",
                    row,
                    col
                );
            }
        }
    }

    #[test]
    fn test_view_is_inverse_of_pose() {
        let mut camera = Camera::default();
        camera.pose_mut().set_translation(Vector3::new(0.0, -10.0, 0.0));
        camera.pose_mut().set_rotation_x(90.0);

        let eye_in_view = camera.compute_view_matrix() * Vector4::new(0.0, -10.0, 0.0, 1.0);
        assert!(eye_in_view.truncate().x.abs() < 1e-5);
        assert!(eye_in_view.truncate().y.abs() < 1e-5);
        assert!(eye_in_view.truncate().z.abs() < 1e-5);

        // The origin ends up straight ahead, ten units down -Z
        let origin = camera.compute_view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(origin.x.abs() < 1e-5);
        assert!(origin.y.abs() < 1e-4);
        assert!((origin.z + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize_updates_aspect_ratio() {
        let mut camera = Camera::default();
        camera.resize(1024, 768);
        assert!((camera.aspect_ratio() - 1024.0 / 768.0).abs() < f32::EPSILON);

        camera.resize(800, 0);
        assert!((camera.aspect_ratio() - 1024.0 / 768.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_uniform_carries_both_matrices() {
        let camera = Camera::default();
        let uniform = camera.uniform();
        assert_eq!(uniform.view[0][0], 1.0);
        assert_eq!(uniform.projection[2][3], -1.0);
    }
}
