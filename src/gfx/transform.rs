//! # Poses and Model Matrices
//!
//! A [`Pose`] places an entity in the world: a translation, three independent
//! axis rotations in degrees and a uniform scale. Meshes and the camera each
//! own one.
//!
//! The model matrix is always composed as `T * S * Rx * Ry * Rz`, so a local
//! vertex is rotated about Z first, then Y, then X, then scaled, then
//! translated.

use cgmath::{Deg, Matrix4, Vector3, Zero};

/// Translation, per-axis rotation (degrees) and uniform scale of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    translation: Vector3<f32>,
    rotation_x: f32,
    rotation_y: f32,
    rotation_z: f32,
    scale: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            translation: Vector3::zero(),
            rotation_x: 0.0,
            rotation_y: 0.0,
            rotation_z: 0.0,
            scale: 1.0,
        }
    }
}

impl Pose {
    pub fn new(
        translation: Vector3<f32>,
        rotation_x: f32,
        rotation_y: f32,
        rotation_z: f32,
        scale: f32,
    ) -> Self {
        Self {
            translation,
            rotation_x,
            rotation_y,
            rotation_z,
            scale,
        }
    }

    pub fn translation(&self) -> Vector3<f32> {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.translation = translation;
    }

    /// Rotation about the X axis, in degrees
    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    pub fn set_rotation_x(&mut self, degrees: f32) {
        self.rotation_x = degrees;
    }

    /// Rotation about the Y axis, in degrees
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn set_rotation_y(&mut self, degrees: f32) {
        self.rotation_y = degrees;
    }

    /// Rotation about the Z axis, in degrees
    pub fn rotation_z(&self) -> f32 {
        self.rotation_z
    }

    pub fn set_rotation_z(&mut self, degrees: f32) {
        self.rotation_z = degrees;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the uniform scale factor. Zero is accepted and yields a singular matrix.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn translation_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
    }

    pub fn scale_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_scale(self.scale)
    }

    pub fn rotation_x_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Deg(self.rotation_x))
    }

    pub fn rotation_y_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(Deg(self.rotation_y))
    }

    pub fn rotation_z_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_z(Deg(self.rotation_z))
    }

    /// Model matrix of this pose: `T * S * Rx * Ry * Rz`.
    pub fn compute_transformation_matrix(&self) -> Matrix4<f32> {
        self.translation_matrix()
            * self.scale_matrix()
            * self.rotation_x_matrix()
            * self.rotation_y_matrix()
            * self.rotation_z_matrix()
    }

    /// Inverse of [`Pose::compute_transformation_matrix`], built from the
    /// inverted factors in reverse order rather than by general inversion.
    ///
    /// A zero scale produces non-finite entries instead of failing.
    pub fn compute_inverse_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_z(Deg(-self.rotation_z))
            * Matrix4::from_angle_y(Deg(-self.rotation_y))
            * Matrix4::from_angle_x(Deg(-self.rotation_x))
            * Matrix4::from_scale(1.0 / self.scale)
            * Matrix4::from_translation(-self.translation)
    }
}

/// Renders a matrix row by row with three decimals, for trace output.
pub fn format_matrix(matrix: &Matrix4<f32>) -> String {
    let mut out = String::new();
    for row in 0..4 {
        out.push('|');
        for col in 0..4 {
            out.push_str(&format!(" {:>8.3}", matrix[col][row]));
        }
        out.push_str(" |\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const EPS: f32 = 1e-5;

    fn assert_vec_close(actual: Vector4<f32>, expected: Vector4<f32>, eps: f32) {
        for i in 0..4 {
            assert!(
                (actual[i] - expected[i]).abs() <= eps,
                "component {}: {:?} != {:?}",
                i,
                actual,
                expected
            );
        }
    }

    fn assert_mat_close(actual: &Matrix4<f32>, expected: &Matrix4<f32>, eps: f32) {
        for col in 0..4 {
            for row in 0..4 {
                assert!(
                    (actual[col][row] - expected[col][row]).abs() <= eps,
                    "entry ({}, {}):\n{}!=\n{}",
                    row,
                    col,
                    format_matrix(actual),
                    format_matrix(expected)
                );
            }
        }
    }

    /// Applies Rz, Ry, Rx, scale and translation one after another with plain trig.
    fn reference_transform(pose: &Pose, v: [f32; 3]) -> Vector4<f32> {
        let [mut x, mut y, mut z] = v;

        let (s, c) = pose.rotation_z().to_radians().sin_cos();
        (x, y) = (x * c - y * s, x * s + y * c);

        let (s, c) = pose.rotation_y().to_radians().sin_cos();
        (x, z) = (x * c + z * s, -x * s + z * c);

        let (s, c) = pose.rotation_x().to_radians().sin_cos();
        (y, z) = (y * c - z * s, y * s + z * c);

        let k = pose.scale();
        let t = pose.translation();
        Vector4::new(x * k + t.x, y * k + t.y, z * k + t.z, 1.0)
    }

    #[test]
    fn test_default_is_identity() {
        let pose = Pose::default();
        assert_eq!(pose.compute_transformation_matrix(), Matrix4::identity());
        assert_eq!(pose.scale(), 1.0);
    }

    #[test]
    fn test_setters_write_their_own_field() {
        let mut pose = Pose::default();
        pose.set_rotation_x(10.0);
        pose.set_rotation_y(20.0);
        pose.set_rotation_z(30.0);
        pose.set_scale(4.0);
        pose.set_translation(Vector3::new(1.0, 2.0, 3.0));

        assert_eq!(pose.rotation_x(), 10.0);
        assert_eq!(pose.rotation_y(), 20.0);
        assert_eq!(pose.rotation_z(), 30.0);
        assert_eq!(pose.scale(), 4.0);
        assert_eq!(pose.translation(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotation_x_takes_y_to_z() {
        let mut pose = Pose::default();
        pose.set_rotation_x(90.0);
        let out = pose.compute_transformation_matrix() * Vector4::new(0.0, 1.0, 0.0, 0.0);
        assert_vec_close(out, Vector4::new(0.0, 0.0, 1.0, 0.0), EPS);
    }

    #[test]
    fn test_rotation_y_takes_z_to_x() {
        let mut pose = Pose::default();
        pose.set_rotation_y(90.0);
        let out = pose.compute_transformation_matrix() * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert_vec_close(out, Vector4::new(1.0, 0.0, 0.0, 0.0), EPS);
    }

    #[test]
    fn test_rotation_z_takes_x_to_y() {
        let mut pose = Pose::default();
        pose.set_rotation_z(90.0);
        let out = pose.compute_transformation_matrix() * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_vec_close(out, Vector4::new(0.0, 1.0, 0.0, 0.0), EPS);
    }

    #[test]
    fn test_composition_order() {
        let pose = Pose::new(Vector3::new(1.0, -2.0, 0.5), 90.0, 90.0, 90.0, 2.0);
        let v = [1.0, 2.0, 3.0];
        let out = pose.compute_transformation_matrix() * Vector4::new(v[0], v[1], v[2], 1.0);
        assert_vec_close(out, reference_transform(&pose, v), 1e-4);

        // Reversed rotation order lands elsewhere
        let reversed = pose.translation_matrix()
            * pose.scale_matrix()
            * pose.rotation_z_matrix()
            * pose.rotation_y_matrix()
            * pose.rotation_x_matrix();
        let other = reversed * Vector4::new(v[0], v[1], v[2], 1.0);
        assert!((other - out).x.abs() + (other - out).y.abs() + (other - out).z.abs() > 1.0);
    }

    #[test]
    fn test_composition_matches_reference_for_random_poses() {
        let mut rng = StdRng::seed_from_u64(0x7e55e1);
        for _ in 0..200 {
            let pose = Pose::new(
                Vector3::new(
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                ),
                rng.random_range(-180.0..180.0),
                rng.random_range(-180.0..180.0),
                rng.random_range(-180.0..180.0),
                rng.random_range(0.1..4.0),
            );
            let v = [
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            ];
            let out = pose.compute_transformation_matrix() * Vector4::new(v[0], v[1], v[2], 1.0);
            assert_vec_close(out, reference_transform(&pose, v), 1e-3);
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        let pose = Pose::new(Vector3::new(0.0, -10.0, 3.0), 90.0, -20.0, 60.0, 0.5);
        let product = pose.compute_inverse_matrix() * pose.compute_transformation_matrix();
        assert_mat_close(&product, &Matrix4::identity(), 1e-5);
    }

    #[test]
    fn test_zero_scale_is_singular_not_a_panic() {
        let mut pose = Pose::default();
        pose.set_scale(0.0);
        let m = pose.compute_transformation_matrix();
        assert!(m.invert().is_none());
        assert!(!pose.compute_inverse_matrix()[0][0].is_finite());
    }

    #[test]
    fn test_format_matrix_is_row_major() {
        let pose = Pose::new(Vector3::new(3.0, 0.0, 0.0), 0.0, 0.0, 0.0, 1.0);
        let text = format_matrix(&pose.compute_transformation_matrix());
        let first_row = text.lines().next().unwrap();
        assert!(first_row.trim_end().ends_with("3.000 |"));
        assert_eq!(text.lines().count(), 4);
    }
}
