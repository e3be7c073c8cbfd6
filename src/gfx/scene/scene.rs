use cgmath::{Matrix4, Vector3};

use crate::{
    error::Result,
    gfx::{
        camera::Camera,
        geometry::Shape,
        transform::{format_matrix, Pose},
    },
};

use super::mesh::Mesh;

/// Stable handle to a mesh inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(usize);

impl MeshId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Main scene: the meshes it owns and the single camera looking at them
#[derive(Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    camera: Camera,
    start_time: Option<f32>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            meshes: Vec::new(),
            camera,
            start_time: None,
        }
    }

    /// The reference scene: five cones, one of them tilted, and a torus
    /// doubled in size, seen from below the XZ plane.
    pub fn demo() -> Result<Self> {
        let mut camera = Camera::default();
        camera.set_far(100.0);
        camera.pose_mut().set_translation(Vector3::new(0.0, -10.0, 0.0));
        camera.pose_mut().set_rotation_x(90.0);

        let mut scene = Scene::new(camera);

        let placements = [
            (80, Vector3::new(3.0, 0.0, 0.0)),
            (80, Vector3::new(0.0, 0.0, 0.0)),
            (16, Vector3::new(-3.0, 0.0, 0.0)),
            (80, Vector3::new(-1.5, -2.0, 0.0)),
        ];
        for (resolution, translation) in placements {
            let mut cone = Mesh::cone(resolution)?;
            cone.pose_mut().set_translation(translation);
            scene.add_mesh(cone);
        }

        let tilted = Pose::new(Vector3::new(1.0, -1.0, -1.0), -160.0, 20.0, 60.0, 1.0);
        scene.add_mesh(Mesh::cone(80)?.with_pose(tilted));

        let mut torus = Mesh::torus(80)?;
        torus.pose_mut().set_translation(Vector3::new(3.0, 0.0, 0.0));
        torus.pose_mut().set_scale(2.0);
        scene.add_mesh(torus);

        log::info!("demo scene built with {} meshes", scene.len());
        Ok(scene)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        debug_assert!(mesh.geometry().validate().is_ok());
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    /// Generate a shape and add it with an identity pose
    pub fn add_shape(&mut self, shape: Shape, resolution: u32) -> Result<MeshId> {
        let mesh = Mesh::from_shape(shape, resolution)?;
        Ok(self.add_mesh(mesh))
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(index, mesh)| (MeshId(index), mesh))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Run `animate` with the time elapsed since the first update.
    pub fn update<F>(&mut self, current_time: f32, mut animate: F)
    where
        F: FnMut(&mut Scene, f32),
    {
        let start = *self.start_time.get_or_insert(current_time);
        animate(self, current_time - start);
    }

    pub fn model_matrices(&self) -> Vec<(MeshId, Matrix4<f32>)> {
        self.iter()
            .map(|(id, mesh)| (id, mesh.compute_transformation_matrix()))
            .collect()
    }

    /// View matrix times each model matrix
    pub fn model_view_matrices(&self) -> Vec<(MeshId, Matrix4<f32>)> {
        let view = self.camera.compute_view_matrix();
        self.iter()
            .map(|(id, mesh)| (id, view * mesh.compute_transformation_matrix()))
            .collect()
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, model_layout: &wgpu::BindGroupLayout) {
        for mesh in self.meshes.iter_mut() {
            mesh.init_gpu_resources(device, model_layout);
        }
        log::info!("uploaded {} meshes", self.meshes.len());
    }

    /// Push every mesh's current model matrix to the GPU
    pub fn sync_transforms(&mut self, queue: &wgpu::Queue) {
        for mesh in self.meshes.iter_mut() {
            if log::log_enabled!(log::Level::Trace) {
                log::trace!(
                    "model matrix:\n{}",
                    format_matrix(&mesh.compute_transformation_matrix())
                );
            }
            mesh.update_transform(queue);
        }
    }

    pub fn release_gpu_resources(&mut self) {
        for mesh in self.meshes.iter_mut() {
            mesh.release_gpu_resources();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_add_and_lookup() {
        let mut scene = Scene::default();
        assert!(scene.is_empty());

        let cube = scene.add_mesh(Mesh::cube(0));
        let sphere = scene.add_shape(Shape::Sphere, 8).unwrap();
        assert_eq!(cube.index(), 0);
        assert_eq!(sphere.index(), 1);
        assert_eq!(scene.mesh(sphere).unwrap().geometry().vertex_count(), 64);

        scene
            .mesh_mut(cube)
            .unwrap()
            .pose_mut()
            .set_scale(3.0);
        assert_eq!(scene.mesh(cube).unwrap().pose().scale(), 3.0);
        assert!(scene.add_shape(Shape::Cone, 1).is_err());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_update_passes_elapsed_time() {
        let mut scene = Scene::default();
        let id = scene.add_mesh(Mesh::cube(0));

        let spin = |scene: &mut Scene, t: f32| {
            if let Some(mesh) = scene.mesh_mut(id) {
                mesh.pose_mut().set_rotation_z(90.0 * t);
            }
        };

        scene.update(12.5, spin);
        assert_eq!(scene.mesh(id).unwrap().pose().rotation_z(), 0.0);

        scene.update(14.5, spin);
        assert_eq!(scene.mesh(id).unwrap().pose().rotation_z(), 180.0);
    }

    #[test]
    fn test_torus_and_cone_scenario() {
        let mut scene = Scene::default();

        let mut cone = Mesh::cone(80).unwrap();
        cone.pose_mut().set_translation(Vector3::new(3.0, 0.0, 0.0));
        let cone_id = scene.add_mesh(cone);

        let mut torus = Mesh::torus(80).unwrap();
        torus.pose_mut().set_scale(2.0);
        torus.pose_mut().set_translation(Vector3::new(3.0, 0.0, 0.0));
        let torus_id = scene.add_mesh(torus);

        let matrices = scene.model_matrices();
        assert_eq!(matrices.len(), 2);
        assert_eq!(matrices[0].0, cone_id);

        let (id, torus_model) = matrices[1];
        assert_eq!(id, torus_id);
        let world = torus_model * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((world - Vector4::new(5.0, 0.0, 0.0, 1.0)).x.abs() < 1e-6);
        assert!(world.y.abs() < 1e-6 && world.z.abs() < 1e-6);
        assert_eq!(world.w, 1.0);

        // The torus's first vertex is that same unit-circle point
        let [x, y, z] = scene.mesh(torus_id).unwrap().geometry().position(0).unwrap();
        let first = torus_model * Vector4::new(x, y, z, 1.0);
        assert!((first.x - 5.0).abs() < 1e-5);

        let cone_tip = matrices[0].1 * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(cone_tip, Vector4::new(3.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_model_view_applies_camera() {
        let mut camera = Camera::default();
        camera.pose_mut().set_translation(Vector3::new(0.0, 0.0, 5.0));
        let mut scene = Scene::new(camera);
        scene.add_mesh(Mesh::cube(0));

        let (_, model_view) = scene.model_view_matrices()[0];
        let center = model_view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(center, Vector4::new(0.0, 0.0, -5.0, 1.0));
    }

    #[test]
    fn test_demo_scene() {
        let scene = Scene::demo().unwrap();
        assert_eq!(scene.len(), 6);
        assert!(scene.meshes().iter().all(|m| m.geometry().validate().is_ok()));
        assert_eq!(scene.camera().far(), 100.0);

        let tilted = scene.meshes()[4].pose();
        assert_eq!(
            (tilted.rotation_x(), tilted.rotation_y(), tilted.rotation_z()),
            (-160.0, 20.0, 60.0)
        );

        // Everything sits in front of the camera
        for (_, model_view) in scene.model_view_matrices() {
            let center = model_view * Vector4::new(0.0, 0.0, 0.0, 1.0);
            assert!(center.z < 0.0);
        }
    }
}
