//! # Scene Management Module
//!
//! A [`Scene`] owns its meshes in a single vector, addressed by [`MeshId`],
//! plus the one [`Camera`](crate::gfx::camera::Camera) they are viewed through.
//!
//! ## Key Components
//!
//! - [`Scene`] - mesh collection, camera and per-frame matrices
//! - [`Mesh`] - generated geometry plus the [`Pose`](crate::gfx::transform::Pose) placing it
//! - [`Vertex3D`] - interleaved position/color vertex for upload
//!
//! ## Usage
//!
//! ```rust
//! use tessel::gfx::scene::{Mesh, Scene};
//! use cgmath::Vector3;
//!
//! let mut scene = Scene::default();
//! let mut torus = Mesh::torus(32).unwrap();
//! torus.pose_mut().set_translation(Vector3::new(3.0, 0.0, 0.0));
//! let id = scene.add_mesh(torus);
//!
//! let matrices = scene.model_matrices();
//! assert_eq!(matrices[0].0, id);
//! ```

pub mod mesh;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use mesh::{DrawMesh, Mesh, MeshGpuResources, ModelUniform};
pub use scene::{MeshId, Scene};
pub use vertex::Vertex3D;
