//! # Graphics Module
//!
//! Everything between a shape name and pixels on screen.
//!
//! ## Architecture Overview
//!
//! - **Transforms** ([`transform`]) - [`Pose`](transform::Pose) and the fixed `T·S·Rx·Ry·Rz` model matrix
//! - **Geometry** ([`geometry`]) - procedural sphere, cone, cylinder, cube and torus
//! - **Camera System** ([`camera`]) - pose-driven view and perspective projection
//! - **Scene Management** ([`scene`]) - meshes, their poses and the camera
//! - **Rendering Pipeline** ([`rendering`]) - wgpu surface, pipelines and draw calls
//! - **Resource Management** ([`resources`]) - global uniforms and depth texture
//!
//! ## Usage
//!
//! ```no_run
//! use tessel::gfx::scene::Scene;
//!
//! let scene = Scene::demo().unwrap();
//! // The render engine is created by TesselApp once a window exists
//! // let render_engine = RenderEngine::new(window, width, height, clear_color).await?;
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use camera::Camera;
pub use rendering::render_engine::RenderEngine;
pub use transform::Pose;
