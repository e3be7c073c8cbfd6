// src/lib.rs
//! Tessel
//!
//! A small real-time 3D scaffold built on wgpu and winit: procedural
//! primitives, per-mesh poses, a perspective camera and a scene that ties
//! them together.

pub mod app;
pub mod error;
pub mod gfx;
pub mod logging;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{AppConfig, TesselApp};
pub use error::{GeometryError, RenderError};
