// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Owns the wgpu device and surface, the fill and wireframe pipelines, and
//! issues one draw per scene mesh each frame.

pub mod render_engine;

// Re-export main types
pub use render_engine::{FrameStatus, RenderEngine};
