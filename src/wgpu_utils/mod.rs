// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Small wrappers over buffer and bind group layout boilerplate.

pub mod binding_types;
pub mod uniform_buffer;

// Re-export main types
pub use binding_types::*;
pub use uniform_buffer::UniformBuffer;
