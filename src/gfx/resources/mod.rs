// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Depth targets and the global (per-frame camera) uniform bindings.

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBO};
pub use texture_resource::TextureResource;
