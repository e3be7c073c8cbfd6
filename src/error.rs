//! # Errors
//!
//! Error types for mesh generation and for bringing up the GPU collaborator.

use thiserror::Error;

/// Errors raised while generating or checking CPU-side geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// A generation parameter is outside the range a shape can be built from
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: String,
    },

    /// A triangle references a vertex that does not exist
    #[error("Triangle index {index} out of range (vertex count: {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Color and position buffers disagree in length
    #[error("Color buffer length {colors} does not match position buffer length {positions}")]
    LengthMismatch { positions: usize, colors: usize },

    /// Index buffer is not made of whole triangles
    #[error("Index count {index_count} is not a multiple of 3")]
    IncompleteTriangle { index_count: usize },
}

impl GeometryError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, value: i64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }
}

/// Errors raised while creating the rendering backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to request adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("Failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Surface reports no supported texture format")]
    NoSurfaceFormat,
}

/// Result alias for geometry operations.
pub type Result<T, E = GeometryError> = std::result::Result<T, E>;
