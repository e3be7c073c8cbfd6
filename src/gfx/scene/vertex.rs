//! # Vertex Data Structures
//!
//! GPU-compatible vertex format built from a mesh's flat position and color
//! buffers.

/// A vertex with position and color, interleaved for upload.
///
/// `#[repr(C)]` keeps the layout predictable for [`Vertex3D::desc`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// Model-space position [x, y, z]
    pub position: [f32; 3],
    /// Linear RGB color
    pub color: [f32; 3],
}

impl Vertex3D {
    /// Vertex buffer layout: position at location 0, color at location 1.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }

    /// Interleave flat `[x, y, z, ...]` and `[r, g, b, ...]` buffers.
    ///
    /// Trailing partial triples are dropped; the shorter buffer bounds the result.
    pub fn interleave(positions: &[f32], colors: &[f32]) -> Vec<Vertex3D> {
        positions
            .chunks_exact(3)
            .zip(colors.chunks_exact(3))
            .map(|(p, c)| Vertex3D {
                position: [p[0], p[1], p[2]],
                color: [c[0], c[1], c[2]],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stride() {
        assert_eq!(std::mem::size_of::<Vertex3D>(), 24);
        assert_eq!(Vertex3D::desc().array_stride, 24);
    }

    #[test]
    fn test_interleave() {
        let vertices = Vertex3D::interleave(
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        );
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].position, [3.0, 4.0, 5.0]);
        assert_eq!(vertices[1].color, [0.0, 1.0, 0.0]);
    }
}
