//! # Procedural Geometry Generation
//!
//! This module synthesizes the CPU-side geometry of the five built-in shapes,
//! ready for upload by the renderer.
//!
//! ## Supported Primitives
//!
//! - **Sphere**: latitude/longitude grid of `N x N` points
//! - **Cone**: apex, base center and an `N`-point rim
//! - **Cylinder**: two apex points and two `N`-point rings
//! - **Cube**: fixed 8-vertex cube, resolution ignored
//! - **Torus**: closed `N x N` grid
//!
//! ## Usage
//!
//! ```rust
//! use tessel::gfx::geometry::{generate_sphere, Shape};
//!
//! let sphere = generate_sphere(32).unwrap();
//! assert_eq!(sphere.vertex_count(), 32 * 32);
//!
//! let torus = "torus".parse::<Shape>().unwrap().generate_default().unwrap();
//! assert!(torus.validate().is_ok());
//! ```

pub mod primitives;

pub use primitives::*;

use std::fmt;
use std::str::FromStr;

use crate::error::{GeometryError, Result};

/// Resolution used when a caller has no preference
pub const DEFAULT_RESOLUTION: u32 = 16;

/// Generated geometry as flat buffers.
///
/// Positions and colors hold one `[x, y, z]` / `[r, g, b]` triple per vertex,
/// indices hold one `[a, b, c]` triple per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            colors: Vec::with_capacity(vertices * 3),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Append one vertex with its color
    pub fn push_vertex(&mut self, position: [f32; 3], color: [f32; 3]) {
        self.positions.extend_from_slice(&position);
        self.colors.extend_from_slice(&color);
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, vertex: usize) -> Option<[f32; 3]> {
        self.positions
            .get(vertex * 3..vertex * 3 + 3)
            .map(|p| [p[0], p[1], p[2]])
    }

    pub fn color(&self, vertex: usize) -> Option<[f32; 3]> {
        self.colors
            .get(vertex * 3..vertex * 3 + 3)
            .map(|c| [c[0], c[1], c[2]])
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Check the buffer invariants: matching color/position lengths, whole
    /// triangles, and every index inside the vertex range.
    pub fn validate(&self) -> Result<()> {
        if self.colors.len() != self.positions.len() {
            return Err(GeometryError::LengthMismatch {
                positions: self.positions.len(),
                colors: self.colors.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle {
                index_count: self.indices.len(),
            });
        }
        let vertex_count = self.vertex_count();
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(())
    }
}

/// The built-in procedural shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Sphere,
    Cone,
    Cylinder,
    Cube,
    Torus,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Sphere,
        Shape::Cone,
        Shape::Cylinder,
        Shape::Cube,
        Shape::Torus,
    ];

    pub fn generate(self, resolution: u32) -> Result<GeometryData> {
        match self {
            Shape::Sphere => generate_sphere(resolution),
            Shape::Cone => generate_cone(resolution),
            Shape::Cylinder => generate_cylinder(resolution),
            Shape::Cube => Ok(generate_cube(resolution)),
            Shape::Torus => generate_torus(resolution),
        }
    }

    /// Generate at [`DEFAULT_RESOLUTION`]
    pub fn generate_default(self) -> Result<GeometryData> {
        self.generate(DEFAULT_RESOLUTION)
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Cone => "cone",
            Shape::Cylinder => "cylinder",
            Shape::Cube => "cube",
            Shape::Torus => "torus",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                GeometryError::invalid_parameter(
                    "shape",
                    -1,
                    format!("unknown shape `{}`", s.trim()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_well_formed() {
        let mut data = GeometryData::new();
        data.push_vertex([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        data.push_vertex([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        data.push_vertex([0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
        data.push_triangle(0, 1, 2);
        assert!(data.validate().is_ok());
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.triangle_count(), 1);
        assert_eq!(data.position(1), Some([1.0, 0.0, 0.0]));
        assert_eq!(data.color(2), Some([0.0, 0.0, 1.0]));
        assert_eq!(data.position(3), None);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut data = GeometryData::new();
        data.push_vertex([0.0; 3], [0.0; 3]);
        data.push_vertex([0.0; 3], [0.0; 3]);
        data.push_triangle(0, 1, 2);
        assert_eq!(
            data.validate(),
            Err(GeometryError::IndexOutOfRange {
                index: 2,
                vertex_count: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_partial_triangle_and_color_mismatch() {
        let mut data = GeometryData::new();
        data.push_vertex([0.0; 3], [0.0; 3]);
        data.indices = vec![0, 0];
        assert!(matches!(
            data.validate(),
            Err(GeometryError::IncompleteTriangle { index_count: 2 })
        ));

        data.indices.clear();
        data.colors.pop();
        assert!(matches!(
            data.validate(),
            Err(GeometryError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_shape_parse_and_display() {
        for shape in Shape::ALL {
            assert_eq!(shape.to_string().parse::<Shape>(), Ok(shape));
        }
        assert_eq!(" Torus ".parse::<Shape>(), Ok(Shape::Torus));
        assert!("teapot".parse::<Shape>().is_err());
    }

    #[test]
    fn test_shape_dispatch() {
        assert_eq!(Shape::Cube.generate(0).unwrap().vertex_count(), 8);
        assert_eq!(Shape::Cone.generate(5).unwrap().vertex_count(), 7);
        assert!(Shape::Sphere.generate(1).is_err());
    }

    #[test]
    fn test_generate_default_resolution() {
        let n = DEFAULT_RESOLUTION as usize;
        for shape in Shape::ALL {
            assert_eq!(shape.generate_default(), shape.generate(DEFAULT_RESOLUTION));
        }
        let torus = Shape::Torus.generate_default().unwrap();
        assert_eq!(torus.vertex_count(), n * n);
        assert_eq!(Shape::Cone.generate_default().unwrap().vertex_count(), n + 2);
    }
}
