//! # Primitive Shape Generation
//!
//! Each generator samples its parametric surface, assigns per-vertex colors
//! from a fixed palette and builds a 32-bit index buffer. Vertex ordering and
//! index conventions differ per shape and are documented on each function.
//!
//! Grid shapes (sphere, torus) wrap the longitude with modulo arithmetic so no
//! index ever leaves the vertex range.

use std::f32::consts::PI;

use super::GeometryData;
use crate::error::{GeometryError, Result};

const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];
const RED: [f32; 3] = [1.0, 0.0, 0.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];

/// Torus minor (tube) radius
pub const TORUS_MINOR_RADIUS: f32 = 0.2;
/// Torus major radius, chosen so the outer edge sits on the unit circle
pub const TORUS_MAJOR_RADIUS: f32 = 1.0 - TORUS_MINOR_RADIUS;

/// Rejects resolutions below 2 and any whose vertex count cannot be addressed
/// by a 32-bit index buffer.
fn check_resolution(resolution: u32, vertex_count: impl Fn(u64) -> u64) -> Result<u32> {
    if resolution < 2 {
        log::warn!("rejecting mesh resolution {}", resolution);
        return Err(GeometryError::invalid_parameter(
            "resolution",
            resolution as i64,
            "must be at least 2",
        ));
    }
    let count = vertex_count(resolution as u64);
    if count > u32::MAX as u64 {
        log::warn!(
            "rejecting mesh resolution {}: {} vertices",
            resolution,
            count
        );
        return Err(GeometryError::invalid_parameter(
            "resolution",
            resolution as i64,
            format!("{} vertices exceed the 32-bit index range", count),
        ));
    }
    Ok(resolution)
}

fn log_generated(name: &str, resolution: u32, data: &GeometryData) {
    log::debug!(
        "generated {} (resolution {}): {} vertices, {} triangles",
        name,
        resolution,
        data.vertex_count(),
        data.triangle_count()
    );
}

/// Generate a unit sphere as an `N x N` latitude/longitude grid.
///
/// Vertex `j * N + i` sits at longitude `theta = i * 2PI / N` and latitude
/// `phi = j * PI / N - PI / 2`. Rows are colored red, with every row where
/// `j % 3 == 1` tinted magenta.
///
/// Each cell of rows `0..N-1` becomes two triangles; the last column wraps back
/// to the first. The poles are left open.
pub fn generate_sphere(resolution: u32) -> Result<GeometryData> {
    let n = check_resolution(resolution, |n| n * n)?;
    let cells = n as usize;
    let mut data = GeometryData::with_capacity(cells * cells, 2 * cells * (cells - 1));

    for j in 0..n {
        let phi = j as f32 * PI / n as f32 - PI / 2.0;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let color = [1.0, 0.0, if j % 3 == 1 { 1.0 } else { 0.0 }];

        for i in 0..n {
            let theta = i as f32 * 2.0 * PI / n as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            data.push_vertex(
                [cos_theta * cos_phi, sin_theta * cos_phi, sin_phi],
                color,
            );
        }
    }

    for j in 0..n - 1 {
        for i in 0..n {
            let current = j * n + i;
            let next = j * n + (i + 1) % n;

            data.push_triangle(current, next, current + n);
            data.push_triangle(next, next + n, current + n);
        }
    }

    log_generated("sphere", n, &data);
    Ok(data)
}

/// Generate a cone along Z with its tip at `z = 1` and a unit base at `z = -1`.
///
/// Vertex 0 is the tip, vertex 1 the base center, vertices `2..N+2` the rim.
/// Two fans join the rim to the tip and to the base center, the last rim
/// vertex wrapping to the first.
pub fn generate_cone(resolution: u32) -> Result<GeometryData> {
    let n = check_resolution(resolution, |n| n + 2)?;
    let mut data = GeometryData::with_capacity(n as usize + 2, 2 * n as usize);

    data.push_vertex([0.0, 0.0, 1.0], YELLOW);
    data.push_vertex([0.0, 0.0, -1.0], YELLOW);

    for i in 0..n {
        let theta = i as f32 * 2.0 * PI / n as f32;
        data.push_vertex([theta.cos(), theta.sin(), -1.0], YELLOW);
    }

    for apex in [0, 1] {
        for t in 2..n + 1 {
            data.push_triangle(apex, t, t + 1);
        }
        data.push_triangle(apex, n + 1, 2);
    }

    log_generated("cone", n, &data);
    Ok(data)
}

/// Generate a unit-radius cylinder along Z between `z = -1` and `z = 1`.
///
/// Layout: vertex 0 is the top center, vertex 1 the bottom center, vertices
/// `2..N+2` the top ring and `N+2..2N+2` the bottom ring. Top and bottom fans
/// close the caps; a strip of two triangles per segment joins the rings, with
/// explicit wraparound triangles for the last segment.
pub fn generate_cylinder(resolution: u32) -> Result<GeometryData> {
    let n = check_resolution(resolution, |n| 2 * n + 2)?;
    let mut data = GeometryData::with_capacity(2 * n as usize + 2, 4 * n as usize);

    data.push_vertex([0.0, 0.0, 1.0], MAGENTA);
    data.push_vertex([0.0, 0.0, -1.0], YELLOW);

    for (z, color) in [(1.0, RED), (-1.0, CYAN)] {
        for i in 0..n {
            let theta = i as f32 * 2.0 * PI / n as f32;
            data.push_vertex([theta.cos(), theta.sin(), z], color);
        }
    }

    let top = 2;
    let bottom = n + 2;
    let last_top = n + 1;
    let last_bottom = 2 * n + 1;

    // Top cap
    for t in top..last_top {
        data.push_triangle(0, t, t + 1);
    }
    data.push_triangle(0, last_top, top);

    // Bottom cap
    for t in bottom..last_bottom {
        data.push_triangle(1, t, t + 1);
    }
    data.push_triangle(1, last_bottom, bottom);

    // Side strip
    for t in top..last_top {
        data.push_triangle(t, t + 1, t + n);
        data.push_triangle(t + 1, t + n + 1, t + n);
    }
    data.push_triangle(last_top, top, last_bottom);
    data.push_triangle(top, bottom, last_bottom);

    log_generated("cylinder", n, &data);
    Ok(data)
}

/// Generate the fixed 8-vertex cube spanning `[-1, 1]` on every axis.
///
/// The resolution is ignored; it is accepted so every shape shares one
/// signature.
pub fn generate_cube(_resolution: u32) -> GeometryData {
    #[rustfmt::skip]
    let positions = vec![
         1.0,  1.0,  1.0,
        -1.0,  1.0,  1.0,
        -1.0, -1.0,  1.0,
         1.0, -1.0,  1.0,
         1.0,  1.0, -1.0,
        -1.0,  1.0, -1.0,
        -1.0, -1.0, -1.0,
         1.0, -1.0, -1.0,
    ];

    #[rustfmt::skip]
    let colors = vec![
        1.0, 1.0, 1.0,
        0.0, 1.0, 1.0,
        0.0, 0.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 0.0,
        0.0, 1.0, 0.0,
        1.0, 1.0, 1.0,
        1.0, 0.0, 0.0,
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,   0, 2, 3,
        0, 5, 4,   0, 1, 5,
        3, 4, 7,   3, 0, 4,
        2, 7, 6,   2, 3, 7,
        4, 5, 7,   5, 6, 7,
        1, 6, 5,   1, 2, 6,
    ];

    let data = GeometryData {
        positions,
        colors,
        indices,
    };
    log_generated("cube", 0, &data);
    data
}

/// Generate a green torus around the Z axis.
///
/// Vertex `j * N + i` sits at `theta = i * 2PI / N` around the axis and
/// `phi = j * 2PI / N` around the tube. Both directions wrap, so the
/// `N x N` cells form a closed surface.
pub fn generate_torus(resolution: u32) -> Result<GeometryData> {
    let n = check_resolution(resolution, |n| n * n)?;
    let a = TORUS_MINOR_RADIUS;
    let b = TORUS_MAJOR_RADIUS;
    let cells = n as usize;
    let mut data = GeometryData::with_capacity(cells * cells, 2 * cells * cells);

    for j in 0..n {
        let phi = j as f32 * 2.0 * PI / n as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for i in 0..n {
            let theta = i as f32 * 2.0 * PI / n as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let ring = b + a * cos_phi;
            data.push_vertex([ring * cos_theta, ring * sin_theta, a * sin_phi], GREEN);
        }
    }

    for j in 0..n {
        let row = j * n;
        let next_row = ((j + 1) % n) * n;
        for i in 0..n {
            let next_i = (i + 1) % n;
            let current = row + i;
            let next = row + next_i;
            let above = next_row + i;
            let above_next = next_row + next_i;

            data.push_triangle(current, next, above);
            data.push_triangle(next, above_next, above);
        }
    }

    log_generated("torus", n, &data);
    Ok(data)
}
