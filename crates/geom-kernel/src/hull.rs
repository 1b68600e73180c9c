//! Convex hull of a 3D point set, as triangles.
//!
//! parry computes the hull; both kernels lift the triangle list into their
//! own solid representation. Input validation lives here so the real and the
//! mock kernel reject the same degenerate inputs.

use std::collections::HashSet;

use parry3d_f64::na::Point3;
use parry3d_f64::transformation;

use crate::types::KernelError;

/// Number of bitwise-distinct points in `points`.
pub fn distinct_count(points: &[[f64; 3]]) -> usize {
    let mut seen = HashSet::new();
    for p in points {
        seen.insert([p[0].to_bits(), p[1].to_bits(), p[2].to_bits()]);
    }
    seen.len()
}

/// Compute the convex hull of `points`.
///
/// Returns the hull vertices and outward-oriented triangle indices.
/// Fewer than 4 distinct input points cannot bound a volume and fail with
/// `DegenerateHull`.
pub fn hull_triangles(
    points: &[[f64; 3]],
) -> Result<(Vec<[f64; 3]>, Vec<[u32; 3]>), KernelError> {
    let distinct = distinct_count(points);
    if distinct < 4 {
        return Err(KernelError::DegenerateHull { distinct });
    }

    let input: Vec<Point3<f64>> = points
        .iter()
        .map(|&[x, y, z]| Point3::new(x, y, z))
        .collect();
    let (vertices, indices) = transformation::convex_hull(&input);

    let vertices = vertices.iter().map(|p| [p.x, p.y, p.z]).collect();
    Ok((vertices, indices))
}
