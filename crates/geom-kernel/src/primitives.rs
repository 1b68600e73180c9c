//! Primitive builders on top of truck's sweep API.
//!
//! truck has no built-in box/cylinder/sphere — everything is successive
//! sweeps. All primitives here are centered on the origin, matching the
//! placement pipeline's expectation that shapes are posed afterwards.

use std::f64::consts::PI;
use truck_modeling::builder;
use truck_modeling::topology::{Edge, Solid, Wire};
use truck_modeling::{EuclideanSpace, Point3, Rad, Vector3};

use crate::types::KernelError;

/// Create a box solid via successive translational sweeps, centered on the
/// origin and extending ±w/2, ±d/2, ±h/2.
pub fn make_cuboid(w: f64, d: f64, h: f64) -> Solid {
    let v = builder::vertex(Point3::new(-w / 2.0, -d / 2.0, -h / 2.0));
    let edge = builder::tsweep(&v, Vector3::new(w, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, d, 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, h))
}

/// Create a cylinder solid: circle wire → face → translational sweep.
/// Axis along Z, centered on the origin.
pub fn make_cylinder(radius: f64, height: f64) -> Result<Solid, KernelError> {
    let v = builder::vertex(Point3::new(radius, 0.0, -height / 2.0));
    let wire = builder::rsweep(&v, Point3::origin(), Vector3::unit_z(), Rad(2.0 * PI));
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::Other {
        message: format!("failed to create circular face: {}", e),
    })?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Create a sphere solid: semicircle face → rotational sweep 2π.
/// Centered on the origin.
pub fn make_sphere(radius: f64) -> Result<Solid, KernelError> {
    // Semicircle arc in XZ plane from (r,0,0) through (0,0,r) to (-r,0,0).
    let v_right = builder::vertex(Point3::new(radius, 0.0, 0.0));
    let arc_wire = builder::rsweep(&v_right, Point3::origin(), Vector3::unit_y(), Rad(PI));

    // Close with the diameter from (-r,0,0) back to (r,0,0).
    let v_left = builder::vertex(Point3::new(-radius, 0.0, 0.0));
    let line_edge: Edge = builder::tsweep(&v_left, Vector3::new(2.0 * radius, 0.0, 0.0));

    let mut edges: Vec<Edge> = Vec::new();
    for edge in arc_wire.edge_iter() {
        edges.push(edge.clone());
    }
    edges.push(line_edge);
    let closed_wire = Wire::from_iter(edges);

    let face = builder::try_attach_plane(&[closed_wire]).map_err(|e| KernelError::Other {
        message: format!("failed to create semicircle face: {}", e),
    })?;

    Ok(builder::rsweep(
        &face,
        Point3::origin(),
        Vector3::unit_z(),
        Rad(2.0 * PI),
    ))
}

/// Sample a circle of `radius` at height `z` into `segments` points.
/// The first sample sits on the +X axis; winding is counter-clockwise seen
/// from +Z.
pub fn circle_ring(radius: f64, z: f64, segments: usize) -> Vec<[f64; 3]> {
    (0..segments)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / segments as f64;
            [radius * theta.cos(), radius * theta.sin(), z]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_topology() {
        let solid = make_cuboid(1.0, 2.0, 3.0);

        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "box should have 1 shell");

        let shell = &boundaries[0];
        let faces: Vec<_> = shell.face_iter().collect();

        let mut edge_ids = std::collections::HashSet::new();
        for edge in shell.edge_iter() {
            edge_ids.insert(edge.id());
        }
        let mut vert_ids = std::collections::HashSet::new();
        for v in shell.vertex_iter() {
            vert_ids.insert(v.id());
        }

        assert_eq!(faces.len(), 6, "box should have 6 faces");
        assert_eq!(edge_ids.len(), 12, "box should have 12 edges");
        assert_eq!(vert_ids.len(), 8, "box should have 8 vertices");

        // Euler's formula: V - E + F = 2
        let v = vert_ids.len() as i64;
        let e = edge_ids.len() as i64;
        let f = faces.len() as i64;
        assert_eq!(v - e + f, 2, "Euler formula must hold");
    }

    #[test]
    fn cuboid_is_centered() {
        let solid = make_cuboid(2.0, 4.0, 6.0);
        let boundaries = solid.boundaries();
        let shell = &boundaries[0];

        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for v in shell.vertex_iter() {
            let p = v.point();
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        let eps = 1e-10;
        for i in 0..3 {
            assert!(
                (min[i] + max[i]).abs() < eps,
                "axis {} not centered: [{}, {}]",
                i,
                min[i],
                max[i]
            );
        }
    }

    #[test]
    fn cylinder_topology() {
        let solid = make_cylinder(1.0, 2.0).unwrap();

        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "cylinder should have 1 shell");

        let shell = &boundaries[0];
        let faces: Vec<_> = shell.face_iter().collect();
        assert!(faces.len() >= 3, "cylinder should have at least 3 faces");
    }

    #[test]
    fn circle_ring_sample_count_and_radius() {
        let ring = circle_ring(5.0, 1.5, 16);
        assert_eq!(ring.len(), 16);
        for p in &ring {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!((r - 5.0).abs() < 1e-12);
            assert_eq!(p[2], 1.5);
        }
    }
}
