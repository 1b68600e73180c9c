//! TruckKernel — real geometry kernel wrapping truck's API.

use std::collections::HashMap;

use tracing::debug;

use crate::hull;
use crate::primitives;
use crate::tessellation;
use crate::traits::Kernel;
use crate::types::*;

// Import truck types selectively to avoid shadowing std::result::Result
use truck_modeling::builder;
use truck_modeling::geometry::{Curve, Line};
use truck_modeling::topology::{Edge, Shell, Solid, Vertex, Wire};
use truck_modeling::{EuclideanSpace, Point3, Rad, Vector3};

/// Boolean tolerance handed to truck-shapeops.
const BOOLEAN_TOLERANCE: f64 = 0.05;

/// Real geometry kernel backed by the truck B-rep library.
pub struct TruckKernel {
    next_handle: u64,
    solids: HashMap<u64, Solid>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
        }
    }

    fn alloc_handle(&mut self) -> SolidHandle {
        let h = SolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> SolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    pub(crate) fn get_solid(&self, handle: &SolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::SolidNotFound {
                handle: handle.id(),
            })
    }

    /// Build a closed solid from a convex-hull triangle list.
    ///
    /// Vertices and edges are shared between adjacent triangles so the shell
    /// glues into a closed boundary; a consistently oriented hull uses every
    /// undirected edge once in each direction.
    fn solid_from_hull_triangles(
        vertices: &[[f64; 3]],
        triangles: &[[u32; 3]],
    ) -> Result<Solid, KernelError> {
        let points: Vec<Point3> = vertices
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();
        let verts: Vec<Vertex> = points.iter().map(|&p| builder::vertex(p)).collect();

        let mut edge_cache: HashMap<(u32, u32), Edge> = HashMap::new();
        let mut faces = Vec::with_capacity(triangles.len());

        for tri in triangles {
            let mut wire_edges: Vec<Edge> = Vec::with_capacity(3);
            for k in 0..3 {
                let i = tri[k];
                let j = tri[(k + 1) % 3];
                let key = (i.min(j), i.max(j));
                let base = edge_cache.entry(key).or_insert_with(|| {
                    let (a, b) = (key.0 as usize, key.1 as usize);
                    Edge::new(
                        &verts[a],
                        &verts[b],
                        Curve::Line(Line(points[a], points[b])),
                    )
                });
                let edge = if i <= j { base.clone() } else { base.inverse() };
                wire_edges.push(edge);
            }
            let wire = Wire::from_iter(wire_edges);
            let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::ShellFailed {
                reason: format!("hull facet is not planar: {}", e),
            })?;
            faces.push(face);
        }

        let shell: Shell = faces.into_iter().collect();
        Solid::try_new(vec![shell]).map_err(|e| KernelError::ShellFailed {
            reason: format!("hull shell does not close: {}", e),
        })
    }

    /// Export a solid to a STEP AP203 string.
    pub fn export_step(&self, handle: &SolidHandle) -> Result<String, KernelError> {
        use truck_stepio::out;

        let solid = self.get_solid(handle)?;
        let compressed = solid.compress();
        let display = out::CompleteStepDisplay::new(
            out::StepModel::from(&compressed),
            out::StepHeaderDescriptor {
                organization_system: "casegen".to_owned(),
                ..Default::default()
            },
        );
        Ok(display.to_string())
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for TruckKernel {
    fn cuboid(
        &mut self,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Result<SolidHandle, KernelError> {
        Ok(self.store_solid(primitives::make_cuboid(width, depth, height)))
    }

    fn cylinder(&mut self, radius: f64, height: f64) -> Result<SolidHandle, KernelError> {
        let solid = primitives::make_cylinder(radius, height)?;
        Ok(self.store_solid(solid))
    }

    fn sphere(&mut self, radius: f64) -> Result<SolidHandle, KernelError> {
        let solid = primitives::make_sphere(radius)?;
        Ok(self.store_solid(solid))
    }

    fn loft(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
        segments: usize,
    ) -> Result<SolidHandle, KernelError> {
        let mut points = primitives::circle_ring(bottom_radius, -height / 2.0, segments);
        points.extend(primitives::circle_ring(top_radius, height / 2.0, segments));
        self.hull_points(&points)
    }

    fn rotate(
        &mut self,
        solid: &SolidHandle,
        degrees: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        let mut current = self.get_solid(solid)?.clone();
        let axes = [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()];
        for (axis, angle) in axes.into_iter().zip(degrees) {
            if angle != 0.0 {
                current = builder::rotated(&current, Point3::origin(), axis, Rad(angle.to_radians()));
            }
        }
        Ok(self.store_solid(current))
    }

    fn translate(
        &mut self,
        solid: &SolidHandle,
        offset: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        let current = self.get_solid(solid)?;
        let moved = builder::translated(current, Vector3::new(offset[0], offset[1], offset[2]));
        Ok(self.store_solid(moved))
    }

    fn union(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?.clone();
        let solid_b = self.get_solid(b)?.clone();

        let result = truck_shapeops::or(&solid_a, &solid_b, BOOLEAN_TOLERANCE).ok_or_else(|| {
            KernelError::BooleanFailed {
                reason: "truck or() returned None".to_string(),
            }
        })?;
        Ok(self.store_solid(result))
    }

    fn subtract(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?.clone();
        let mut solid_b = self.get_solid(b)?.clone();

        // Subtraction = A ∩ ¬B. not() mutates in place.
        solid_b.not();
        let result =
            truck_shapeops::and(&solid_a, &solid_b, BOOLEAN_TOLERANCE).ok_or_else(|| {
                KernelError::BooleanFailed {
                    reason: "truck and() returned None for subtraction".to_string(),
                }
            })?;
        Ok(self.store_solid(result))
    }

    fn intersect(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?.clone();
        let solid_b = self.get_solid(b)?.clone();

        let result = truck_shapeops::and(&solid_a, &solid_b, BOOLEAN_TOLERANCE).ok_or_else(|| {
            KernelError::BooleanFailed {
                reason: "truck and() returned None".to_string(),
            }
        })?;
        Ok(self.store_solid(result))
    }

    fn hull_points(&mut self, points: &[[f64; 3]]) -> Result<SolidHandle, KernelError> {
        let (vertices, triangles) = hull::hull_triangles(points)?;
        debug!(
            input = points.len(),
            hull_vertices = vertices.len(),
            facets = triangles.len(),
            "hull_points"
        );
        let solid = Self::solid_from_hull_triangles(&vertices, &triangles)?;
        Ok(self.store_solid(solid))
    }

    fn hull_solids(&mut self, solids: &[SolidHandle]) -> Result<SolidHandle, KernelError> {
        let mut points = Vec::new();
        for handle in solids {
            points.extend(self.solid_vertices(handle)?);
        }
        self.hull_points(&points)
    }

    fn solid_vertices(&self, solid: &SolidHandle) -> Result<Vec<[f64; 3]>, KernelError> {
        let truck_solid = self.get_solid(solid)?;
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for shell in truck_solid.boundaries().iter() {
            for v in shell.vertex_iter() {
                if seen.insert(v.id()) {
                    let p = v.point();
                    out.push([p[0], p[1], p[2]]);
                }
            }
        }
        Ok(out)
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        tolerance: f64,
    ) -> Result<TriMesh, KernelError> {
        let truck_solid = self.get_solid(solid)?;
        tessellation::tessellate_solid(truck_solid, tolerance)
    }
}
