//! MockKernel — deterministic test double with point-cloud solids.
//!
//! Every solid is represented by its vertex cloud; transforms apply exact
//! point math, hulls and unions merge clouds, and every call is appended to
//! an operation log so tests can assert how the pipeline drove the kernel
//! (e.g. that N posts produced exactly N−2 hull operations).

use std::collections::HashMap;

use case_types::transform;

use crate::hull;
use crate::traits::Kernel;
use crate::types::*;

/// One recorded kernel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOp {
    Cuboid,
    Cylinder,
    Sphere,
    Loft,
    Rotate,
    Translate,
    Union,
    Subtract,
    Intersect,
    HullPoints { input_points: usize },
    HullSolids { solids: usize },
    Tessellate,
}

#[derive(Debug, Clone)]
struct MockSolid {
    points: Vec<[f64; 3]>,
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    /// Every kernel call in issue order.
    pub ops: Vec<MockOp>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
            ops: Vec::new(),
        }
    }

    fn alloc_handle(&mut self) -> SolidHandle {
        let h = SolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn store(&mut self, points: Vec<[f64; 3]>) -> SolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), MockSolid { points });
        handle
    }

    fn cloud(&self, handle: &SolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::SolidNotFound {
                handle: handle.id(),
            })
    }

    /// Number of hull operations issued so far (point- and solid-level).
    pub fn hull_op_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, MockOp::HullPoints { .. } | MockOp::HullSolids { .. }))
            .count()
    }

    /// Number of union operations issued so far.
    pub fn union_op_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == MockOp::Union).count()
    }

    /// Centroid of a solid's cloud — handy for placement assertions.
    pub fn centroid(&self, handle: &SolidHandle) -> Result<[f64; 3], KernelError> {
        let cloud = self.cloud(handle)?;
        let n = cloud.points.len().max(1) as f64;
        let sum = cloud.points.iter().fold([0.0; 3], |acc, p| {
            [acc[0] + p[0], acc[1] + p[1], acc[2] + p[2]]
        });
        Ok([sum[0] / n, sum[1] / n, sum[2] / n])
    }

    /// The raw vertex cloud of a solid.
    pub fn points(&self, handle: &SolidHandle) -> Result<Vec<[f64; 3]>, KernelError> {
        Ok(self.cloud(handle)?.points.clone())
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for MockKernel {
    fn cuboid(
        &mut self,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::Cuboid);
        let (x, y, z) = (width / 2.0, depth / 2.0, height / 2.0);
        let points = vec![
            [-x, -y, -z],
            [x, -y, -z],
            [x, y, -z],
            [-x, y, -z],
            [-x, -y, z],
            [x, -y, z],
            [x, y, z],
            [-x, y, z],
        ];
        Ok(self.store(points))
    }

    fn cylinder(&mut self, radius: f64, height: f64) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::Cylinder);
        let z = height / 2.0;
        let mut points = Vec::with_capacity(8);
        for &zz in &[-z, z] {
            points.push([radius, 0.0, zz]);
            points.push([0.0, radius, zz]);
            points.push([-radius, 0.0, zz]);
            points.push([0.0, -radius, zz]);
        }
        Ok(self.store(points))
    }

    fn sphere(&mut self, radius: f64) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::Sphere);
        let points = vec![
            [radius, 0.0, 0.0],
            [-radius, 0.0, 0.0],
            [0.0, radius, 0.0],
            [0.0, -radius, 0.0],
            [0.0, 0.0, radius],
            [0.0, 0.0, -radius],
        ];
        Ok(self.store(points))
    }

    fn loft(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
        segments: usize,
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::Loft);
        let mut points = crate::primitives::circle_ring(bottom_radius, -height / 2.0, segments);
        points.extend(crate::primitives::circle_ring(top_radius, height / 2.0, segments));
        Ok(self.store(points))
    }

    fn rotate(
        &mut self,
        solid: &SolidHandle,
        degrees: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::Rotate);
        let points = self
            .cloud(solid)?
            .points
            .iter()
            .map(|&p| transform::rotate_deg(p, degrees))
            .collect();
        Ok(self.store(points))
    }

    fn translate(
        &mut self,
        solid: &SolidHandle,
        offset: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::Translate);
        let points = self
            .cloud(solid)?
            .points
            .iter()
            .map(|&p| transform::translate(p, offset))
            .collect();
        Ok(self.store(points))
    }

    fn union(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::Union);
        let mut points = self.cloud(a)?.points.clone();
        points.extend(self.cloud(b)?.points.iter().copied());
        Ok(self.store(points))
    }

    fn subtract(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::Subtract);
        self.cloud(b)?;
        // Cloud semantics cannot carve; the left operand stands in for the
        // result so downstream placement math stays observable.
        let points = self.cloud(a)?.points.clone();
        Ok(self.store(points))
    }

    fn intersect(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::Intersect);
        self.cloud(b)?;
        let points = self.cloud(a)?.points.clone();
        Ok(self.store(points))
    }

    fn hull_points(&mut self, points: &[[f64; 3]]) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::HullPoints {
            input_points: points.len(),
        });
        let distinct = hull::distinct_count(points);
        if distinct < 4 {
            return Err(KernelError::DegenerateHull { distinct });
        }
        Ok(self.store(points.to_vec()))
    }

    fn hull_solids(&mut self, solids: &[SolidHandle]) -> Result<SolidHandle, KernelError> {
        self.ops.push(MockOp::HullSolids {
            solids: solids.len(),
        });
        let mut points = Vec::new();
        for handle in solids {
            points.extend(self.cloud(handle)?.points.iter().copied());
        }
        let distinct = hull::distinct_count(&points);
        if distinct < 4 {
            return Err(KernelError::DegenerateHull { distinct });
        }
        Ok(self.store(points))
    }

    fn solid_vertices(&self, solid: &SolidHandle) -> Result<Vec<[f64; 3]>, KernelError> {
        Ok(self.cloud(solid)?.points.clone())
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        _tolerance: f64,
    ) -> Result<TriMesh, KernelError> {
        self.ops.push(MockOp::Tessellate);
        let cloud = self.cloud(solid)?;
        if cloud.points.is_empty() {
            return Err(KernelError::TessellationFailed {
                reason: "empty point cloud".to_string(),
            });
        }

        // Deterministic stand-in mesh: the cloud's axis-aligned bounding box.
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for p in &cloud.points {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        let corners = [
            [min[0], min[1], min[2]],
            [max[0], min[1], min[2]],
            [max[0], max[1], min[2]],
            [min[0], max[1], min[2]],
            [min[0], min[1], max[2]],
            [max[0], min[1], max[2]],
            [max[0], max[1], max[2]],
            [min[0], max[1], max[2]],
        ];
        let mut vertices = Vec::with_capacity(24);
        for c in corners {
            vertices.push(c[0] as f32);
            vertices.push(c[1] as f32);
            vertices.push(c[2] as f32);
        }

        // Outward-wound box faces.
        let indices: Vec<u32> = vec![
            0, 2, 1, 0, 3, 2, // bottom (z = min)
            4, 5, 6, 4, 6, 7, // top (z = max)
            0, 1, 5, 0, 5, 4, // front (y = min)
            2, 3, 7, 2, 7, 6, // back (y = max)
            3, 0, 4, 3, 4, 7, // left (x = min)
            1, 2, 6, 1, 6, 5, // right (x = max)
        ];

        Ok(TriMesh {
            vertices,
            normals: Vec::new(),
            indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms_apply_exact_point_math() {
        let mut kernel = MockKernel::new();
        let handle = kernel.cuboid(2.0, 2.0, 2.0).unwrap();
        let shifted = kernel.translate(&handle, [5.0, 0.0, 0.0]).unwrap();
        let rotated = kernel.rotate(&shifted, [0.0, 0.0, 90.0]).unwrap();
        let centroid = kernel.centroid(&rotated).unwrap();
        assert!(centroid[0].abs() < 1e-12);
        assert!((centroid[1] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn op_log_records_call_order() {
        let mut kernel = MockKernel::new();
        let a = kernel.cuboid(1.0, 1.0, 1.0).unwrap();
        let b = kernel.sphere(1.0).unwrap();
        kernel.union(&a, &b).unwrap();
        assert_eq!(
            kernel.ops,
            vec![MockOp::Cuboid, MockOp::Sphere, MockOp::Union]
        );
    }

    #[test]
    fn degenerate_hull_matches_real_kernel_contract() {
        let mut kernel = MockKernel::new();
        let err = kernel
            .hull_points(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
            .unwrap_err();
        assert!(matches!(err, KernelError::DegenerateHull { distinct: 3 }));
    }

    #[test]
    fn mock_mesh_is_a_closed_box() {
        let mut kernel = MockKernel::new();
        let handle = kernel.cuboid(2.0, 4.0, 6.0).unwrap();
        let mesh = kernel.tessellate(&handle, 0.1).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertex_count(), 8);
    }
}
