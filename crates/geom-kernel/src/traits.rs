use crate::types::{KernelError, SolidHandle, TriMesh};

/// Core geometry kernel trait: primitive construction, placement transforms,
/// booleans, convex hulls, and tessellation.
///
/// Implemented by `TruckKernel` (real B-rep kernel) and `MockKernel`
/// (deterministic point-cloud test double). Solids are immutable: every
/// operation returns a fresh handle and leaves its inputs untouched.
pub trait Kernel {
    /// Axis-aligned box centered on the origin.
    fn cuboid(&mut self, width: f64, depth: f64, height: f64)
        -> Result<SolidHandle, KernelError>;

    /// Cylinder along Z, centered on the origin.
    fn cylinder(&mut self, radius: f64, height: f64) -> Result<SolidHandle, KernelError>;

    /// Sphere centered on the origin.
    fn sphere(&mut self, radius: f64) -> Result<SolidHandle, KernelError>;

    /// Polyhedral loft between two circles along Z, centered on the origin.
    /// Both radii sampled at `segments` points; the side surface is the
    /// convex hull of the two rings.
    fn loft(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
        segments: usize,
    ) -> Result<SolidHandle, KernelError>;

    /// Rotate about the origin by `[rx, ry, rz]` degrees, applied X→Y→Z.
    /// Same semantics as `case_types::transform::rotate_deg`.
    fn rotate(&mut self, solid: &SolidHandle, degrees: [f64; 3])
        -> Result<SolidHandle, KernelError>;

    /// Translate by `offset`.
    fn translate(
        &mut self,
        solid: &SolidHandle,
        offset: [f64; 3],
    ) -> Result<SolidHandle, KernelError>;

    /// Boolean union of two solids.
    fn union(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError>;

    /// Boolean subtraction: a minus b.
    fn subtract(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError>;

    /// Boolean intersection.
    fn intersect(&mut self, a: &SolidHandle, b: &SolidHandle)
        -> Result<SolidHandle, KernelError>;

    /// Convex hull of a bare point set. Fails with `DegenerateHull` when
    /// fewer than 4 distinct points are supplied.
    fn hull_points(&mut self, points: &[[f64; 3]]) -> Result<SolidHandle, KernelError>;

    /// Convex hull over the vertices of several solids — the building block
    /// of hull stitching between placed posts.
    fn hull_solids(&mut self, solids: &[SolidHandle]) -> Result<SolidHandle, KernelError>;

    /// The vertices of a solid, in deterministic traversal order.
    fn solid_vertices(&self, solid: &SolidHandle) -> Result<Vec<[f64; 3]>, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(&mut self, solid: &SolidHandle, tolerance: f64)
        -> Result<TriMesh, KernelError>;

    /// Fold a slice of solids into one union. Empty input yields `None`.
    fn union_all(&mut self, solids: &[SolidHandle]) -> Result<Option<SolidHandle>, KernelError> {
        let mut iter = solids.iter();
        let Some(first) = iter.next() else {
            return Ok(None);
        };
        let mut acc = first.clone();
        for solid in iter {
            acc = self.union(&acc, solid)?;
        }
        Ok(Some(acc))
    }

    /// Subtract each of `cutters` from `base` in sequence.
    fn subtract_all(
        &mut self,
        base: &SolidHandle,
        cutters: &[SolidHandle],
    ) -> Result<SolidHandle, KernelError> {
        let mut acc = base.clone();
        for cutter in cutters {
            acc = self.subtract(&acc, cutter)?;
        }
        Ok(acc)
    }
}
