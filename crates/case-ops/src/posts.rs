//! Web posts — the tiny anchor solids hull stitching runs over.
//!
//! A post is a near-degenerate box sitting at the underside of a key plate's
//! top surface. Hulling triples of placed posts produces the connective web;
//! the post's small footprint keeps each hull tight against the plates.

use case_types::{CaseParams, PlateCorner, Point};
use geom_kernel::{Kernel, SolidHandle};

use crate::types::OpError;

/// The post solid at the plate origin, top flush with the plate surface.
pub fn web_post(kernel: &mut dyn Kernel, params: &CaseParams) -> Result<SolidHandle, OpError> {
    let post = kernel.cuboid(params.post_size, params.post_size, params.web_thickness)?;
    let lifted = kernel.translate(
        &post,
        [0.0, 0.0, params.plate_thickness - params.web_thickness / 2.0],
    )?;
    Ok(lifted)
}

/// Offset of a corner post from the plate center.
pub fn corner_offset(params: &CaseParams, corner: PlateCorner) -> [f64; 3] {
    let (sx, sy) = corner.signs();
    [
        sx * (params.mount_width / 2.0 - params.post_adj),
        sy * (params.mount_height / 2.0 - params.post_adj),
        0.0,
    ]
}

/// The post solid at a plate corner, in the plate's local frame.
pub fn corner_post(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
    corner: PlateCorner,
) -> Result<SolidHandle, OpError> {
    let post = web_post(kernel, params)?;
    Ok(kernel.translate(&post, corner_offset(params, corner))?)
}

/// Reference point matching `corner_post`'s center, for point-level math.
pub fn corner_post_point(params: &CaseParams, corner: PlateCorner) -> Point {
    let offset = corner_offset(params, corner);
    [
        offset[0],
        offset[1],
        params.plate_thickness - params.web_thickness / 2.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_kernel::MockKernel;

    #[test]
    fn corner_offsets_are_symmetric() {
        let params = CaseParams::default();
        let tl = corner_offset(&params, PlateCorner::TopLeft);
        let br = corner_offset(&params, PlateCorner::BottomRight);
        assert_eq!(tl[0], -br[0]);
        assert_eq!(tl[1], -br[1]);
    }

    #[test]
    fn post_top_is_flush_with_plate_surface() {
        let params = CaseParams::default();
        let mut kernel = MockKernel::new();
        let post = web_post(&mut kernel, &params).unwrap();
        let top = kernel
            .points(&post)
            .unwrap()
            .iter()
            .map(|p| p[2])
            .fold(f64::MIN, f64::max);
        assert!((top - params.plate_thickness).abs() < 1e-12);
    }
}
