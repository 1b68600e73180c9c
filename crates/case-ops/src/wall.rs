//! Wall building — extends placed boundary posts down and out into
//! printable enclosing walls.
//!
//! Straight runs use `wall_brace`: each anchor post is pushed through the
//! three-step locate chain (lip, standoff, outer skin) and the placed posts
//! are hulled together with their floor projection. Curved runs around the
//! trackball sample a bounding arc at a fixed angular step and wedge-hull
//! consecutive samples.

use case_types::{CaseParams, Point};
use geom_kernel::{Kernel, SolidHandle};
use tracing::debug;

use crate::types::OpError;

/// Placement closure: positions a local-frame solid in world space.
pub type PlaceFn<'a> = dyn Fn(&mut dyn Kernel, &SolidHandle) -> Result<SolidHandle, OpError> + 'a;

/// Fixed-step samples over the half-open range `[start, end)`.
///
/// The last sample is the largest step boundary under `end`; a final partial
/// segment is dropped, never padded.
pub fn sample_angles(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut angle = start;
    while angle < end {
        out.push(angle);
        angle += step;
    }
    out
}

/// First locate step: the wall lip, just outside the plate edge.
pub fn wall_locate1(params: &CaseParams, dx: f64, dy: f64) -> [f64; 3] {
    [dx * params.wall_thickness, dy * params.wall_thickness, -1.0]
}

/// Second locate step: the outward standoff, dropped to wall height.
pub fn wall_locate2(params: &CaseParams, dx: f64, dy: f64) -> [f64; 3] {
    [
        dx * params.wall_x_offset,
        dy * params.wall_y_offset,
        -params.wall_z_offset,
    ]
}

/// Third locate step: the outer skin, one wall thickness past the standoff.
pub fn wall_locate3(params: &CaseParams, dx: f64, dy: f64) -> [f64; 3] {
    [
        dx * (params.wall_x_offset + params.wall_thickness),
        dy * (params.wall_y_offset + params.wall_thickness),
        -params.wall_z_offset,
    ]
}

/// Hull a set of placed solids together with their floor projection,
/// closing the gap between wall skirt and z = 0.
pub fn bottom_hull(
    kernel: &mut dyn Kernel,
    solids: &[SolidHandle],
) -> Result<SolidHandle, OpError> {
    let mut points = Vec::new();
    for solid in solids {
        for v in kernel.solid_vertices(solid)? {
            points.push(v);
            points.push([v[0], v[1], 0.0]);
        }
    }
    Ok(kernel.hull_points(&points)?)
}

/// Hull already-placed wall posts into a segment: one hull over the
/// plate-level posts, one floor-reaching hull over the skirt posts.
pub fn brace_from_placed(
    kernel: &mut dyn Kernel,
    top_posts: &[SolidHandle],
    skirt_posts: &[SolidHandle],
) -> Result<SolidHandle, OpError> {
    let top = kernel.hull_solids(top_posts)?;
    let skirt = bottom_hull(kernel, skirt_posts)?;
    Ok(kernel.union(&top, &skirt)?)
}

/// Wall segment between two placed posts.
///
/// `dir` is the outward (dx, dy) normal of each post's plate edge. The post
/// is placed four times — raw, lip, standoff, outer skin — and the eight
/// placed posts are hulled; the standoff and skin posts are additionally
/// hulled with their floor projection so the wall lands on the build plate.
#[allow(clippy::too_many_arguments)]
pub fn wall_brace(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
    place1: &PlaceFn,
    dir1: (f64, f64),
    post1: &SolidHandle,
    place2: &PlaceFn,
    dir2: (f64, f64),
    post2: &SolidHandle,
) -> Result<SolidHandle, OpError> {
    let mut top_posts = Vec::with_capacity(8);
    let mut skirt_posts = Vec::with_capacity(4);

    let ends: [(&PlaceFn, (f64, f64), &SolidHandle); 2] =
        [(place1, dir1, post1), (place2, dir2, post2)];
    for (place, (dx, dy), post) in ends {
        let raw = place(kernel, post)?;

        let lip = kernel.translate(post, wall_locate1(params, dx, dy))?;
        let lip = place(kernel, &lip)?;

        let standoff = kernel.translate(post, wall_locate2(params, dx, dy))?;
        let standoff = place(kernel, &standoff)?;

        let skin = kernel.translate(post, wall_locate3(params, dx, dy))?;
        let skin = place(kernel, &skin)?;

        top_posts.extend([raw, lip, standoff.clone(), skin.clone()]);
        skirt_posts.extend([standoff, skin]);
    }

    brace_from_placed(kernel, &top_posts, &skirt_posts)
}

/// Curved-wall wedge between two consecutive arc samples: posts at both
/// positions, hulled down to the floor.
pub fn wall_at_angle(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
    pos: Point,
    pos_next: Point,
) -> Result<SolidHandle, OpError> {
    let post = kernel.cuboid(params.post_size, params.post_size, params.web_thickness)?;
    let a = kernel.translate(&post, pos)?;
    let b = kernel.translate(&post, pos_next)?;
    debug!(?pos, ?pos_next, "wall_at_angle");
    bottom_hull(kernel, &[a, b])
}
