//! Hull stitching — turns ordered post sequences into connective webs.
//!
//! A single convex hull over a whole plate boundary would fill the concave
//! gaps between key plates; hulling every consecutive window of three posts
//! instead keeps the web tight while each triangular segment stays manifold.
//!
//! The post order is the caller's contract: windows follow the sequence as
//! given, and a reordered sequence stitches different triangles. Connector
//! tables supply posts in physical-adjacency order.

use geom_kernel::{Kernel, SolidHandle};
use tracing::debug;

use crate::types::OpError;

/// Union of convex hulls over every consecutive window of 3 posts.
///
/// A sequence of N ≥ 3 posts issues exactly N − 2 hull operations. Fewer
/// than 3 posts cannot form a segment: the result is `None` and the kernel
/// is not called.
pub fn triangle_hulls(
    kernel: &mut dyn Kernel,
    posts: &[SolidHandle],
) -> Result<Option<SolidHandle>, OpError> {
    if posts.len() < 3 {
        return Ok(None);
    }

    let mut segments = Vec::with_capacity(posts.len() - 2);
    for window in posts.windows(3) {
        segments.push(kernel.hull_solids(window)?);
    }
    debug!(posts = posts.len(), segments = segments.len(), "triangle_hulls");

    Ok(kernel.union_all(&segments)?)
}

/// Hull-stitch consecutive pairs of posts into a strip: each adjacent pair
/// is hulled, and the segments unioned. Used for wall strips where each
/// segment already spans two placed columns of points.
pub fn pair_hulls(
    kernel: &mut dyn Kernel,
    posts: &[SolidHandle],
) -> Result<Option<SolidHandle>, OpError> {
    if posts.len() < 2 {
        return Ok(None);
    }

    let mut segments = Vec::with_capacity(posts.len() - 1);
    for window in posts.windows(2) {
        segments.push(kernel.hull_solids(window)?);
    }

    Ok(kernel.union_all(&segments)?)
}
