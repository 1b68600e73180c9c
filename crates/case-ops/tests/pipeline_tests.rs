use case_types::transform::{rotate_deg, translate};
use case_types::{CaseParams, PlateCorner};
use geom_kernel::{MockKernel, SolidHandle};

use case_ops::matrix::{key_place, key_place_point};
use case_ops::posts::{corner_post, corner_post_point};
use case_ops::web::triangle_hulls;

/// Place the four corner posts of a key plate, in boundary traversal order.
fn placed_corner_posts(
    kernel: &mut MockKernel,
    params: &CaseParams,
    column: usize,
    row: usize,
) -> Vec<SolidHandle> {
    [
        PlateCorner::TopLeft,
        PlateCorner::TopRight,
        PlateCorner::BottomLeft,
        PlateCorner::BottomRight,
    ]
    .iter()
    .map(|&corner| {
        let post = corner_post(kernel, params, corner).unwrap();
        key_place(kernel, params, column, row, &post).unwrap()
    })
    .collect()
}

// ── Web stitching over placed posts ─────────────────────────────────────────

#[test]
fn stitching_two_adjacent_plates_issues_windowed_hulls() {
    let params = CaseParams::default();
    let mut kernel = MockKernel::new();

    // Right edge of column 0 and left edge of column 1, interleaved in
    // physical-adjacency order, as the matrix web builder does.
    let c0 = placed_corner_posts(&mut kernel, &params, 0, 1);
    let c1 = placed_corner_posts(&mut kernel, &params, 1, 1);
    let seam = vec![
        c0[1].clone(), // col 0 top-right
        c1[0].clone(), // col 1 top-left
        c0[3].clone(), // col 0 bottom-right
        c1[2].clone(), // col 1 bottom-left
    ];

    let before = kernel.hull_op_count();
    let web = triangle_hulls(&mut kernel, &seam).unwrap();
    assert!(web.is_some());
    assert_eq!(kernel.hull_op_count() - before, 2, "4 posts → 2 windows");
}

#[test]
fn web_spans_the_gap_between_plates() {
    let params = CaseParams::default();
    let mut kernel = MockKernel::new();

    let c0 = placed_corner_posts(&mut kernel, &params, 0, 1);
    let c1 = placed_corner_posts(&mut kernel, &params, 1, 1);
    let seam = vec![c0[1].clone(), c1[0].clone(), c0[3].clone(), c1[2].clone()];
    let web = triangle_hulls(&mut kernel, &seam).unwrap().unwrap();

    let xs: Vec<f64> = kernel.points(&web).unwrap().iter().map(|p| p[0]).collect();
    let left = key_place_point(&params, 0, 1, corner_post_point(&params, PlateCorner::TopRight));
    let right = key_place_point(&params, 1, 1, corner_post_point(&params, PlateCorner::TopLeft));
    let min = xs.iter().cloned().fold(f64::MAX, f64::min);
    let max = xs.iter().cloned().fold(f64::MIN, f64::max);
    assert!(min <= left[0] && max >= right[0], "web must span the seam");
}

// ── Determinism ─────────────────────────────────────────────────────────────

#[test]
fn identical_runs_produce_identical_clouds() {
    let params = CaseParams::default();

    let run = || {
        let mut kernel = MockKernel::new();
        let posts = placed_corner_posts(&mut kernel, &params, 2, 1);
        let web = triangle_hulls(&mut kernel, &posts).unwrap().unwrap();
        kernel.points(&web).unwrap()
    };

    let a = run();
    let b = run();
    assert_eq!(a.len(), b.len());
    for (pa, pb) in a.iter().zip(b.iter()) {
        for i in 0..3 {
            assert_eq!(pa[i].to_bits(), pb[i].to_bits(), "clouds must match bit-for-bit");
        }
    }
}

// ── Transform properties ────────────────────────────────────────────────────

mod transform_props {
    use super::*;
    use proptest::prelude::*;

    fn norm(p: [f64; 3]) -> f64 {
        (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
    }

    proptest! {
        #[test]
        fn rotation_preserves_length(
            x in -100.0f64..100.0,
            y in -100.0f64..100.0,
            z in -100.0f64..100.0,
            rx in -360.0f64..360.0,
            ry in -360.0f64..360.0,
            rz in -360.0f64..360.0,
        ) {
            let p = [x, y, z];
            let r = rotate_deg(p, [rx, ry, rz]);
            prop_assert!((norm(p) - norm(r)).abs() < 1e-6);
        }

        #[test]
        fn translation_round_trips(
            x in -100.0f64..100.0,
            y in -100.0f64..100.0,
            z in -100.0f64..100.0,
            dx in -50.0f64..50.0,
            dy in -50.0f64..50.0,
            dz in -50.0f64..50.0,
        ) {
            let p = [x, y, z];
            let back = translate(translate(p, [dx, dy, dz]), [-dx, -dy, -dz]);
            for i in 0..3 {
                prop_assert!((p[i] - back[i]).abs() < 1e-9);
            }
        }
    }
}
