use case_types::{CaseParams, ClusterKey};
use geom_kernel::{Kernel, MockKernel};

use cluster_engine::assembly::build_case;
use cluster_engine::{build_cluster, ClusterKind};

fn cluster_under_test(kind: ClusterKind) -> Box<dyn cluster_engine::Cluster> {
    build_cluster(kind, kind.default_config())
}

// ── Placement ───────────────────────────────────────────────────────────────

#[test]
fn cluster_pose_is_deterministic() {
    let params = CaseParams::default();
    let cluster = cluster_under_test(ClusterKind::Orbit);

    let a = cluster.position_rotation(&params);
    let b = cluster.position_rotation(&params);
    for i in 0..3 {
        assert_eq!(a.position[i].to_bits(), b.position[i].to_bits());
        assert_eq!(a.rotation[i].to_bits(), b.rotation[i].to_bits());
    }
}

#[test]
fn zero_offsets_keep_the_base_rotation() {
    let params = CaseParams::default();
    let cluster = cluster_under_test(ClusterKind::Orbit);
    let pose = cluster.position_rotation(&params);
    assert_eq!(pose.rotation, cluster.config().base_rotation);
}

#[test]
fn point_and_solid_key_placement_agree() {
    let params = CaseParams::default();
    let cluster = cluster_under_test(ClusterKind::Orbit);
    let mut kernel = MockKernel::new();

    for &key in cluster.active_keys() {
        let probe = kernel.cuboid(1e-9, 1e-9, 1e-9).unwrap();
        let placed = cluster
            .place_key(&mut kernel, &params, key, &probe)
            .unwrap();
        let centroid = kernel.centroid(&placed).unwrap();
        let point = cluster.place_key_point(&params, key, [0.0, 0.0, 0.0]);
        for i in 0..3 {
            assert!(
                (centroid[i] - point[i]).abs() < 1e-6,
                "{:?} axis {}: {} vs {}",
                key,
                i,
                centroid[i],
                point[i]
            );
        }
    }
}

#[test]
fn fanned_keys_are_distinct_in_world_space() {
    let params = CaseParams::default();
    let cluster = cluster_under_test(ClusterKind::Orbit);

    let positions: Vec<[f64; 3]> = ClusterKey::ALL
        .iter()
        .map(|&key| cluster.place_key_point(&params, key, [0.0, 0.0, 0.0]))
        .collect();

    for i in 0..positions.len() {
        for j in i + 1..positions.len() {
            let d: f64 = (0..3)
                .map(|k| (positions[i][k] - positions[j][k]).powi(2))
                .sum::<f64>()
                .sqrt();
            assert!(d > 10.0, "keys {} and {} overlap: {} mm apart", i, j, d);
        }
    }
}

// ── Connector topology ──────────────────────────────────────────────────────

#[test]
fn orbit_connectors_issue_the_fixed_hull_count() {
    let params = CaseParams::default();
    let cluster = cluster_under_test(ClusterKind::Orbit);
    let mut kernel = MockKernel::new();

    let web = cluster.connectors(&mut kernel, &params).unwrap();
    assert!(web.is_some());
    // Three 4-post key seams (2 hulls each), a 13-post ball ring (11), and
    // a 5-post matrix seam (3): every sequence obeys the N−2 window rule.
    assert_eq!(kernel.hull_op_count(), 3 * 2 + 11 + 3);
}

#[test]
fn compact_connectors_issue_the_fixed_hull_count() {
    let params = CaseParams::default();
    let cluster = cluster_under_test(ClusterKind::Compact);
    let mut kernel = MockKernel::new();

    let web = cluster.connectors(&mut kernel, &params).unwrap();
    assert!(web.is_some());
    // A 5-post gap seam (3), a 7-post ring (5), a 6-post matrix seam (4).
    assert_eq!(kernel.hull_op_count(), 3 + 5 + 4);
}

// ── Walls ───────────────────────────────────────────────────────────────────

#[test]
fn cluster_walls_reach_the_floor() {
    for kind in [ClusterKind::Orbit, ClusterKind::Compact] {
        let params = CaseParams::default();
        let cluster = cluster_under_test(kind);
        let mut kernel = MockKernel::new();

        let walls = cluster.walls(&mut kernel, &params).unwrap();
        let min_z = kernel
            .points(&walls)
            .unwrap()
            .iter()
            .map(|p| p[2])
            .fold(f64::MAX, f64::min);
        assert_eq!(min_z, 0.0, "{:?} wall must land on the build plate", kind);
    }
}

// ── End-to-end assembly ─────────────────────────────────────────────────────

#[test]
fn full_build_is_reproducible_bit_for_bit() {
    let run = || {
        let params = CaseParams::default();
        let cluster = cluster_under_test(ClusterKind::Compact);
        let mut kernel = MockKernel::new();
        let build = build_case(&mut kernel, &params, cluster.as_ref()).unwrap();
        kernel.points(&build.body).unwrap()
    };

    let a = run();
    let b = run();
    assert_eq!(a.len(), b.len());
    for (pa, pb) in a.iter().zip(b.iter()) {
        for i in 0..3 {
            assert_eq!(pa[i].to_bits(), pb[i].to_bits());
        }
    }
}

#[test]
fn full_build_succeeds_for_both_variants() {
    for kind in [ClusterKind::Orbit, ClusterKind::Compact] {
        let params = CaseParams::default();
        let cluster = cluster_under_test(kind);
        let mut kernel = MockKernel::new();
        let build = build_case(&mut kernel, &params, cluster.as_ref()).unwrap();
        let points = kernel.points(&build.body).unwrap();
        assert!(!points.is_empty(), "{:?} build must produce a body", kind);
    }
}
