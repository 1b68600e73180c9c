//! Build fixtures shared by scenario tests.

use case_types::CaseParams;
use cluster_engine::{build_cluster, Cluster, ClusterKind};
use geom_kernel::MockKernel;

/// A small matrix, cheap enough for per-test assembly.
pub fn small_params() -> CaseParams {
    CaseParams {
        ncols: 3,
        nrows: 3,
        centercol: 1,
        centerrow: 1,
        column_offsets: vec![[0.0, 0.0, 0.0], [0.0, 2.82, -4.5], [0.0, -6.0, 5.64]],
        ..CaseParams::default()
    }
}

/// A cluster with the variant's stock configuration.
pub fn stock_cluster(kind: ClusterKind) -> Box<dyn Cluster> {
    build_cluster(kind, kind.default_config())
}

/// Fresh mock kernel.
pub fn mock_kernel() -> MockKernel {
    MockKernel::new()
}
