//! The cluster capability surface and variant dispatch.

use serde::{Deserialize, Serialize};

use case_types::{CaseParams, ClusterKey, Point, Pose};
use geom_kernel::{Kernel, SolidHandle};

use crate::config::ClusterConfig;
use crate::types::ClusterError;
use crate::variants::{CompactCluster, OrbitCluster};

/// Closed set of cluster variants. Adding a shape means adding a tag here
/// and one implementation of `Cluster` — there is no inheritance chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterKind {
    /// Four keys fanned around the trackball.
    Orbit,
    /// Single key beside the trackball, reduced connector set.
    Compact,
}

impl ClusterKind {
    /// Variant-specific configuration defaults, before the document's own
    /// cluster keys are applied.
    pub fn default_config(self) -> ClusterConfig {
        match self {
            ClusterKind::Orbit => ClusterConfig::default(),
            ClusterKind::Compact => ClusterConfig {
                post_offsets: [
                    [14.0, -8.0, 3.0],
                    [3.0, -9.0, -7.0],
                    [-4.0, 4.0, -6.0],
                    [-5.0, 18.0, 19.0],
                ],
                wall_offsets: [
                    [-1.0, 1.0, 0.0],
                    [0.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0],
                ],
                plate_gap: 1.7,
                ..ClusterConfig::default()
            },
        }
    }
}

/// Capability surface of a concrete cluster shape: placement, wall,
/// connectors, and configuration access.
///
/// Implementations are constructed once per build run and are read-only
/// afterwards; every method threads the explicit `CaseParams` context.
pub trait Cluster {
    fn name(&self) -> &'static str;

    fn config(&self) -> &ClusterConfig;

    /// Keys this variant populates with switch plates.
    fn active_keys(&self) -> &'static [ClusterKey];

    /// Whole-cluster pose: derived origin plus configured offsets.
    fn position_rotation(&self, params: &CaseParams) -> Pose;

    /// Place a local-frame point at a named cluster key.
    fn place_key_point(&self, params: &CaseParams, key: ClusterKey, p: Point) -> Point;

    /// Place a local-frame solid at a named cluster key.
    fn place_key(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        key: ClusterKey,
        shape: &SolidHandle,
    ) -> Result<SolidHandle, ClusterError>;

    /// Switch plates at every active key, unioned. `None` when the variant
    /// has no active keys.
    fn layout(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        plate: &SolidHandle,
    ) -> Result<Option<SolidHandle>, ClusterError>;

    /// Hull-stitched internal connectors: key-to-key seams, the ball post
    /// ring, and the seam to the main matrix.
    fn connectors(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
    ) -> Result<Option<SolidHandle>, ClusterError>;

    /// The cluster's outer bounding wall.
    fn walls(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
    ) -> Result<SolidHandle, ClusterError>;

    /// Floor-level screw boss positions.
    fn screw_positions(&self, params: &CaseParams) -> Vec<Point>;
}

/// Construct the variant selected by `kind` with the given configuration.
pub fn build_cluster(kind: ClusterKind, config: ClusterConfig) -> Box<dyn Cluster> {
    match kind {
        ClusterKind::Orbit => Box::new(OrbitCluster::new(config)),
        ClusterKind::Compact => Box::new(CompactCluster::new(config)),
    }
}
