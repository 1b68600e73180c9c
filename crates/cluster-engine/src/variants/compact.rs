//! Compact cluster: one key beside the trackball.
//!
//! Keeps the orbit fan geometry but populates only the top-left position,
//! so the ball dominates the cluster. The freed arc is closed by a longer
//! outer wall, and the single key carries a plate-gap seam filling the
//! sliver between its plate-level and wall-level posts.

use case_types::{BallPost, CaseParams, ClusterKey, PlateCorner, Point, Pose};
use geom_kernel::{Kernel, SolidHandle};
use tracing::info;

use case_ops::matrix::key_place;
use case_ops::posts::corner_post;
use case_ops::web::triangle_hulls;

use crate::cluster::Cluster;
use crate::config::ClusterConfig;
use crate::core::ClusterCore;
use crate::types::ClusterError;

/// Same fan table as the orbit cluster; only the first slot is active.
const FAN_ANGLES: [f64; 4] = [-65.0, -150.0, -195.0, -240.0];

const PRE_ROTATIONS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 180.0],
    [0.0, 0.0, 180.0],
];

/// Finer arc step than the orbit cluster: with only one key plate breaking
/// the circle, the wall carries more of the silhouette.
const WALL_ARC: (f64, f64, f64) = (-360.0, -80.0, 35.0);

const ACTIVE_KEYS: [ClusterKey; 1] = [ClusterKey::TopLeft];

pub struct CompactCluster {
    core: ClusterCore,
}

impl CompactCluster {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            core: ClusterCore::new(config, FAN_ANGLES, PRE_ROTATIONS),
        }
    }

    fn key_post(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        corner: PlateCorner,
    ) -> Result<SolidHandle, ClusterError> {
        let post = corner_post(kernel, params, corner)?;
        self.core
            .fan_place(kernel, params, ClusterKey::TopLeft, &post)
    }

    /// Corner post lifted by the plate gap, bridging plate and wall levels.
    fn gap_post(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        corner: PlateCorner,
    ) -> Result<SolidHandle, ClusterError> {
        let post = corner_post(kernel, params, corner)?;
        let lifted = kernel.translate(&post, [0.0, 0.0, self.core.cfg.plate_gap])?;
        self.core
            .fan_place(kernel, params, ClusterKey::TopLeft, &lifted)
    }

    fn matrix_post(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        column: usize,
        row: usize,
        corner: PlateCorner,
    ) -> Result<SolidHandle, ClusterError> {
        let post = corner_post(kernel, params, corner)?;
        Ok(key_place(kernel, params, column, row, &post)?)
    }
}

impl Cluster for CompactCluster {
    fn name(&self) -> &'static str {
        "compact"
    }

    fn config(&self) -> &ClusterConfig {
        &self.core.cfg
    }

    fn active_keys(&self) -> &'static [ClusterKey] {
        &ACTIVE_KEYS
    }

    fn position_rotation(&self, params: &CaseParams) -> Pose {
        self.core.position_rotation(params)
    }

    fn place_key_point(&self, params: &CaseParams, key: ClusterKey, p: Point) -> Point {
        self.core.fan_point(params, key, p)
    }

    fn place_key(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        key: ClusterKey,
        shape: &SolidHandle,
    ) -> Result<SolidHandle, ClusterError> {
        self.core.fan_place(kernel, params, key, shape)
    }

    fn layout(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        plate: &SolidHandle,
    ) -> Result<Option<SolidHandle>, ClusterError> {
        let spun = kernel.rotate(plate, [0.0, 0.0, self.core.cfg.plate_rotations[0]])?;
        let placed = self
            .core
            .fan_place(kernel, params, ClusterKey::TopLeft, &spun)?;
        Ok(Some(placed))
    }

    fn connectors(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
    ) -> Result<Option<SolidHandle>, ClusterError> {
        info!(cluster = self.name(), "building connectors");
        let mut webs: Vec<SolidHandle> = Vec::new();

        // Plate-gap seam: each top corner hulled against its lifted twin so
        // the plate meets the wall posts without a sliver.
        let gap_seam = vec![
            self.key_post(kernel, params, PlateCorner::TopLeft)?,
            self.gap_post(kernel, params, PlateCorner::TopLeft)?,
            self.gap_post(kernel, params, PlateCorner::TopRight)?,
            self.key_post(kernel, params, PlateCorner::TopRight)?,
            self.key_post(kernel, params, PlateCorner::TopLeft)?,
        ];
        if let Some(web) = triangle_hulls(kernel, &gap_seam)? {
            webs.push(web);
        }

        // Ball ring around the single key.
        let ring = vec![
            self.core.ball_post(kernel, params, BallPost::Left)?,
            self.key_post(kernel, params, PlateCorner::BottomRight)?,
            self.key_post(kernel, params, PlateCorner::BottomLeft)?,
            self.core.ball_post(kernel, params, BallPost::BottomLeft)?,
            self.core.ball_post(kernel, params, BallPost::BottomRight)?,
            self.core.ball_post(kernel, params, BallPost::Right)?,
            self.core.ball_post(kernel, params, BallPost::TopRight)?,
        ];
        if let Some(web) = triangle_hulls(kernel, &ring)? {
            webs.push(web);
        }

        // Seam to the matrix, anchored at the ring's top post.
        let cornerrow = params.cornerrow();
        let matrix_seam = vec![
            self.matrix_post(kernel, params, 0, cornerrow, PlateCorner::BottomLeft)?,
            self.core.ball_post(kernel, params, BallPost::TopLeft)?,
            self.matrix_post(kernel, params, 0, cornerrow, PlateCorner::BottomRight)?,
            self.key_post(kernel, params, PlateCorner::TopLeft)?,
            self.matrix_post(kernel, params, 1, cornerrow, PlateCorner::BottomLeft)?,
            self.key_post(kernel, params, PlateCorner::TopRight)?,
        ];
        if let Some(web) = triangle_hulls(kernel, &matrix_seam)? {
            webs.push(web);
        }

        Ok(kernel.union_all(&webs)?)
    }

    fn walls(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
    ) -> Result<SolidHandle, ClusterError> {
        let (start, end, step) = WALL_ARC;
        let arc = self.core.outer_wall(kernel, params, start, end, step)?;

        let brace = self.core.fan_wall_brace(
            kernel,
            params,
            (ClusterKey::TopLeft, PlateCorner::TopRight, (0.0, -1.0)),
            (ClusterKey::TopLeft, PlateCorner::BottomRight, (0.0, -1.0)),
        )?;
        let braced = kernel.union(&arc, &brace)?;

        // Close the configured wall-offset seam along the key's top edge.
        let posts = [
            self.key_post(kernel, params, PlateCorner::TopLeft)?,
            self.key_post(kernel, params, PlateCorner::TopRight)?,
        ];
        match self
            .core
            .wall_seam(kernel, params, ClusterKey::TopLeft, &posts)?
        {
            Some(seam) => Ok(kernel.union(&braced, &seam)?),
            None => Ok(braced),
        }
    }

    fn screw_positions(&self, params: &CaseParams) -> Vec<Point> {
        let origin = self.core.thumb_origin(params);
        let offset = self.core.cfg.screw_offset;
        vec![[origin[0] + offset[0], origin[1] + offset[1], 0.0]]
    }
}
