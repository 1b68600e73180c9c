//! Orbit cluster: four keys fanned around the trackball.
//!
//! Keys sit on a circle of `key_diameter`, each at a fixed fan angle so the
//! row sweeps around the ball. The connector web stitches the keys to each
//! other, to the ball post ring, and to the main matrix.

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

/// Fan angle of each key about the cluster pivot, by `ClusterKey::index`.
/// Adjacent keys are 45-85 degrees apart so the plates clear each other
/// around the ball.
const FAN_ANGLES: [f64; 4] = [-65.0, -150.0, -195.0, -240.0];

/// Plate pre-rotation per key: the lower pair is flipped so the switch
/// openings face the thumb.
const PRE_ROTATIONS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 180.0],
    [0.0, 0.0, 180.0],
];

/// Angular range and step of the outer wall arc.
const WALL_ARC: (f64, f64, f64) = (-360.0, -80.0, 45.0);

pub struct OrbitCluster {
    core: ClusterCore,
}

impl OrbitCluster {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            core: ClusterCore::new(config, FAN_ANGLES, PRE_ROTATIONS),
        }
    }

    /// A corner post placed at one of this cluster's keys.
    fn key_post(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        key: ClusterKey,
        corner: PlateCorner,
    ) -> Result<SolidHandle, ClusterError> {
        let post = corner_post(kernel, params, corner)?;
        self.core.fan_place(kernel, params, key, &post)
    }

    /// A corner post placed at a main-matrix key.
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

impl Cluster for OrbitCluster {
    fn name(&self) -> &'static str {
        "orbit"
    }

    fn config(&self) -> &ClusterConfig {
        &self.core.cfg
    }

    fn active_keys(&self) -> &'static [ClusterKey] {
        &ClusterKey::ALL
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
        let mut placed = Vec::new();
        for &key in self.active_keys() {
            let spun = kernel.rotate(
                plate,
                [0.0, 0.0, self.core.cfg.plate_rotations[key.index()]],
            )?;
            placed.push(self.core.fan_place(kernel, params, key, &spun)?);
        }
        Ok(kernel.union_all(&placed)?)
    }

    fn connectors(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
    ) -> Result<Option<SolidHandle>, ClusterError> {
        info!(cluster = self.name(), "building connectors");
        let mut webs: Vec<SolidHandle> = Vec::new();

        // Key-to-key seams between fan neighbors. Post order walks the seam
        // top to bottom; reordering would stitch different triangles.
        use ClusterKey::{BottomLeft, BottomRight, MiddleRight, TopLeft};
        for (a, b) in [
            (TopLeft, MiddleRight),
            (MiddleRight, BottomRight),
            (BottomRight, BottomLeft),
        ] {
            let seam = vec![
                self.key_post(kernel, params, a, PlateCorner::BottomRight)?,
                self.key_post(kernel, params, b, PlateCorner::BottomLeft)?,
                self.key_post(kernel, params, a, PlateCorner::TopRight)?,
                self.key_post(kernel, params, b, PlateCorner::TopLeft)?,
            ];
            if let Some(web) = triangle_hulls(kernel, &seam)? {
                webs.push(web);
            }
        }

        // Ball ring: each ring post bridged to the ball-facing corners of
        // the key fanned between it and the next post.
        let ring = vec![
            self.core.ball_post(kernel, params, BallPost::Left)?,
            self.key_post(kernel, params, TopLeft, PlateCorner::BottomRight)?,
            self.key_post(kernel, params, TopLeft, PlateCorner::BottomLeft)?,
            self.core.ball_post(kernel, params, BallPost::BottomLeft)?,
            self.key_post(kernel, params, MiddleRight, PlateCorner::BottomRight)?,
            self.key_post(kernel, params, MiddleRight, PlateCorner::BottomLeft)?,
            self.core.ball_post(kernel, params, BallPost::BottomRight)?,
            self.key_post(kernel, params, BottomRight, PlateCorner::BottomRight)?,
            self.key_post(kernel, params, BottomRight, PlateCorner::BottomLeft)?,
            self.core.ball_post(kernel, params, BallPost::Right)?,
            self.key_post(kernel, params, BottomLeft, PlateCorner::BottomRight)?,
            self.key_post(kernel, params, BottomLeft, PlateCorner::BottomLeft)?,
            self.core.ball_post(kernel, params, BallPost::TopRight)?,
        ];
        if let Some(web) = triangle_hulls(kernel, &ring)? {
            webs.push(web);
        }

        // Seam to the main matrix: the top edge of the TL key meets the
        // bottom edge of matrix columns 0 and 1.
        let cornerrow = params.cornerrow();
        let matrix_seam = vec![
            self.matrix_post(kernel, params, 0, cornerrow, PlateCorner::BottomLeft)?,
            self.key_post(kernel, params, TopLeft, PlateCorner::TopLeft)?,
            self.matrix_post(kernel, params, 0, cornerrow, PlateCorner::BottomRight)?,
            self.key_post(kernel, params, TopLeft, PlateCorner::TopRight)?,
            self.matrix_post(kernel, params, 1, cornerrow, PlateCorner::BottomLeft)?,
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

        // Straight brace closing the gap between the arc's open end and the
        // outermost fan key.
        let brace = self.core.fan_wall_brace(
            kernel,
            params,
            (ClusterKey::BottomLeft, PlateCorner::TopRight, (0.0, -1.0)),
            (ClusterKey::BottomLeft, PlateCorner::BottomRight, (0.0, -1.0)),
        )?;

        Ok(kernel.union(&arc, &brace)?)
    }

    fn screw_positions(&self, params: &CaseParams) -> Vec<Point> {
        let origin = self.core.thumb_origin(params);
        let offset = self.core.cfg.screw_offset;
        vec![[origin[0] + offset[0], origin[1] + offset[1], 0.0]]
    }
}
