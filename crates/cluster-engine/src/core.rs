//! Shared cluster machinery: origin derivation, the fan placement chain,
//! and the ball post ring. Variants compose this instead of inheriting.

use case_types::transform::{rotate_deg, translate};
use case_types::{BallPost, CaseParams, ClusterKey, Point, Pose};
use geom_kernel::{Kernel, SolidHandle};
use tracing::debug;

use case_ops::matrix::key_place_point;
use case_ops::posts::corner_post;
use case_ops::wall::{
    brace_from_placed, sample_angles, wall_at_angle, wall_locate1, wall_locate2, wall_locate3,
};
use case_ops::web::pair_hulls;
use case_types::PlateCorner;

use crate::config::ClusterConfig;
use crate::types::ClusterError;

/// Placement engine shared by every cluster variant. Holds the merged
/// configuration plus the variant's fan tables.
pub struct ClusterCore {
    pub cfg: ClusterConfig,
    /// Fan angle of each key about the cluster pivot, by `ClusterKey::index`.
    pub fan_angles: [f64; 4],
    /// Plate pre-rotation of each key, applied before everything else.
    pub pre_rotations: [[f64; 3]; 4],
}

impl ClusterCore {
    pub fn new(cfg: ClusterConfig, fan_angles: [f64; 4], pre_rotations: [[f64; 3]; 4]) -> Self {
        Self {
            cfg,
            fan_angles,
            pre_rotations,
        }
    }

    /// Anchor point of the cluster: the inner-bottom corner of the matrix
    /// key at (1, cornerrow), shifted by the configured thumb offsets.
    pub fn thumb_origin(&self, params: &CaseParams) -> Point {
        let corner = [
            params.mount_width / 2.0,
            -params.mount_height / 2.0,
            0.0,
        ];
        let pos = key_place_point(params, 1, params.cornerrow(), corner);
        translate(pos, params.thumb_offsets)
    }

    /// Whole-cluster pose: base rotation plus offsets, origin shifted off
    /// the anchor key by an amount that scales with the fan diameter.
    pub fn position_rotation(&self, params: &CaseParams) -> Pose {
        let cfg = &self.cfg;
        let rotation = [
            cfg.base_rotation[0] + cfg.rotation_offset[0],
            cfg.base_rotation[1] + cfg.rotation_offset[1],
            cfg.base_rotation[2] + cfg.rotation_offset[2],
        ];

        let shift = [
            -0.9 * cfg.key_diameter / 2.0 + 27.0 - 42.0,
            -0.1 * cfg.key_diameter / 2.0 + 3.0 - 20.0,
            -5.0,
        ];
        let origin = self.thumb_origin(params);
        let position = [
            origin[0] + shift[0] + cfg.translation_offset[0],
            origin[1] + shift[1] + cfg.translation_offset[1],
            origin[2] + shift[2] + cfg.translation_offset[2],
        ];

        Pose::new(position, rotation)
    }

    /// Apply the whole-cluster pose to a solid.
    pub fn track_place(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        shape: &SolidHandle,
    ) -> Result<SolidHandle, ClusterError> {
        let pose = self.position_rotation(params);
        let s = kernel.rotate(shape, pose.rotation)?;
        Ok(kernel.translate(&s, pose.position)?)
    }

    /// Apply the whole-cluster pose to a point.
    pub fn track_point(&self, params: &CaseParams, p: Point) -> Point {
        self.position_rotation(params).apply(p)
    }

    /// The fan placement chain for one key: plate pre-rotation, per-key
    /// rotation offset, radial translation (per-key offset plus half the fan
    /// diameter), the key's fan angle, then the cluster pose. The X→Y→Z
    /// rotation order inside each step is fixed.
    pub fn fan_place(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        key: ClusterKey,
        shape: &SolidHandle,
    ) -> Result<SolidHandle, ClusterError> {
        let i = key.index();
        let t_off = self.cfg.key_translation_offsets[i];

        let s = kernel.rotate(shape, self.pre_rotations[i])?;
        let s = kernel.rotate(&s, self.cfg.key_rotation_offsets[i])?;
        let s = kernel.translate(
            &s,
            [
                t_off[0],
                t_off[1] + self.cfg.key_diameter / 2.0,
                t_off[2],
            ],
        )?;
        let s = kernel.rotate(&s, [0.0, 0.0, self.fan_angles[i]])?;
        self.track_place(kernel, params, &s)
    }

    /// Point-level twin of `fan_place`.
    pub fn fan_point(&self, params: &CaseParams, key: ClusterKey, p: Point) -> Point {
        let i = key.index();
        let t_off = self.cfg.key_translation_offsets[i];

        let p = rotate_deg(p, self.pre_rotations[i]);
        let p = rotate_deg(p, self.cfg.key_rotation_offsets[i]);
        let p = translate(
            p,
            [
                t_off[0],
                t_off[1] + self.cfg.key_diameter / 2.0,
                t_off[2],
            ],
        );
        let p = rotate_deg(p, [0.0, 0.0, self.fan_angles[i]]);
        self.track_point(params, p)
    }

    /// World position of a ball ring post: an arm of ball radius plus wall
    /// clearance, swung to the post's angle on top of the base rotation.
    pub fn ball_post_point(&self, params: &CaseParams, post: BallPost) -> Point {
        let radius = params.ball_diameter / 2.0 + params.ball_wall_clearance;
        let rot = [
            self.cfg.base_rotation[0],
            self.cfg.base_rotation[1],
            self.cfg.base_rotation[2] + post.angle_deg(),
        ];
        self.track_point(params, rotate_deg([0.0, radius, 0.0], rot))
    }

    /// A web post placed on the ball ring.
    pub fn ball_post(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        post: BallPost,
    ) -> Result<SolidHandle, ClusterError> {
        let solid = kernel.cuboid(params.post_size, params.post_size, params.web_thickness)?;
        Ok(kernel.translate(&solid, self.ball_post_point(params, post))?)
    }

    /// The curved outer wall: arc samples over `[start, end)` at `step`,
    /// wedge walls between consecutive samples, unioned.
    pub fn outer_wall(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        start: f64,
        end: f64,
        step: f64,
    ) -> Result<SolidHandle, ClusterError> {
        let radius = params.ball_diameter / 2.0 + params.ball_wall_clearance;
        let angles = sample_angles(start, end, step);
        debug!(samples = angles.len(), "cluster outer wall");

        let mut segments = Vec::new();
        for pair in angles.windows(2) {
            let arm = |angle: f64| {
                let rot = [
                    self.cfg.base_rotation[0],
                    self.cfg.base_rotation[1],
                    self.cfg.base_rotation[2] + angle,
                ];
                self.track_point(params, rotate_deg([0.0, radius, 0.0], rot))
            };
            let segment = wall_at_angle(kernel, params, arm(pair[0]), arm(pair[1]))?;
            segments.push(segment);
        }

        kernel
            .union_all(&segments)?
            .ok_or(ClusterError::Config {
                reason: "outer wall sampling produced no segments".to_string(),
            })
    }

    /// Wall brace between two cluster keys: the locate chain runs in each
    /// key's local frame, then every post goes through the fan placement.
    pub fn fan_wall_brace(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        a: (ClusterKey, PlateCorner, (f64, f64)),
        b: (ClusterKey, PlateCorner, (f64, f64)),
    ) -> Result<SolidHandle, ClusterError> {
        let mut top_posts = Vec::with_capacity(8);
        let mut skirt_posts = Vec::with_capacity(4);

        for (key, corner, (dx, dy)) in [a, b] {
            let post = corner_post(kernel, params, corner)?;
            let raw = self.fan_place(kernel, params, key, &post)?;

            let lip = kernel.translate(&post, wall_locate1(params, dx, dy))?;
            let lip = self.fan_place(kernel, params, key, &lip)?;

            let standoff = kernel.translate(&post, wall_locate2(params, dx, dy))?;
            let standoff = self.fan_place(kernel, params, key, &standoff)?;

            let skin = kernel.translate(&post, wall_locate3(params, dx, dy))?;
            let skin = self.fan_place(kernel, params, key, &skin)?;

            top_posts.extend([raw, lip, standoff.clone(), skin.clone()]);
            skirt_posts.extend([standoff, skin]);
        }

        Ok(brace_from_placed(kernel, &top_posts, &skirt_posts)?)
    }

    /// Hull-stitch the wall-offset seam for one key: the plate posts paired
    /// with their wall-offset twins, closing the sliver between plate and
    /// wall levels.
    pub fn wall_seam(
        &self,
        kernel: &mut dyn Kernel,
        params: &CaseParams,
        key: ClusterKey,
        posts: &[SolidHandle],
    ) -> Result<Option<SolidHandle>, ClusterError> {
        let offset = self.cfg.wall_offsets[key.index()];
        let mut stitched = Vec::with_capacity(posts.len() * 2);
        for post in posts {
            stitched.push(post.clone());
            stitched.push(kernel.translate(post, offset)?);
        }
        Ok(pair_hulls(kernel, &stitched)?)
    }
}
