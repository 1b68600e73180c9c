use serde::{Deserialize, Serialize};

/// Geometry context for one build run.
///
/// Every placement, hull, and wall function takes this struct explicitly;
/// nothing in the pipeline reads ambient state. Values are set once from the
/// merged configuration document and treated as read-only afterwards.
/// Distances are millimeters, angles degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseParams {
    /// Key matrix columns.
    pub ncols: usize,
    /// Key matrix rows.
    pub nrows: usize,
    /// Per-row curvature: rotation about X between adjacent rows.
    pub alpha: f64,
    /// Per-column curvature: rotation about Y between adjacent columns.
    pub beta: f64,
    /// Column the matrix arcs pivot around.
    pub centercol: usize,
    /// Row the matrix arcs pivot around.
    pub centerrow: usize,
    /// Whole-board rotation about Y.
    pub tenting_angle: f64,
    /// Lift of the whole board above the floor plane.
    pub keyboard_z_offset: f64,

    /// Switch cutout width.
    pub keyswitch_width: f64,
    /// Switch cutout height.
    pub keyswitch_height: f64,
    /// Mounting plate width (cutout plus rim).
    pub mount_width: f64,
    /// Mounting plate height.
    pub mount_height: f64,
    /// Plate thickness at the switch mount.
    pub plate_thickness: f64,
    /// Thickness of the connective web between plates.
    pub web_thickness: f64,
    /// Side length of a web post.
    pub post_size: f64,
    /// Inset of a corner post from the plate edge.
    pub post_adj: f64,
    /// Extra lateral pitch between columns.
    pub extra_width: f64,
    /// Extra vertical pitch between rows.
    pub extra_height: f64,
    /// Keycap stack height above the plate, feeds the arc radii.
    pub cap_top_height: f64,

    /// Per-column [x, y, z] stagger offsets; columns past the end reuse the
    /// last entry.
    pub column_offsets: Vec<[f64; 3]>,

    /// Trackball diameter.
    pub ball_diameter: f64,
    /// Gap between the ball and its socket wall.
    pub ball_wall_clearance: f64,
    /// Offset of the thumb-cluster origin from the anchor key corner.
    pub thumb_offsets: [f64; 3],

    /// Wall standoff along the outward normal, first locate step.
    pub wall_x_offset: f64,
    /// Wall standoff along the outward normal, second locate step.
    pub wall_y_offset: f64,
    /// Drop from plate level to the wall's outer lip.
    pub wall_z_offset: f64,
    /// Printed wall thickness.
    pub wall_thickness: f64,

    /// Screw insert outer radius.
    pub screw_insert_radius: f64,
    /// Screw insert bore height.
    pub screw_insert_height: f64,
    /// Mesh tolerance handed to the kernel tessellator.
    pub tessellation_tolerance: f64,
}

impl Default for CaseParams {
    fn default() -> Self {
        Self {
            ncols: 5,
            nrows: 4,
            alpha: 15.0,
            beta: 5.0,
            centercol: 3,
            centerrow: 2,
            tenting_angle: 15.0,
            keyboard_z_offset: 11.0,

            keyswitch_width: 14.4,
            keyswitch_height: 14.4,
            mount_width: 19.4,
            mount_height: 19.4,
            plate_thickness: 4.0,
            web_thickness: 4.0,
            post_size: 0.1,
            post_adj: 0.05,
            extra_width: 2.5,
            extra_height: 1.0,
            cap_top_height: 16.9,

            column_offsets: vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                [0.0, 2.82, -4.5],
                [0.0, 0.0, 0.0],
                [0.0, -6.0, 5.64],
            ],

            ball_diameter: 34.0,
            ball_wall_clearance: 4.0,
            thumb_offsets: [6.0, -3.0, 7.0],

            wall_x_offset: 5.0,
            wall_y_offset: 6.0,
            wall_z_offset: 15.0,
            wall_thickness: 4.5,

            screw_insert_radius: 2.35,
            screw_insert_height: 3.8,
            tessellation_tolerance: 0.05,
        }
    }
}

impl CaseParams {
    /// Stagger offset for `column`, clamped to the configured table.
    pub fn column_offset(&self, column: usize) -> [f64; 3] {
        match self.column_offsets.last() {
            None => [0.0; 3],
            Some(last) => *self
                .column_offsets
                .get(column)
                .unwrap_or(last),
        }
    }

    /// Radius of the per-row arc the keys ride on.
    pub fn row_radius(&self) -> f64 {
        (self.mount_height + self.extra_height) / 2.0
            / (self.alpha.to_radians() / 2.0).sin()
            + self.cap_top_height
    }

    /// Radius of the per-column arc.
    pub fn column_radius(&self) -> f64 {
        (self.mount_width + self.extra_width) / 2.0
            / (self.beta.to_radians() / 2.0).sin()
            + self.cap_top_height
    }

    /// Bottom row index with a full-width key, where the cluster attaches.
    pub fn cornerrow(&self) -> usize {
        self.nrows.saturating_sub(1)
    }
}
