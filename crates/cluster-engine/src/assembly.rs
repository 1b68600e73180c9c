//! Assembly — builds the whole case from the matrix, the cluster, and the
//! walls, then carves the trackball socket and screw bores.

use case_types::{CaseParams, PlateCorner};
use geom_kernel::{Kernel, SolidHandle};
use tracing::info;

use case_ops::matrix::key_place;
use case_ops::posts::corner_post;
use case_ops::wall::wall_brace;
use case_ops::web::triangle_hulls;
use case_ops::OpError;

use crate::cluster::Cluster;
use crate::types::ClusterError;

/// The finished build: one watertight body.
pub struct CaseBuild {
    pub body: SolidHandle,
}

/// Switch mounting plate: the mount blank minus the switch cutout, resting
/// on z = 0 with its top at `plate_thickness`.
pub fn single_plate(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
) -> Result<SolidHandle, ClusterError> {
    let blank = kernel.cuboid(
        params.mount_width,
        params.mount_height,
        params.plate_thickness,
    )?;
    let blank = kernel.translate(&blank, [0.0, 0.0, params.plate_thickness / 2.0])?;

    let cutout = kernel.cuboid(
        params.keyswitch_width,
        params.keyswitch_height,
        params.plate_thickness * 2.0 + 1.0,
    )?;
    let cutout = kernel.translate(&cutout, [0.0, 0.0, params.plate_thickness / 2.0])?;

    Ok(kernel.subtract(&blank, &cutout)?)
}

/// All matrix switch plates, placed and unioned.
fn matrix_plates(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
) -> Result<Option<SolidHandle>, ClusterError> {
    let plate = single_plate(kernel, params)?;
    let mut placed = Vec::new();
    for column in 0..params.ncols {
        for row in 0..params.nrows {
            placed.push(key_place(kernel, params, column, row, &plate)?);
        }
    }
    Ok(kernel.union_all(&placed)?)
}

/// The matrix web: column seams, row seams, and diagonal patches between
/// every quad of adjacent plates.
fn matrix_web(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
) -> Result<Option<SolidHandle>, ClusterError> {
    use PlateCorner::{BottomLeft, BottomRight, TopLeft, TopRight};

    let post = |kernel: &mut dyn Kernel, column: usize, row: usize, corner: PlateCorner| {
        let p = corner_post(kernel, params, corner)?;
        key_place(kernel, params, column, row, &p)
    };

    let mut webs = Vec::new();

    // Seams between columns.
    for column in 0..params.ncols - 1 {
        for row in 0..params.nrows {
            let seam = vec![
                post(kernel, column + 1, row, TopLeft)?,
                post(kernel, column, row, TopRight)?,
                post(kernel, column + 1, row, BottomLeft)?,
                post(kernel, column, row, BottomRight)?,
            ];
            if let Some(web) = triangle_hulls(kernel, &seam)? {
                webs.push(web);
            }
        }
    }

    // Seams between rows.
    for column in 0..params.ncols {
        for row in 0..params.nrows - 1 {
            let seam = vec![
                post(kernel, column, row, BottomLeft)?,
                post(kernel, column, row, BottomRight)?,
                post(kernel, column, row + 1, TopLeft)?,
                post(kernel, column, row + 1, TopRight)?,
            ];
            if let Some(web) = triangle_hulls(kernel, &seam)? {
                webs.push(web);
            }
        }
    }

    // Diagonal patches where four plates meet.
    for column in 0..params.ncols - 1 {
        for row in 0..params.nrows - 1 {
            let seam = vec![
                post(kernel, column, row, BottomRight)?,
                post(kernel, column + 1, row, BottomLeft)?,
                post(kernel, column, row + 1, TopRight)?,
                post(kernel, column + 1, row + 1, TopLeft)?,
            ];
            if let Some(web) = triangle_hulls(kernel, &seam)? {
                webs.push(web);
            }
        }
    }

    Ok(kernel.union_all(&webs)?)
}

/// Perimeter walls around the matrix: back, right, front, and the left run
/// above the cluster.
fn matrix_walls(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
) -> Result<Option<SolidHandle>, ClusterError> {
    use PlateCorner::{BottomLeft, BottomRight, TopLeft, TopRight};

    let place = |column: usize, row: usize| {
        move |kernel: &mut dyn Kernel, shape: &SolidHandle| -> Result<SolidHandle, OpError> {
            key_place(kernel, params, column, row, shape)
        }
    };

    let mut segments = Vec::new();
    let last_col = params.ncols - 1;
    let cornerrow = params.cornerrow();

    // Back wall across the top row, with junction braces between columns.
    for column in 0..params.ncols {
        let post_tl = corner_post(kernel, params, TopLeft)?;
        let post_tr = corner_post(kernel, params, TopRight)?;
        let p = place(column, 0);
        segments.push(wall_brace(
            kernel, params, &p, (0.0, 1.0), &post_tl, &p, (0.0, 1.0), &post_tr,
        )?);
        if column < last_col {
            let p_next = place(column + 1, 0);
            segments.push(wall_brace(
                kernel, params, &p, (0.0, 1.0), &post_tr, &p_next, (0.0, 1.0), &post_tl,
            )?);
        }
    }

    // Right wall down the last column.
    for row in 0..params.nrows {
        let post_tr = corner_post(kernel, params, TopRight)?;
        let post_br = corner_post(kernel, params, BottomRight)?;
        let p = place(last_col, row);
        segments.push(wall_brace(
            kernel, params, &p, (1.0, 0.0), &post_tr, &p, (1.0, 0.0), &post_br,
        )?);
        if row < params.nrows - 1 {
            let p_next = place(last_col, row + 1);
            segments.push(wall_brace(
                kernel, params, &p, (1.0, 0.0), &post_br, &p_next, (1.0, 0.0), &post_tr,
            )?);
        }
    }

    // Front wall along the bottom row, clear of the cluster columns.
    for column in 2..params.ncols {
        let post_bl = corner_post(kernel, params, BottomLeft)?;
        let post_br = corner_post(kernel, params, BottomRight)?;
        let p = place(column, cornerrow);
        segments.push(wall_brace(
            kernel, params, &p, (0.0, -1.0), &post_bl, &p, (0.0, -1.0), &post_br,
        )?);
        if column < last_col {
            let p_next = place(column + 1, cornerrow);
            segments.push(wall_brace(
                kernel, params, &p, (0.0, -1.0), &post_br, &p_next, (0.0, -1.0), &post_bl,
            )?);
        }
    }

    // Left wall down the first column, stopping where the cluster takes over.
    for row in 0..cornerrow {
        let post_tl = corner_post(kernel, params, TopLeft)?;
        let post_bl = corner_post(kernel, params, BottomLeft)?;
        let p = place(0, row);
        segments.push(wall_brace(
            kernel, params, &p, (-1.0, 0.0), &post_tl, &p, (-1.0, 0.0), &post_bl,
        )?);
        if row < cornerrow - 1 {
            let p_next = place(0, row + 1);
            segments.push(wall_brace(
                kernel, params, &p, (-1.0, 0.0), &post_bl, &p_next, (-1.0, 0.0), &post_tl,
            )?);
        }
    }

    Ok(kernel.union_all(&segments)?)
}

/// Screw bosses and bores at the cluster's screw positions.
fn screw_inserts(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
    cluster: &dyn Cluster,
) -> Result<(Vec<SolidHandle>, Vec<SolidHandle>), ClusterError> {
    let boss_height = params.screw_insert_height + 2.0;
    let mut bosses = Vec::new();
    let mut bores = Vec::new();

    for position in cluster.screw_positions(params) {
        let boss = kernel.loft(
            params.screw_insert_radius + 2.5,
            params.screw_insert_radius + 1.5,
            boss_height,
            32,
        )?;
        bosses.push(kernel.translate(
            &boss,
            [position[0], position[1], boss_height / 2.0],
        )?);

        let bore = kernel.cylinder(params.screw_insert_radius, boss_height + 1.0)?;
        bores.push(kernel.translate(
            &bore,
            [position[0], position[1], (boss_height + 1.0) / 2.0],
        )?);
    }

    Ok((bosses, bores))
}

/// Build the complete case body.
pub fn build_case(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
    cluster: &dyn Cluster,
) -> Result<CaseBuild, ClusterError> {
    info!(cluster = cluster.name(), "assembling case");

    let mut parts = Vec::new();

    if let Some(plates) = matrix_plates(kernel, params)? {
        parts.push(plates);
    }
    if let Some(web) = matrix_web(kernel, params)? {
        parts.push(web);
    }
    if let Some(walls) = matrix_walls(kernel, params)? {
        parts.push(walls);
    }

    let plate = single_plate(kernel, params)?;
    if let Some(layout) = cluster.layout(kernel, params, &plate)? {
        parts.push(layout);
    }
    if let Some(connectors) = cluster.connectors(kernel, params)? {
        parts.push(connectors);
    }
    parts.push(cluster.walls(kernel, params)?);

    let (bosses, bores) = screw_inserts(kernel, params, cluster)?;
    parts.extend(bosses);

    let body = kernel
        .union_all(&parts)?
        .ok_or(ClusterError::Config {
            reason: "assembly produced no solids".to_string(),
        })?;

    // Carve the trackball socket.
    let pose = cluster.position_rotation(params);
    let socket = kernel.sphere(params.ball_diameter / 2.0 + 1.0)?;
    let socket = kernel.translate(&socket, pose.position)?;
    let body = kernel.subtract(&body, &socket)?;

    let body = kernel.subtract_all(&body, &bores)?;

    info!(cluster = cluster.name(), "case assembled");
    Ok(CaseBuild { body })
}
