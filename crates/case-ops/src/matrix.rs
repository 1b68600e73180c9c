//! Key-matrix placement — maps (column, row) into world space.
//!
//! Keys ride two arcs: a per-row arc about X (radius from the row pitch and
//! alpha) and a per-column arc about Y (radius from the column pitch and
//! beta), so the board curves around the resting fingertips. Column stagger,
//! tenting, and the global lift are applied last. The point and solid
//! variants must stay in lockstep: the web builder mixes both.

use case_types::transform::{rotate_deg, translate};
use case_types::{CaseParams, Point};
use geom_kernel::{Kernel, SolidHandle};

use crate::types::OpError;

/// Place a point in the local frame of key (column, row) into world space.
pub fn key_place_point(params: &CaseParams, column: usize, row: usize, p: Point) -> Point {
    let row_radius = params.row_radius();
    let column_radius = params.column_radius();
    let row_angle = params.alpha * (params.centerrow as f64 - row as f64);
    let column_angle = params.beta * (params.centercol as f64 - column as f64);

    let p = translate(p, [0.0, 0.0, -row_radius]);
    let p = rotate_deg(p, [row_angle, 0.0, 0.0]);
    let p = translate(p, [0.0, 0.0, row_radius]);

    let p = translate(p, [0.0, 0.0, -column_radius]);
    let p = rotate_deg(p, [0.0, column_angle, 0.0]);
    let p = translate(p, [0.0, 0.0, column_radius]);

    let p = translate(p, params.column_offset(column));
    let p = rotate_deg(p, [0.0, params.tenting_angle, 0.0]);
    translate(p, [0.0, 0.0, params.keyboard_z_offset])
}

/// Place a solid in the local frame of key (column, row) into world space.
/// Applies the same chain as `key_place_point`, through the kernel.
pub fn key_place(
    kernel: &mut dyn Kernel,
    params: &CaseParams,
    column: usize,
    row: usize,
    shape: &SolidHandle,
) -> Result<SolidHandle, OpError> {
    let row_radius = params.row_radius();
    let column_radius = params.column_radius();
    let row_angle = params.alpha * (params.centerrow as f64 - row as f64);
    let column_angle = params.beta * (params.centercol as f64 - column as f64);

    let s = kernel.translate(shape, [0.0, 0.0, -row_radius])?;
    let s = kernel.rotate(&s, [row_angle, 0.0, 0.0])?;
    let s = kernel.translate(&s, [0.0, 0.0, row_radius])?;

    let s = kernel.translate(&s, [0.0, 0.0, -column_radius])?;
    let s = kernel.rotate(&s, [0.0, column_angle, 0.0])?;
    let s = kernel.translate(&s, [0.0, 0.0, column_radius])?;

    let s = kernel.translate(&s, params.column_offset(column))?;
    let s = kernel.rotate(&s, [0.0, params.tenting_angle, 0.0])?;
    Ok(kernel.translate(&s, [0.0, 0.0, params.keyboard_z_offset])?)
}

/// World position of a key's local origin.
pub fn key_position(params: &CaseParams, column: usize, row: usize) -> Point {
    key_place_point(params, column, row, [0.0, 0.0, 0.0])
}
