//! Tessellation wrapper over truck-meshalgo.
//!
//! Produces the flat `TriMesh` every exporter consumes. Face identity is not
//! tracked — the case is exported as one watertight body.

use crate::types::{KernelError, TriMesh};
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};

type TruckSolid = truck_modeling::Solid;

/// Tessellate a truck Solid into a merged triangle mesh.
pub fn tessellate_solid(solid: &TruckSolid, tolerance: f64) -> Result<TriMesh, KernelError> {
    let meshed = solid.triangulation(tolerance);
    let mesh: PolygonMesh = meshed.to_polygon();

    let positions = mesh.positions();
    let normals = mesh.normals();
    let tri_faces = mesh.tri_faces();

    let mut vertices = Vec::with_capacity(positions.len() * 3);
    let mut norms = Vec::with_capacity(normals.len() * 3);
    let mut indices = Vec::with_capacity(tri_faces.len() * 3);

    for pos in positions {
        vertices.push(pos[0] as f32);
        vertices.push(pos[1] as f32);
        vertices.push(pos[2] as f32);
    }

    for norm in normals {
        norms.push(norm[0] as f32);
        norms.push(norm[1] as f32);
        norms.push(norm[2] as f32);
    }

    for tri in tri_faces {
        for v in tri.iter() {
            indices.push(v.pos as u32);
        }
    }

    if indices.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "solid produced no triangles".to_string(),
        });
    }

    Ok(TriMesh {
        vertices,
        normals: norms,
        indices,
    })
}
