//! DXF export — one `3DFACE` entity per mesh triangle, minimal R12 layout.
//!
//! Slicers and CAD tools accept faceted 3DFACE soups; the fourth corner of
//! each entity repeats the third, which is the triangle convention.

use geom_kernel::TriMesh;

use crate::errors::ExportError;

fn push_corner(out: &mut String, base_code: u32, x: f32, y: f32, z: f32) {
    out.push_str(&format!("{}\n{}\n", base_code + 10, x));
    out.push_str(&format!("{}\n{}\n", base_code + 20, y));
    out.push_str(&format!("{}\n{}\n", base_code + 30, z));
}

/// Export a TriMesh as a DXF R12 document.
pub fn export_dxf(mesh: &TriMesh) -> Result<String, ExportError> {
    if mesh.indices.len() < 3 {
        return Err(ExportError::EmptyMesh);
    }
    let vertex_count = mesh.vertices.len() / 3;
    for &idx in &mesh.indices {
        if idx as usize >= vertex_count {
            return Err(ExportError::IndexOutOfRange {
                index: idx,
                vertex_count,
            });
        }
    }

    let mut out = String::with_capacity(mesh.indices.len() * 60);
    out.push_str("0\nSECTION\n2\nHEADER\n0\nENDSEC\n");
    out.push_str("0\nSECTION\n2\nENTITIES\n");

    for tri in mesh.indices.chunks(3) {
        out.push_str("0\n3DFACE\n8\n0\n");
        for (corner, &idx) in tri.iter().enumerate() {
            let vi = idx as usize * 3;
            push_corner(
                &mut out,
                corner as u32,
                mesh.vertices[vi],
                mesh.vertices[vi + 1],
                mesh.vertices[vi + 2],
            );
        }
        // Fourth corner repeats the third.
        let vi = tri[2] as usize * 3;
        push_corner(
            &mut out,
            3,
            mesh.vertices[vi],
            mesh.vertices[vi + 1],
            mesh.vertices[vi + 2],
        );
    }

    out.push_str("0\nENDSEC\n0\nEOF\n");
    Ok(out)
}
