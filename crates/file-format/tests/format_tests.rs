use geom_kernel::TriMesh;

use file_format::dxf::export_dxf;
use file_format::manifest::{BuildManifest, FORMAT_VERSION};
use file_format::stl::{export_ascii_stl, export_binary_stl, mirror_x};
use file_format::ExportError;

/// A unit tetrahedron mesh with outward-wound faces.
fn tetrahedron() -> TriMesh {
    TriMesh {
        vertices: vec![
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ],
        normals: Vec::new(),
        indices: vec![
            0, 2, 1, //
            0, 1, 3, //
            0, 3, 2, //
            1, 2, 3,
        ],
    }
}

// ── STL ─────────────────────────────────────────────────────────────────────

#[test]
fn binary_stl_layout_is_exact() {
    let mesh = tetrahedron();
    let bytes = export_binary_stl(&mesh, "tetra").unwrap();

    // 80-byte header + 4-byte count + 4 triangles × 50 bytes.
    assert_eq!(bytes.len(), 80 + 4 + 4 * 50);
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
    assert_eq!(count, 4);
}

#[test]
fn ascii_stl_contains_every_facet() {
    let mesh = tetrahedron();
    let text = export_ascii_stl(&mesh, "tetra").unwrap();

    assert!(text.starts_with("solid tetra\n"));
    assert!(text.ends_with("endsolid tetra\n"));
    assert_eq!(text.matches("facet normal").count(), 4);
    assert_eq!(text.matches("outer loop").count(), 4);
}

#[test]
fn empty_mesh_is_rejected() {
    let mesh = TriMesh {
        vertices: vec![0.0, 0.0, 0.0],
        normals: Vec::new(),
        indices: Vec::new(),
    };
    assert!(matches!(
        export_binary_stl(&mesh, "empty"),
        Err(ExportError::EmptyMesh)
    ));
    assert!(matches!(
        export_ascii_stl(&mesh, "empty"),
        Err(ExportError::EmptyMesh)
    ));
}

#[test]
fn out_of_range_index_is_rejected() {
    let mut mesh = tetrahedron();
    mesh.indices[0] = 99;
    assert!(matches!(
        export_binary_stl(&mesh, "broken"),
        Err(ExportError::IndexOutOfRange { index: 99, .. })
    ));
}

#[test]
fn mirroring_negates_x_and_flips_winding() {
    let mesh = tetrahedron();
    let mirrored = mirror_x(&mesh);

    assert_eq!(mirrored.vertices[3], -1.0, "x of vertex 1 must flip");
    assert_eq!(mirrored.vertices[4], 0.0);
    assert_eq!(&mirrored.indices[0..3], &[0, 1, 2], "winding must flip");
    assert_eq!(mirrored.indices.len(), mesh.indices.len());

    // Mirroring twice is the identity.
    let back = mirror_x(&mirrored);
    assert_eq!(back.vertices, mesh.vertices);
    assert_eq!(back.indices, mesh.indices);
}

// ── DXF ─────────────────────────────────────────────────────────────────────

#[test]
fn dxf_emits_one_face_per_triangle() {
    let mesh = tetrahedron();
    let text = export_dxf(&mesh).unwrap();

    assert!(text.starts_with("0\nSECTION\n"));
    assert!(text.ends_with("0\nEOF\n"));
    assert_eq!(text.matches("3DFACE").count(), 4);
    // Fourth corner group codes appear once per face.
    assert_eq!(text.matches("\n13\n").count(), 4);
}

#[test]
fn dxf_rejects_empty_and_broken_meshes() {
    let empty = TriMesh {
        vertices: Vec::new(),
        normals: Vec::new(),
        indices: Vec::new(),
    };
    assert!(matches!(export_dxf(&empty), Err(ExportError::EmptyMesh)));

    let mut broken = tetrahedron();
    broken.indices[5] = 12;
    assert!(matches!(
        export_dxf(&broken),
        Err(ExportError::IndexOutOfRange { index: 12, .. })
    ));
}

// ── Manifest ────────────────────────────────────────────────────────────────

#[test]
fn manifest_round_trips_through_json() {
    let mut manifest = BuildManifest::new(
        vec!["run_config.json".to_string()],
        vec!["no_such_knob".to_string()],
    );
    manifest.record("case_right.stl", "stl");
    manifest.record("case_right.step", "step");

    let json = manifest.to_json();
    let parsed: file_format::manifest::BuildManifest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.format, "casegen");
    assert_eq!(parsed.version, FORMAT_VERSION);
    assert_eq!(parsed.outputs.len(), 2);
    assert_eq!(parsed.dropped_keys, vec!["no_such_knob"]);
}
