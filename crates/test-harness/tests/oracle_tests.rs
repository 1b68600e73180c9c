use geom_kernel::TriMesh;
use test_harness::{check_bounding_box, check_consistent_winding, check_manifold_edges};

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

#[test]
fn closed_tetrahedron_passes_all_oracles() {
    let mesh = tetrahedron();
    assert!(check_manifold_edges(&mesh).passed);
    assert!(check_consistent_winding(&mesh).passed);
    assert!(
        check_bounding_box(&mesh, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 1e-6).passed
    );
}

#[test]
fn open_mesh_fails_the_manifold_oracle() {
    let mut mesh = tetrahedron();
    // Drop one face: its three edges are now used once.
    mesh.indices.truncate(9);
    let verdict = check_manifold_edges(&mesh);
    assert!(!verdict.passed);
    assert!(verdict.detail.contains("non-manifold"));
}

#[test]
fn flipped_face_fails_the_winding_oracle() {
    let mut mesh = tetrahedron();
    mesh.indices[0..3].reverse();
    assert!(!check_consistent_winding(&mesh).passed);
}

#[test]
fn displaced_mesh_fails_the_bounding_box_oracle() {
    let mesh = tetrahedron();
    let verdict = check_bounding_box(&mesh, [1.0, 0.0, 0.0], [2.0, 1.0, 1.0], 1e-6);
    assert!(!verdict.passed);
    assert!(verdict.detail.contains("axis 0"));
}

#[test]
fn mock_kernel_meshes_satisfy_the_oracles() {
    use geom_kernel::{Kernel, MockKernel};

    let mut kernel = MockKernel::new();
    let solid = kernel.cuboid(4.0, 2.0, 6.0).unwrap();
    let mesh = kernel.tessellate(&solid, 0.1).unwrap();

    assert!(check_manifold_edges(&mesh).passed);
    assert!(check_consistent_winding(&mesh).passed);
    assert!(
        check_bounding_box(&mesh, [-2.0, -1.0, -3.0], [2.0, 1.0, 3.0], 1e-6).passed
    );
}
