//! Verification oracles — pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not
//! panics, so a scenario can collect every failure in one pass.

use std::collections::HashMap;

use geom_kernel::TriMesh;

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
        }
    }
}

/// Key for an undirected edge between two vertex indices.
fn edge_key(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

/// Check that every undirected edge is shared by exactly two triangles —
/// the mesh-level manifold condition a watertight print needs.
pub fn check_manifold_edges(mesh: &TriMesh) -> OracleVerdict {
    let mut edge_uses: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in mesh.indices.chunks(3) {
        for k in 0..3 {
            *edge_uses
                .entry(edge_key(tri[k], tri[(k + 1) % 3]))
                .or_insert(0) += 1;
        }
    }

    let bad: Vec<_> = edge_uses
        .iter()
        .filter(|(_, &count)| count != 2)
        .take(5)
        .map(|(&edge, &count)| (edge, count))
        .collect();

    if bad.is_empty() {
        OracleVerdict::pass(
            "manifold_edges",
            format!("all {} edges have exactly 2 faces", edge_uses.len()),
        )
    } else {
        OracleVerdict::fail(
            "manifold_edges",
            format!("non-manifold edges (showing up to 5): {:?}", bad),
        )
    }
}

/// Check that consistent winding cancels: each undirected edge must be
/// traversed once in each direction.
pub fn check_consistent_winding(mesh: &TriMesh) -> OracleVerdict {
    let mut directed: HashMap<(u32, u32), i64> = HashMap::new();
    for tri in mesh.indices.chunks(3) {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            *directed.entry(edge_key(a, b)).or_insert(0) += if a < b { 1 } else { -1 };
        }
    }

    let unbalanced = directed.values().filter(|&&sum| sum != 0).count();
    if unbalanced == 0 {
        OracleVerdict::pass(
            "consistent_winding",
            format!("{} edges balanced", directed.len()),
        )
    } else {
        OracleVerdict::fail(
            "consistent_winding",
            format!("{} edges traversed unevenly", unbalanced),
        )
    }
}

/// Check that the mesh's bounding box matches expectations within `eps`.
pub fn check_bounding_box(
    mesh: &TriMesh,
    expected_min: [f32; 3],
    expected_max: [f32; 3],
    eps: f32,
) -> OracleVerdict {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for v in mesh.vertices.chunks(3) {
        for i in 0..3 {
            min[i] = min[i].min(v[i]);
            max[i] = max[i].max(v[i]);
        }
    }

    for i in 0..3 {
        if (min[i] - expected_min[i]).abs() > eps || (max[i] - expected_max[i]).abs() > eps {
            return OracleVerdict::fail(
                "bounding_box",
                format!(
                    "axis {}: got [{}, {}], expected [{}, {}]",
                    i, min[i], max[i], expected_min[i], expected_max[i]
                ),
            );
        }
    }
    OracleVerdict::pass(
        "bounding_box",
        format!("bbox within {} of expectation", eps),
    )
}
