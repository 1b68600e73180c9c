use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// Valid only for the kernel instance that produced it; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolidHandle(pub(crate) u64);

impl SolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Errors from kernel operations. All of these abort the build: geometry
/// construction is a single batch pass with no recovery path.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("convex hull needs at least 4 distinct points, got {distinct}")]
    DegenerateHull { distinct: usize },

    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("shell construction failed: {reason}")]
    ShellFailed { reason: String },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("solid not found: handle {handle}")]
    SolidNotFound { handle: u64 },

    #[error("kernel error: {message}")]
    Other { message: String },
}

/// Tessellated triangle mesh, the common currency of all exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriMesh {
    /// Flat vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat per-vertex normals; may be empty when the source had none.
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }
}
