/// Errors during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    ParseError { path: String, reason: String },

    #[error("configuration root of {path} is not a JSON object")]
    NotAnObject { path: String },

    #[error("referenced child config {path} does not exist")]
    MissingChild { path: String },
}

/// Errors during model export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("index {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("STEP export failed: {0}")]
    StepExportFailed(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
