use case_ops::OpError;
use geom_kernel::KernelError;

/// Errors from cluster construction and assembly.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClusterError {
    #[error("operation error: {0}")]
    Op(#[from] OpError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("configuration error: {reason}")]
    Config { reason: String },
}
