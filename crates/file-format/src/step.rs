//! STEP export — delegates to the truck kernel's AP203 writer.

use geom_kernel::{SolidHandle, TruckKernel};

use crate::errors::ExportError;

/// Export a solid held by the truck kernel to a STEP string.
pub fn export_step(kernel: &TruckKernel, solid: &SolidHandle) -> Result<String, ExportError> {
    kernel
        .export_step(solid)
        .map_err(|e| ExportError::StepExportFailed(e.to_string()))
}
