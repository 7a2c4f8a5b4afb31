use crate::bom_upload::domain::{ProcessingHandle, ProjectCoordinates};
use std::time::Duration;

/// UploadReport - Response DTO of a completed upload
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub project: ProjectCoordinates,
    /// Token the server assigned to the ingestion job
    pub token: ProcessingHandle,
    /// Size of the uploaded BOM before base64 encoding
    pub bom_size: usize,
    /// Time spent waiting for the server after submission
    pub waited: Duration,
}

impl UploadReport {
    pub fn new(
        project: ProjectCoordinates,
        token: ProcessingHandle,
        bom_size: usize,
        waited: Duration,
    ) -> Self {
        Self {
            project,
            token,
            bom_size,
            waited,
        }
    }
}
