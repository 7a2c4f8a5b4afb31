use crate::bom_upload::domain::{ProcessingHandle, ServerEndpoint, UploadRequest};
use crate::shared::Result;
use async_trait::async_trait;

/// IngestionServer port for the BOM ingestion API (e.g., DependencyTrack)
///
/// One implementation instance is shared by the submission and every
/// status query of an upload, so it must be `Send + Sync`.
#[async_trait]
pub trait IngestionServer: Send + Sync {
    /// Submits the BOM and returns the server's processing token
    ///
    /// Performs exactly one request and never retries.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The network request fails
    /// - The server answers with a non-success status
    /// - The response body has no usable token
    async fn submit_bom(&self, request: &UploadRequest) -> Result<ProcessingHandle>;

    /// Asks whether the job behind `handle` is still being processed
    ///
    /// # Errors
    /// Same failure classes as [`IngestionServer::submit_bom`]
    async fn is_being_processed(
        &self,
        endpoint: &ServerEndpoint,
        handle: &ProcessingHandle,
    ) -> Result<bool>;
}
