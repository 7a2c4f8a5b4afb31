use crate::bom_upload::domain::{ProcessingHandle, UploadRequest};
use crate::ports::outbound::IngestionServer;
use crate::shared::error::UploadError;
use std::sync::Arc;

/// SubmitBomUseCase - sends the BOM once and returns the processing token
///
/// No retries and no local side effects: a failed submission is reported
/// as `UploadError::Submission` and the caller decides what to do next.
pub struct SubmitBomUseCase<S> {
    server: Arc<S>,
}

impl<S: IngestionServer> SubmitBomUseCase<S> {
    pub fn new(server: Arc<S>) -> Self {
        Self { server }
    }

    pub async fn execute(
        &self,
        request: &UploadRequest,
    ) -> std::result::Result<ProcessingHandle, UploadError> {
        tracing::debug!(
            server = %request.endpoint().base_url(),
            project = %request.project(),
            auto_create = request.auto_create(),
            bom_bytes = request.bom().len(),
            "submitting BOM"
        );

        match self.server.submit_bom(request).await {
            Ok(handle) => {
                tracing::info!(
                    project = %request.project(),
                    token = %handle,
                    "BOM accepted for processing"
                );
                Ok(handle)
            }
            Err(e) => {
                let err = UploadError::Submission {
                    project: request.project().to_string(),
                    details: format!("{:#}", e),
                };
                tracing::error!(
                    phase = err.phase(),
                    project = %request.project(),
                    error = %format!("{:#}", e),
                    "BOM submission failed"
                );
                Err(err)
            }
        }
    }
}
