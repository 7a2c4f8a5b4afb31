use crate::application::dto::{UploadCommand, UploadReport};
use crate::application::use_cases::{CompletionWatcher, SubmitBomUseCase};
use crate::bom_upload::domain::{
    BomContent, CompletionOutcome, PollSettings, ProcessingHandle, ProjectCoordinates,
    ServerEndpoint, UploadRequest,
};
use crate::ports::outbound::{BomReader, IngestionServer, ProgressReporter};
use crate::shared::error::UploadError;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

type UploadResult<T> = std::result::Result<T, UploadError>;

/// UploadBomUseCase - Upload-and-await coordinator
///
/// Validates the resolved settings, reads the BOM, submits it, and then
/// waits for server-side processing through a [`CompletionWatcher`].
/// Every failure comes back as an [`UploadError`] tagged with its phase;
/// nothing here exits the process.
///
/// # Type Parameters
/// * `BR` - BomReader implementation
/// * `S` - IngestionServer implementation
/// * `PR` - ProgressReporter implementation
pub struct UploadBomUseCase<BR, S, PR> {
    bom_reader: BR,
    server: Arc<S>,
    progress_reporter: Arc<PR>,
}

impl<BR, S, PR> UploadBomUseCase<BR, S, PR>
where
    BR: BomReader,
    S: IngestionServer + 'static,
    PR: ProgressReporter + 'static,
{
    /// Creates a new UploadBomUseCase with injected dependencies
    pub fn new(bom_reader: BR, server: S, progress_reporter: PR) -> Self {
        Self {
            bom_reader,
            server: Arc::new(server),
            progress_reporter: Arc::new(progress_reporter),
        }
    }

    /// Executes the upload and waits for the server to finish processing
    ///
    /// # Arguments
    /// * `command` - Resolved upload settings
    /// * `cancel` - Cancels submission or polling, whichever is in flight
    ///
    /// # Errors
    /// Configuration and BOM read errors are returned before any network
    /// call. After that, exactly one of submission failure, query failure,
    /// timeout or cancellation ends an unsuccessful run.
    pub async fn execute(
        &self,
        command: UploadCommand,
        cancel: &CancellationToken,
    ) -> UploadResult<UploadReport> {
        // Step 1: Validate settings before touching the file system or network
        let (endpoint, project) = validate_command(&command)?;

        // Step 2: Read the BOM
        let bom = self.read_bom(&command.bom_path)?;
        let bom_size = bom.len();
        let request = UploadRequest::new(endpoint, project, command.auto_create, bom);

        // Step 3: Submit
        self.progress_reporter.report(&format!(
            "📤 Uploading BOM ({} bytes) for project {} to {}",
            bom_size,
            request.project(),
            request.endpoint().base_url()
        ));
        let submitter = SubmitBomUseCase::new(Arc::clone(&self.server));
        let handle = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                let err = UploadError::Cancelled { token: None };
                tracing::warn!(phase = err.phase(), "upload cancelled before the server answered");
                self.progress_reporter.report_error("🛑 Upload cancelled");
                return Err(err);
            }
            submitted = submitter.execute(&request) => submitted?,
        };

        // Step 4: Wait for processing
        self.progress_reporter.report(&format!(
            "⏳ Waiting for processing (token {}, timeout {}s)",
            handle,
            command.poll_settings.deadline().as_secs()
        ));
        let watcher = CompletionWatcher::new(
            Arc::clone(&self.server),
            Arc::clone(&self.progress_reporter),
            command.poll_settings,
        );
        let started = Instant::now();
        let outcome = watcher
            .await_completion(request.endpoint(), &handle, cancel)
            .await;

        // Step 5: Turn the outcome into a report or an error
        self.conclude(
            outcome,
            request.project(),
            handle,
            bom_size,
            started.elapsed(),
            command.poll_settings,
        )
    }

    fn read_bom(&self, path: &Path) -> UploadResult<BomContent> {
        self.bom_reader.read_bom(path).map_err(|e| {
            let err = UploadError::BomRead {
                path: path.to_path_buf(),
                details: format!("{:#}", e),
            };
            tracing::error!(
                phase = err.phase(),
                path = %path.display(),
                error = %format!("{:#}", e),
                "failed to read BOM file"
            );
            err
        })
    }

    fn conclude(
        &self,
        outcome: CompletionOutcome,
        project: &ProjectCoordinates,
        handle: ProcessingHandle,
        bom_size: usize,
        waited: Duration,
        poll_settings: PollSettings,
    ) -> UploadResult<UploadReport> {
        let elapsed_ms = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX);

        match outcome {
            CompletionOutcome::Completed => {
                tracing::info!(
                    project = %project,
                    token = %handle,
                    elapsed_ms,
                    "BOM processing completed"
                );
                self.progress_reporter
                    .report_completion("✅ BOM processing completed");
                Ok(UploadReport::new(project.clone(), handle, bom_size, waited))
            }
            CompletionOutcome::TimedOut => {
                let err = UploadError::TimedOut {
                    token: handle.to_string(),
                    waited: poll_settings.deadline(),
                };
                tracing::warn!(
                    phase = err.phase(),
                    project = %project,
                    token = %handle,
                    timeout_secs = poll_settings.deadline().as_secs(),
                    "BOM processing did not finish before the deadline; the server may still be processing it"
                );
                self.progress_reporter
                    .report_error("⚠️  Timed out waiting for BOM processing");
                Err(err)
            }
            CompletionOutcome::QueryFailed(cause) => {
                let err = UploadError::QueryFailed {
                    token: handle.to_string(),
                    details: format!("{:#}", cause),
                };
                tracing::error!(
                    phase = err.phase(),
                    project = %project,
                    token = %handle,
                    error = %format!("{:#}", cause),
                    "failed to check BOM processing status"
                );
                self.progress_reporter
                    .report_error("❌ Failed to check BOM processing status");
                Err(err)
            }
            CompletionOutcome::Cancelled => {
                let err = UploadError::Cancelled {
                    token: Some(handle.to_string()),
                };
                tracing::warn!(
                    phase = err.phase(),
                    project = %project,
                    token = %handle,
                    elapsed_ms,
                    "stopped waiting for BOM processing"
                );
                self.progress_reporter
                    .report_error("🛑 Upload cancelled while waiting for BOM processing");
                Err(err)
            }
        }
    }
}

/// Required settings, in the order they are reported when missing
const REQUIRED_SETTINGS: [(&str, &str); 5] = [
    ("url", "TRIVY_PLUGIN_DEPENDENCYTRACK_URL"),
    ("apikey", "TRIVY_PLUGIN_DEPENDENCYTRACK_APIKEY"),
    ("project-name", "TRIVY_PLUGIN_DEPENDENCYTRACK_PROJECT_NAME"),
    ("project-version", "TRIVY_PLUGIN_DEPENDENCYTRACK_PROJECT_VERSION"),
    ("bom-file", "TRIVY_PLUGIN_DEPENDENCYTRACK_BOM_FILE"),
];

fn validate_command(command: &UploadCommand) -> UploadResult<(ServerEndpoint, ProjectCoordinates)> {
    let bom_path = command.bom_path.to_string_lossy();
    let values = [
        command.server_url.as_str(),
        command.api_key.as_str(),
        command.project_name.as_str(),
        command.project_version.as_str(),
        bom_path.as_ref(),
    ];

    for ((setting, env_var), value) in REQUIRED_SETTINGS.into_iter().zip(values) {
        if value.trim().is_empty() {
            return Err(configuration_error(setting, env_var, "value is empty"));
        }
    }

    let endpoint = ServerEndpoint::new(&command.server_url, &command.api_key).map_err(|e| {
        let (setting, env_var) = REQUIRED_SETTINGS[0];
        configuration_error(setting, env_var, &e.to_string())
    })?;

    let project = ProjectCoordinates::new(
        command.project_name.clone(),
        command.project_version.clone(),
    )
    .map_err(|e| {
        let (setting, env_var) = REQUIRED_SETTINGS[2];
        configuration_error(setting, env_var, &e.to_string())
    })?;

    Ok((endpoint, project))
}

fn configuration_error(setting: &'static str, env_var: &'static str, reason: &str) -> UploadError {
    let err = UploadError::Configuration {
        setting,
        env_var,
        reason: reason.to_string(),
    };
    tracing::error!(phase = err.phase(), setting, reason, "invalid upload settings");
    err
}
