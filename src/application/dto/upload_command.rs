use crate::bom_upload::domain::PollSettings;
use std::fmt;
use std::path::PathBuf;

/// UploadCommand - Request DTO for the upload-and-await use case
///
/// Built once by the CLI layer from flags, environment and config file.
/// Values are passed through as given; the use case rejects empty or
/// malformed ones before any I/O happens.
#[derive(Clone)]
pub struct UploadCommand {
    /// Base URL of the DependencyTrack API server
    pub server_url: String,
    /// API key sent with every request
    pub api_key: String,
    pub project_name: String,
    pub project_version: String,
    /// Ask the server to create the project if it does not exist
    pub auto_create: bool,
    /// Path to the BOM document
    pub bom_path: PathBuf,
    pub poll_settings: PollSettings,
}

impl UploadCommand {
    pub fn new(
        server_url: String,
        api_key: String,
        project_name: String,
        project_version: String,
        auto_create: bool,
        bom_path: PathBuf,
        poll_settings: PollSettings,
    ) -> Self {
        Self {
            server_url,
            api_key,
            project_name,
            project_version,
            auto_create,
            bom_path,
            poll_settings,
        }
    }
}

impl fmt::Debug for UploadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCommand")
            .field("server_url", &self.server_url)
            .field("api_key", &"<redacted>")
            .field("project_name", &self.project_name)
            .field("project_version", &self.project_version)
            .field("auto_create", &self.auto_create)
            .field("bom_path", &self.bom_path)
            .field("poll_settings", &self.poll_settings)
            .finish()
    }
}
