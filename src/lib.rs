//! dtrack-upload - BOM upload client for DependencyTrack
//!
//! This library uploads a Software Bill of Materials to a DependencyTrack
//! server and waits until the server has finished ingesting it, following
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`bom_upload`): Upload value objects and CI project resolution
//! - **Application Layer** (`application`): Use cases (submit, await completion, upload-and-await)
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! The `cli`, `config` and `logging` modules back the `dtrack-upload` binary.
//!
//! # Example
//!
//! ```no_run
//! use dtrack_upload::prelude::*;
//! use std::path::PathBuf;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let bom_reader = FileSystemReader::new();
//! let server = DependencyTrackClient::new()?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = UploadBomUseCase::new(bom_reader, server, progress_reporter);
//!
//! // Execute
//! let command = UploadCommand::new(
//!     "http://localhost:8081".to_string(),
//!     "odt_xxxxxxxx".to_string(),
//!     "shop".to_string(),
//!     "1.4.0".to_string(),
//!     true,
//!     PathBuf::from("bom.json"),
//!     PollSettings::default(),
//! );
//! let report = use_case.execute(command, &CancellationToken::new()).await?;
//! println!("{} processed (token {})", report.project, report.token);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod bom_upload;
pub mod cli;
pub mod config;
pub mod logging;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::FileSystemReader;
    pub use crate::adapters::outbound::network::DependencyTrackClient;
    pub use crate::application::dto::{UploadCommand, UploadReport};
    pub use crate::application::use_cases::{
        CompletionWatcher, SubmitBomUseCase, UploadBomUseCase,
    };
    pub use crate::bom_upload::domain::{
        BomContent, CompletionOutcome, PollSettings, ProcessingHandle, ProjectCoordinates,
        ServerEndpoint, UploadRequest,
    };
    pub use crate::bom_upload::services::{
        resolve_gitlab_project, GitlabCiContext, GitlabUploadPolicy, PipelineKind,
        ProjectResolution,
    };
    pub use crate::ports::outbound::{BomReader, IngestionServer, ProgressReporter};
    pub use crate::shared::error::{ExitCode, UploadError};
    pub use crate::shared::Result;
}
