pub mod completion_outcome;
pub mod poll_settings;
pub mod processing_handle;
pub mod server_endpoint;
pub mod upload_request;

pub use completion_outcome::CompletionOutcome;
pub use poll_settings::PollSettings;
pub use processing_handle::ProcessingHandle;
pub use server_endpoint::ServerEndpoint;
pub use upload_request::{BomContent, ProjectCoordinates, UploadRequest};
