/// Data Transfer Objects for application layer
///
/// DTOs carry resolved settings in and results out, keeping the domain
/// layer free of CLI and config-file concerns.
mod upload_command;
mod upload_report;

pub use upload_command::UploadCommand;
pub use upload_report::UploadReport;
