/// Result alias used by ports and adapters.
///
/// Adapter failures stay as `anyhow::Error` so the underlying cause chain is
/// kept intact; use cases translate them into `UploadError` at the phase
/// boundary.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
