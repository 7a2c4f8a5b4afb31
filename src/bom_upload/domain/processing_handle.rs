use crate::shared::Result;

/// Opaque token identifying one asynchronous ingestion job on the server
///
/// Only meaningful for the polling session that follows the submission that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessingHandle(String);

impl ProcessingHandle {
    pub fn new(token: String) -> Result<Self> {
        if token.trim().is_empty() {
            anyhow::bail!("Processing token cannot be empty");
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProcessingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
