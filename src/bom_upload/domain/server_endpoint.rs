use crate::shared::Result;
use std::fmt;

/// Location and credentials of a DependencyTrack API server
///
/// The base URL is stored without a trailing slash so endpoint paths can be
/// appended directly.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    base_url: String,
    api_key: String,
}

impl ServerEndpoint {
    pub fn new(url: &str, api_key: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            anyhow::bail!("Server URL cannot be empty");
        }

        let parsed = reqwest::Url::parse(url)
            .map_err(|e| anyhow::anyhow!("Server URL '{}' is not a valid URL: {}", url, e))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!(
                "Server URL '{}' must use http or https (got '{}')",
                url,
                parsed.scheme()
            );
        }

        if api_key.trim().is_empty() {
            anyhow::bail!("API key cannot be empty");
        }

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Joins an absolute API path (starting with '/') onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// Keeps the API key out of logs and panic messages.
impl fmt::Debug for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerEndpoint")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
