use crate::bom_upload::domain::{ProcessingHandle, ServerEndpoint, UploadRequest};
use crate::ports::outbound::IngestionServer;
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BOM_PATH: &str = "/api/v1/bom";
const EVENT_TOKEN_PATH: &str = "/api/v1/event/token/";
const API_KEY_HEADER: &str = "X-Api-Key";

/// Response bodies longer than this are cut before landing in error messages
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BomUploadBody<'a> {
    project_name: &'a str,
    project_version: &'a str,
    auto_create: bool,
    bom: String,
}

#[derive(Debug, Deserialize)]
struct BomUploadResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ProcessingStatus {
    processing: bool,
}

/// DependencyTrackClient adapter for the DependencyTrack REST API
///
/// Submits BOMs through `PUT /api/v1/bom` and checks their processing state
/// through `GET /api/v1/event/token/{token}`. Both requests authenticate
/// with the `X-Api-Key` header.
///
/// One client is shared by the submission and every status query so the
/// connection pool is reused. No retries are performed here; the status
/// poller simply asks again on its next tick.
pub struct DependencyTrackClient {
    client: reqwest::Client,
}

impl DependencyTrackClient {
    /// Creates a client with a 30 second per-request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("dtrack-upload/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    async fn error_for_status(
        response: reqwest::Response,
        action: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
        if body.is_empty() {
            anyhow::bail!("DependencyTrack {} returned status code {}", action, status);
        }
        anyhow::bail!(
            "DependencyTrack {} returned status code {}: {}",
            action,
            status,
            body
        );
    }
}

#[async_trait]
impl IngestionServer for DependencyTrackClient {
    async fn submit_bom(&self, request: &UploadRequest) -> Result<ProcessingHandle> {
        let endpoint = request.endpoint();
        let body = BomUploadBody {
            project_name: request.project().name(),
            project_version: request.project().version(),
            auto_create: request.auto_create(),
            bom: request.bom().to_base64(),
        };

        let response = self
            .client
            .put(endpoint.url_for(BOM_PATH))
            .header(API_KEY_HEADER, endpoint.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send BOM to {}: {}", endpoint.base_url(), e))?;

        let response = Self::error_for_status(response, "BOM upload").await?;
        let parsed: BomUploadResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse BOM upload response: {}", e))?;

        ProcessingHandle::new(parsed.token)
    }

    async fn is_being_processed(
        &self,
        endpoint: &ServerEndpoint,
        handle: &ProcessingHandle,
    ) -> Result<bool> {
        // Security: the token comes from the server; keep it inside one path segment
        let path = format!("{}{}", EVENT_TOKEN_PATH, urlencoding::encode(handle.as_str()));

        let response = self
            .client
            .get(endpoint.url_for(&path))
            .header(API_KEY_HEADER, endpoint.api_key())
            .send()
            .await
            .map_err(|e| {
                anyhow::anyhow!("Failed to query processing status for token {}: {}", handle, e)
            })?;

        let response = Self::error_for_status(response, "status query").await?;
        let status: ProcessingStatus = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse processing status response: {}", e))?;

        Ok(status.processing)
    }
}
