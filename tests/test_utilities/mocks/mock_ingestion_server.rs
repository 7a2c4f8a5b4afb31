use async_trait::async_trait;
use dtrack_upload::prelude::*;
use std::sync::{Arc, Mutex};

/// Scripted answer to one status query
#[derive(Debug, Clone)]
pub enum MockStatus {
    Processing,
    Done,
    Fail(String),
}

#[derive(Default)]
struct Calls {
    submitted: Vec<(String, String, bool, String)>,
    queried_tokens: Vec<String>,
}

/// Mock IngestionServer for testing
///
/// Clones share call records, so a test can hand one clone to the use case
/// and inspect the other afterwards. Once the status script is used up every
/// further query reports `Processing`.
#[derive(Clone)]
pub struct MockIngestionServer {
    token: String,
    submit_error: Option<String>,
    statuses: Arc<Vec<MockStatus>>,
    calls: Arc<Mutex<Calls>>,
}

impl MockIngestionServer {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            submit_error: None,
            statuses: Arc::new(Vec::new()),
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }

    pub fn with_statuses(mut self, statuses: Vec<MockStatus>) -> Self {
        self.statuses = Arc::new(statuses);
        self
    }

    pub fn with_submit_failure(message: &str) -> Self {
        Self {
            submit_error: Some(message.to_string()),
            ..Self::new("unused")
        }
    }

    pub fn submit_count(&self) -> usize {
        self.calls.lock().unwrap().submitted.len()
    }

    pub fn query_count(&self) -> usize {
        self.calls.lock().unwrap().queried_tokens.len()
    }

    pub fn queried_tokens(&self) -> Vec<String> {
        self.calls.lock().unwrap().queried_tokens.clone()
    }

    /// (project name, project version, auto-create, base64 BOM) of each submission
    pub fn submissions(&self) -> Vec<(String, String, bool, String)> {
        self.calls.lock().unwrap().submitted.clone()
    }
}

#[async_trait]
impl IngestionServer for MockIngestionServer {
    async fn submit_bom(&self, request: &UploadRequest) -> Result<ProcessingHandle> {
        self.calls.lock().unwrap().submitted.push((
            request.project().name().to_string(),
            request.project().version().to_string(),
            request.auto_create(),
            request.bom().to_base64(),
        ));
        if let Some(ref message) = self.submit_error {
            anyhow::bail!("{}", message);
        }
        ProcessingHandle::new(self.token.clone())
    }

    async fn is_being_processed(
        &self,
        _endpoint: &ServerEndpoint,
        handle: &ProcessingHandle,
    ) -> Result<bool> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.queried_tokens.push(handle.as_str().to_string());
            calls.queried_tokens.len() - 1
        };
        match self.statuses.get(index) {
            Some(MockStatus::Done) => Ok(false),
            Some(MockStatus::Fail(message)) => anyhow::bail!("{}", message),
            Some(MockStatus::Processing) | None => Ok(true),
        }
    }
}
