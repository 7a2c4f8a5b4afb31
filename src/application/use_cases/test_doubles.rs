//! Hand-rolled port implementations shared by the use case unit tests.

use crate::bom_upload::domain::{BomContent, ProcessingHandle, ServerEndpoint, UploadRequest};
use crate::ports::outbound::{BomReader, IngestionServer, ProgressReporter};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Scripted reply to one status query
#[derive(Debug, Clone, Copy)]
pub(crate) enum StatusReply {
    Processing,
    Done,
    Fail(&'static str),
    Panic(&'static str),
}

/// IngestionServer that answers from a script and counts calls.
///
/// Once the status script runs out every further query reports "processing".
pub(crate) struct ScriptedServer {
    submit_reply: std::result::Result<String, String>,
    statuses: Mutex<VecDeque<StatusReply>>,
    submit_calls: AtomicUsize,
    query_calls: AtomicUsize,
    submitted_bom_base64: Mutex<Option<String>>,
}

impl ScriptedServer {
    pub(crate) fn accepting(token: &str) -> Self {
        Self {
            submit_reply: Ok(token.to_string()),
            statuses: Mutex::new(VecDeque::new()),
            submit_calls: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
            submitted_bom_base64: Mutex::new(None),
        }
    }

    pub(crate) fn rejecting(message: &str) -> Self {
        Self {
            submit_reply: Err(message.to_string()),
            ..Self::accepting("unused")
        }
    }

    pub(crate) fn with_statuses(self, statuses: Vec<StatusReply>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    /// Processing for `ticks - 1` queries, done on query number `ticks`
    pub(crate) fn done_on_tick(self, ticks: usize) -> Self {
        let mut statuses = vec![StatusReply::Processing; ticks - 1];
        statuses.push(StatusReply::Done);
        self.with_statuses(statuses)
    }

    pub(crate) fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn submitted_bom_base64(&self) -> Option<String> {
        self.submitted_bom_base64.lock().unwrap().clone()
    }
}

#[async_trait]
impl IngestionServer for ScriptedServer {
    async fn submit_bom(&self, request: &UploadRequest) -> Result<ProcessingHandle> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        *self.submitted_bom_base64.lock().unwrap() = Some(request.bom().to_base64());
        match &self.submit_reply {
            Ok(token) => ProcessingHandle::new(token.clone()),
            Err(message) => anyhow::bail!("{}", message),
        }
    }

    async fn is_being_processed(
        &self,
        _endpoint: &ServerEndpoint,
        _handle: &ProcessingHandle,
    ) -> Result<bool> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(StatusReply::Processing);
        match reply {
            StatusReply::Processing => Ok(true),
            StatusReply::Done => Ok(false),
            StatusReply::Fail(message) => anyhow::bail!("{}", message),
            StatusReply::Panic(message) => panic!("{}", message),
        }
    }
}

/// BomReader returning fixed bytes, or failing, and counting reads
pub(crate) struct StubBomReader {
    content: Option<Vec<u8>>,
    reads: AtomicUsize,
}

impl StubBomReader {
    pub(crate) fn with_content(content: &[u8]) -> Self {
        Self {
            content: Some(content.to_vec()),
            reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            content: None,
            reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl BomReader for StubBomReader {
    fn read_bom(&self, path: &Path) -> Result<BomContent> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match &self.content {
            Some(bytes) => BomContent::new(bytes.clone()),
            None => anyhow::bail!("No such file or directory: {}", path.display()),
        }
    }
}

pub(crate) struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

/// Collects the `phase` field of every tracing event while installed
#[derive(Clone, Default)]
pub(crate) struct PhaseRecorder(Arc<Mutex<Vec<String>>>);

impl PhaseRecorder {
    /// Routes events on the current thread to this recorder until the guard drops
    pub(crate) fn install(&self) -> tracing::subscriber::DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub(crate) fn phases(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

struct PhaseVisitor(Option<String>);

impl Visit for PhaseVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "phase" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

impl<S: tracing::Subscriber> Layer<S> for PhaseRecorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = PhaseVisitor(None);
        event.record(&mut visitor);
        if let Some(phase) = visitor.0 {
            self.0.lock().unwrap().push(phase);
        }
    }
}
