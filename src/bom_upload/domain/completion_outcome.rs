/// Terminal result of waiting for server-side BOM processing
///
/// Produced exactly once per polling session.
#[derive(Debug)]
pub enum CompletionOutcome {
    /// The server reported the job is no longer processing
    Completed,
    /// The deadline fired before any status query reported completion
    TimedOut,
    /// A status query failed; polling stopped at that query
    QueryFailed(anyhow::Error),
    /// The caller cancelled the wait
    Cancelled,
}

impl CompletionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CompletionOutcome::Completed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompletionOutcome::Completed => "completed",
            CompletionOutcome::TimedOut => "timed-out",
            CompletionOutcome::QueryFailed(_) => "query-failed",
            CompletionOutcome::Cancelled => "cancelled",
        }
    }
}
