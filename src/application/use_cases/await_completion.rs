use crate::bom_upload::domain::{CompletionOutcome, PollSettings, ProcessingHandle, ServerEndpoint};
use crate::ports::outbound::{IngestionServer, ProgressReporter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// CompletionWatcher - waits for the server to finish ingesting a BOM
///
/// Polling runs on a background tokio task that owns the tick timer and the
/// deadline. The caller suspends once, on a oneshot channel, until that task
/// reports its single terminal [`CompletionOutcome`].
///
/// # Timing
/// The first status query happens one poll interval after the call, then
/// every interval after that. Queries never overlap: the next tick is not
/// considered until the current query has returned. When a tick and the
/// deadline are due at the same instant the deadline wins. Intervals and
/// deadlines beyond thirty years are clamped to thirty years.
///
/// # Type Parameters
/// * `S` - IngestionServer implementation
/// * `PR` - ProgressReporter implementation
pub struct CompletionWatcher<S, PR> {
    server: Arc<S>,
    progress_reporter: Arc<PR>,
    settings: PollSettings,
}

impl<S, PR> CompletionWatcher<S, PR>
where
    S: IngestionServer + 'static,
    PR: ProgressReporter + 'static,
{
    pub fn new(server: Arc<S>, progress_reporter: Arc<PR>, settings: PollSettings) -> Self {
        Self {
            server,
            progress_reporter,
            settings,
        }
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    /// Polls until the job completes, a query fails, the deadline passes, or
    /// `cancel` fires.
    ///
    /// Dropping the returned future stops the background task as well.
    pub async fn await_completion(
        &self,
        endpoint: &ServerEndpoint,
        handle: &ProcessingHandle,
        cancel: &CancellationToken,
    ) -> CompletionOutcome {
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let stop = cancel.child_token();
        let _stop_on_drop = stop.clone().drop_guard();

        let server = Arc::clone(&self.server);
        let reporter = Arc::clone(&self.progress_reporter);
        let task_endpoint = endpoint.clone();
        let task_handle = handle.clone();
        let settings = self.settings;

        let poller = tokio::spawn(async move {
            let outcome = poll_until_terminal(
                server.as_ref(),
                reporter.as_ref(),
                &task_endpoint,
                &task_handle,
                settings,
                &stop,
            )
            .await;
            // Nobody is listening any more if the caller went away
            let _ = outcome_tx.send(outcome);
        });

        match outcome_rx.await {
            Ok(outcome) => outcome,
            // The sender only goes away without a value if the task died
            Err(_) => match poller.await {
                Err(join_error) if join_error.is_panic() => {
                    std::panic::resume_unwind(join_error.into_panic())
                }
                _ => {
                    tracing::warn!(token = %handle, "status polling task was shut down");
                    CompletionOutcome::Cancelled
                }
            },
        }
    }
}

/// Upper bound for any timer offset; tokio uses the same horizon internally
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn offset_from(start: Instant, offset: Duration) -> Instant {
    start + offset.min(FAR_FUTURE)
}

async fn poll_until_terminal<S, PR>(
    server: &S,
    reporter: &PR,
    endpoint: &ServerEndpoint,
    handle: &ProcessingHandle,
    settings: PollSettings,
    cancel: &CancellationToken,
) -> CompletionOutcome
where
    S: IngestionServer + ?Sized,
    PR: ProgressReporter + ?Sized,
{
    let started = Instant::now();
    let deadline = sleep_until(offset_from(started, settings.deadline()));
    tokio::pin!(deadline);

    let mut ticker = interval_at(
        offset_from(started, settings.poll_interval()),
        settings.poll_interval().min(FAR_FUTURE),
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let max_ticks = settings.max_ticks();
    let mut tick: usize = 0;

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => return CompletionOutcome::Cancelled,
            _ = &mut deadline => return CompletionOutcome::TimedOut,
            _ = ticker.tick() => {
                tick += 1;

                let status = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return CompletionOutcome::Cancelled,
                    status = server.is_being_processed(endpoint, handle) => status,
                };

                match status {
                    Err(cause) => return CompletionOutcome::QueryFailed(cause),
                    Ok(false) => {
                        tracing::debug!(token = %handle, tick, "server reports processing finished");
                        return CompletionOutcome::Completed;
                    }
                    Ok(true) => {
                        tracing::debug!(token = %handle, tick, "BOM still processing");
                        reporter.report_progress(
                            tick.min(max_ticks),
                            max_ticks,
                            Some("Waiting for DependencyTrack to process the BOM"),
                        );
                    }
                }
            }
        }
    }
}
