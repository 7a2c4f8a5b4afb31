/// ProgressReporter port for operator-facing progress output
///
/// Kept separate from `tracing` events: log lines are for machines and
/// log collectors, this is what a human watching the terminal sees.
/// Status ticks are reported from the background polling task, hence
/// `Send + Sync`.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a bounded operation
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
