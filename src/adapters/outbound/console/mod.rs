/// Console adapters for operator-facing output
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
