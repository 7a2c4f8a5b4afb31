/// Mock implementations for testing
mod mock_bom_reader;
mod mock_ingestion_server;
mod mock_progress_reporter;

pub use mock_bom_reader::MockBomReader;
pub use mock_ingestion_server::{MockIngestionServer, MockStatus};
pub use mock_progress_reporter::MockProgressReporter;
