/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console).
pub mod bom_reader;
pub mod ingestion_server;
pub mod progress_reporter;

pub use bom_reader::BomReader;
pub use ingestion_server::IngestionServer;
pub use progress_reporter::ProgressReporter;
