/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports describe what the upload workflow needs from
/// the outside world: a BOM source, an ingestion server and a place to
/// report progress.
pub mod outbound;
