/// BOM upload domain - value objects and pure services
///
/// Nothing in here performs I/O or reads process-wide state; the ports
/// and adapters layers supply everything from the outside.
pub mod domain;
pub mod services;
