use crate::bom_upload::domain::BomContent;
use crate::shared::Result;
use std::path::Path;

/// BomReader port for loading the BOM document to upload
///
/// Implementations return the bytes untouched; no parsing or charset
/// conversion happens on the way in.
pub trait BomReader {
    /// Reads the BOM document at `path`
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, empty, or
    /// fails the reader's safety checks
    fn read_bom(&self, path: &Path) -> Result<BomContent>;
}
