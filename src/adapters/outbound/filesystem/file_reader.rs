use crate::bom_upload::domain::BomContent;
use crate::ports::outbound::BomReader;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_BOM_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading BOM documents from disk
///
/// Bytes are returned as-is: no UTF-8 decoding, BOM-marker stripping or
/// newline conversion.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl BomReader for FileSystemReader {
    /// Reads the BOM with security checks:
    /// - Reject symbolic links
    /// - Validate the path is a regular file
    /// - Reject empty files and files above the size limit
    fn read_bom(&self, path: &Path) -> Result<BomContent> {
        let file_size = validate_regular_file(path, "BOM file")?;
        validate_file_size(file_size, path, MAX_BOM_SIZE)?;

        let bytes = fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "BOM file read");
        BomContent::new(bytes)
    }
}
