use dtrack_upload::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock BomReader for testing
#[derive(Clone)]
pub struct MockBomReader {
    pub content: Vec<u8>,
    pub should_fail: bool,
    pub read_paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockBomReader {
    pub fn new(content: &[u8]) -> Self {
        Self {
            content: content.to_vec(),
            should_fail: false,
            read_paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: Vec::new(),
            should_fail: true,
            read_paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn read_paths(&self) -> Vec<PathBuf> {
        self.read_paths.lock().unwrap().clone()
    }
}

impl BomReader for MockBomReader {
    fn read_bom(&self, path: &Path) -> Result<BomContent> {
        self.read_paths.lock().unwrap().push(path.to_path_buf());
        if self.should_fail {
            anyhow::bail!("Mock BOM reader failure: permission denied");
        }
        BomContent::new(self.content.clone())
    }
}
