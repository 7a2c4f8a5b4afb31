use super::ServerEndpoint;
use crate::shared::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

/// Raw BOM document bytes exactly as read from disk
///
/// The bytes are never rewritten; the only transformation is the base64
/// encoding required by the upload endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct BomContent(Vec<u8>);

impl BomContent {
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            anyhow::bail!("BOM content cannot be empty");
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Standard (padded) base64 text of the raw bytes
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl fmt::Debug for BomContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BomContent({} bytes)", self.0.len())
    }
}

/// Name and version of the DependencyTrack project receiving the BOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCoordinates {
    name: String,
    version: String,
}

impl ProjectCoordinates {
    pub fn new(name: String, version: String) -> Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("Project name cannot be empty");
        }
        if version.trim().is_empty() {
            anyhow::bail!("Project version cannot be empty");
        }
        Ok(Self { name, version })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for ProjectCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Everything a single BOM submission needs, validated up front
#[derive(Debug, Clone)]
pub struct UploadRequest {
    endpoint: ServerEndpoint,
    project: ProjectCoordinates,
    auto_create: bool,
    bom: BomContent,
}

impl UploadRequest {
    pub fn new(
        endpoint: ServerEndpoint,
        project: ProjectCoordinates,
        auto_create: bool,
        bom: BomContent,
    ) -> Self {
        Self {
            endpoint,
            project,
            auto_create,
            bom,
        }
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    pub fn project(&self) -> &ProjectCoordinates {
        &self.project
    }

    pub fn auto_create(&self) -> bool {
        self.auto_create
    }

    pub fn bom(&self) -> &BomContent {
        &self.bom
    }
}
