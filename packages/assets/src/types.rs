//! Options and batch types for image ingestion

use crate::AssetError;
use lander_parts::AssetRef;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Limits applied to every uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngestOptions {
    /// Per-file size ceiling in bytes
    pub max_bytes: u64,

    /// Bounding box images are scaled down into
    pub max_width: u32,
    pub max_height: u32,

    /// Lossy re-encode quality, 1-100
    pub quality: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_width: 1920,
            max_height: 1080,
            quality: 80,
        }
    }
}

/// One uploaded file
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,

    /// Size the client claimed, when it sent one
    pub declared_size: Option<u64>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            declared_size: None,
        }
    }

    pub fn with_declared_size(mut self, size: u64) -> Self {
        self.declared_size = Some(size);
        self
    }

    /// Larger of the declared and actual size
    pub fn effective_size(&self) -> u64 {
        let actual = self.bytes.len() as u64;
        self.declared_size.map_or(actual, |declared| declared.max(actual))
    }
}

/// Outcome for one file of a batch
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: String,
    pub result: Result<AssetRef, AssetError>,
}

impl BatchItem {
    pub fn asset(&self) -> Option<&AssetRef> {
        self.result.as_ref().ok()
    }
}
