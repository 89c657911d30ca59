// SPDX-License-Identifier: MIT OR Apache-2.0
//! Media upload/resize collaborator seam.
//!
//! Raw bytes never flow through the engine: the collaborator takes them and
//! returns a stable URL plus dimensions, which become the object's source
//! and initial layout.

use crate::error::RuntimeError;

/// Result of handing media bytes to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Stable URL for the stored media
    pub url: String,
    /// Media width in pixels
    pub width: u32,
    /// Media height in pixels
    pub height: u32,
}

/// External media storage.
pub trait MediaStore {
    /// Store media bytes and return their URL and dimensions.
    fn upload(&mut self, file_name: &str, bytes: &[u8]) -> Result<UploadedMedia, RuntimeError>;
}

/// In-memory media store for tests: fabricates URLs, reports fixed
/// dimensions.
#[derive(Debug)]
pub struct MemoryMediaStore {
    uploads: Vec<String>,
    width: u32,
    height: u32,
}

impl MemoryMediaStore {
    /// Create a store that reports the given dimensions for every upload.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            uploads: Vec::new(),
            width,
            height,
        }
    }

    /// File names uploaded so far, in order.
    pub fn uploads(&self) -> &[String] {
        &self.uploads
    }
}

impl MediaStore for MemoryMediaStore {
    fn upload(&mut self, file_name: &str, bytes: &[u8]) -> Result<UploadedMedia, RuntimeError> {
        if bytes.is_empty() {
            return Err(RuntimeError::StoreFailure(format!(
                "empty upload for '{file_name}'"
            )));
        }
        self.uploads.push(file_name.to_string());
        Ok(UploadedMedia {
            url: format!("memory://media/{}/{file_name}", self.uploads.len()),
            width: self.width,
            height: self.height,
        })
    }
}
