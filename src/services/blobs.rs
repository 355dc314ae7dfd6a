// SPDX-License-Identifier: MIT

//! Blob storage for uploaded product images.
//!
//! The catalog service writes uploads through the [`BlobStore`] trait so it
//! never depends on a filesystem path directly. Local disk is the only
//! implementation here; a durable object store can slot in behind the same
//! trait for production deployments.

use crate::error::AppError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Durable storage for uploaded files.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes` and return a reference (URL or path) for the stored
    /// blob. `original_name` is untrusted client input and must never be
    /// used as a path.
    async fn put(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError>;
}

/// Local-disk blob store rooted at a configured upload directory.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, original_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        let stored_name = generate_name(original_name);
        let path = self.root.join(&stored_name);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to create upload dir: {}", e)))?;

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to write upload: {}", e)))?;

        tracing::info!(file = %path.display(), size = bytes.len(), "Stored uploaded image");

        Ok(path.to_string_lossy().into_owned())
    }
}

/// Generate a stored filename: a fresh UUID plus the sanitized extension of
/// the client-supplied name. The client name itself never reaches the
/// filesystem, which closes off path traversal and collision problems.
fn generate_name(original_name: &str) -> String {
    let name = uuid::Uuid::new_v4().to_string();
    match sanitized_extension(original_name) {
        Some(ext) => format!("{}.{}", name, ext),
        None => name,
    }
}

/// Extract an alphanumeric, lowercased extension of at most 8 characters.
fn sanitized_extension(original_name: &str) -> Option<String> {
    let ext = original_name.rsplit_once('.')?.1;
    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
