//! Storage abstraction for shared design snapshots.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::document::Document;
use crate::element::Element;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use uuid::Uuid;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Design not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// An opaque, exactly restorable snapshot of a page, addressed by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedDesign {
    /// Share identifier.
    pub id: String,
    /// Elements in paint order.
    pub elements: Vec<Element>,
    /// Canvas background color.
    pub canvas_background: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: u64,
}

impl SharedDesign {
    /// Snapshot a document under a fresh share ID.
    pub fn from_document(document: &Document) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        Self {
            id: Uuid::new_v4().to_string(),
            elements: document.elements().to_vec(),
            canvas_background: document.canvas_background().to_string(),
            created_at,
        }
    }

    /// Rebuild the document this snapshot was taken from.
    pub fn to_document(&self) -> Document {
        Document::from_parts(self.elements.clone(), self.canvas_background.clone())
    }

    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Trait for shared design storage backends.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save a design under its own ID.
    fn save(&self, design: &SharedDesign) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a design. Missing designs yield [`StorageError::NotFound`].
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SharedDesign>>;

    /// Delete a design.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all design IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a design exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for shared design storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save a design under its own ID.
    fn save(&self, design: &SharedDesign) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a design. Missing designs yield [`StorageError::NotFound`].
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SharedDesign>>;

    /// Delete a design.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all design IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a design exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Simple blocking executor for tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, Waker};

    let mut cx = Context::from_waker(Waker::noop());
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
